//! Endpoint catalog
//!
//! Every service lives under one of five endpoint groups, each versioned by
//! the single API version of the configuration:
//!
//! ```text
//! {host}/{group}/{version}[/{service}]
//! ```

use adwconfig::EndpointsConfig;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EndpointGroup {
    /// Core campaign management
    CampaignManagement,
    /// Account and customer management
    AccountManagement,
    Remarketing,
    ReportDownload,
    TrafficEstimation,
}

impl EndpointGroup {
    pub const ALL: [EndpointGroup; 5] = [
        EndpointGroup::CampaignManagement,
        EndpointGroup::AccountManagement,
        EndpointGroup::Remarketing,
        EndpointGroup::ReportDownload,
        EndpointGroup::TrafficEstimation,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            EndpointGroup::CampaignManagement => "cm",
            EndpointGroup::AccountManagement => "mcm",
            EndpointGroup::Remarketing => "rm",
            EndpointGroup::ReportDownload => "reportdownload",
            EndpointGroup::TrafficEstimation => "o",
        }
    }
}

macro_rules! services {
    ($($variant:ident => ($name:expr, $group:ident)),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Service {
            $($variant),*
        }

        impl Service {
            pub const ALL: &'static [Service] = &[$(Service::$variant),*];

            /// Service name appended to the group URL, empty for report download
            pub fn name(&self) -> &'static str {
                match self {
                    $(Service::$variant => $name),*
                }
            }

            pub fn group(&self) -> EndpointGroup {
                match self {
                    $(Service::$variant => EndpointGroup::$group),*
                }
            }
        }
    };
}

services! {
    AdGroupAdService => ("AdGroupAdService", CampaignManagement),
    AdGroupBidModifierService => ("AdGroupBidModifierService", CampaignManagement),
    AdGroupCriterionService => ("AdGroupCriterionService", CampaignManagement),
    AdGroupFeedService => ("AdGroupFeedService", CampaignManagement),
    AdGroupService => ("AdGroupService", CampaignManagement),
    AdParamService => ("AdParamService", CampaignManagement),
    AdwordsUserListService => ("AdwordsUserListService", Remarketing),
    BatchJobService => ("BatchJobService", CampaignManagement),
    BiddingStrategyService => ("BiddingStrategyService", CampaignManagement),
    BudgetOrderService => ("BudgetOrderService", CampaignManagement),
    BudgetService => ("BudgetService", CampaignManagement),
    CampaignAdExtensionService => ("CampaignAdExtensionService", CampaignManagement),
    CampaignCriterionService => ("CampaignCriterionService", CampaignManagement),
    CampaignFeedService => ("CampaignFeedService", CampaignManagement),
    CampaignService => ("CampaignService", CampaignManagement),
    CampaignSharedSetService => ("CampaignSharedSetService", CampaignManagement),
    ConstantDataService => ("ConstantDataService", CampaignManagement),
    ConversionTrackerService => ("ConversionTrackerService", CampaignManagement),
    CustomerFeedService => ("CustomerFeedService", CampaignManagement),
    CustomerService => ("CustomerService", AccountManagement),
    CustomerSyncService => ("CustomerSyncService", CampaignManagement),
    DataService => ("DataService", CampaignManagement),
    ExperimentService => ("ExperimentService", CampaignManagement),
    FeedItemService => ("FeedItemService", CampaignManagement),
    FeedMappingService => ("FeedMappingService", CampaignManagement),
    FeedService => ("FeedService", CampaignManagement),
    GeoLocationService => ("GeoLocationService", CampaignManagement),
    LabelService => ("LabelService", CampaignManagement),
    LocationCriterionService => ("LocationCriterionService", CampaignManagement),
    ManagedCustomerService => ("ManagedCustomerService", AccountManagement),
    MediaService => ("MediaService", CampaignManagement),
    MutateJobService => ("MutateJobService", CampaignManagement),
    OfflineConversionFeedService => ("OfflineConversionFeedService", CampaignManagement),
    ReportDefinitionService => ("ReportDefinitionService", CampaignManagement),
    ReportDownload => ("", ReportDownload),
    SharedCriterionService => ("SharedCriterionService", CampaignManagement),
    SharedSetService => ("SharedSetService", CampaignManagement),
    TargetingIdeaService => ("TargetingIdeaService", CampaignManagement),
    TrafficEstimatorService => ("TrafficEstimatorService", TrafficEstimation),
}

impl Service {
    pub fn from_name(name: &str) -> Option<Service> {
        Service::ALL
            .iter()
            .copied()
            .find(|s| !s.name().is_empty() && s.name() == name)
    }
}

/// Base URL of an endpoint group plus an optional service name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceUrl {
    pub url: String,
    pub name: Option<String>,
}

impl ServiceUrl {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            url: url.into(),
            name: (!name.is_empty()).then_some(name),
        }
    }

    /// Namespace of the `RequestHeader` sent to this endpoint
    pub fn namespace(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}/{}", self.url, name),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Immutable map from services to their URLs, built once from configuration
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    version: String,
    groups: HashMap<EndpointGroup, String>,
    services: HashMap<Service, ServiceUrl>,
}

impl ServiceCatalog {
    pub fn new(config: &EndpointsConfig) -> Self {
        let host = config.host.trim_end_matches('/');

        let groups: HashMap<EndpointGroup, String> = EndpointGroup::ALL
            .iter()
            .map(|g| (*g, format!("{}/{}/{}", host, g.path(), config.version)))
            .collect();

        let services = Service::ALL
            .iter()
            .map(|s| {
                let base = groups[&s.group()].clone();
                (*s, ServiceUrl::new(base, s.name()))
            })
            .collect();

        Self {
            version: config.version.clone(),
            groups,
            services,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn get(&self, service: Service) -> &ServiceUrl {
        &self.services[&service]
    }

    pub fn group_url(&self, group: EndpointGroup) -> &str {
        &self.groups[&group]
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new(&EndpointsConfig::default())
    }
}
