//! Blocking SOAP client binding for the AdWords management API
//!
//! The crate covers the transport shared by every service operation:
//! build the SOAP envelope with the authentication header, POST it, unwrap
//! the response envelope and turn HTTP/SOAP faults into errors.
//! Operation-specific request and response types are left to callers, which
//! render their bodies through [`XmlPayload`].
//!
//! # Example
//!
//! ```no_run
//! use adwconfig::ApiConfig;
//! use adwords::{Auth, Selector, Service, ServiceCatalog, SoapOperation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::load(None)?;
//! let catalog = ServiceCatalog::new(&config.endpoints);
//!
//! let auth = Auth::from_config(&config.transport)
//!     .customer_id("123-456-7890")
//!     .developer_token("dev-token")
//!     .build();
//!
//! let endpoint = catalog.get(Service::CampaignService);
//! let selector = Selector::new("serviceSelector").fields(["Id", "Name"]);
//! let body = SoapOperation::new(endpoint.namespace(), "get").part(&selector)?;
//!
//! let response = auth.request(endpoint, "get", &body)?;
//! println!("{} operations", response.header.operations);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod endpoints;
pub mod errors;
pub mod http;
pub mod observer;
pub mod selector;
pub mod transport;

pub use adwconfig::FaultPolicy;
pub use adwsoap::{
    ApiError, ApiExceptionFault, RequestHeader, ResponseHeader, SoapOperation, XmlPayload,
};

pub use auth::{Auth, AuthBuilder};
pub use endpoints::{EndpointGroup, Service, ServiceCatalog, ServiceUrl};
pub use errors::TransportError;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, UreqClient, default_agent};
pub use observer::{Exchange, MemoryObserver, NoopObserver, TracingObserver, TransportObserver};
pub use selector::{AwqlQuery, DateRange, OrderBy, Paging, Predicate, PredicateOperator, Selector, SortOrder};
pub use transport::{SoapResponse, send};

pub type Result<T> = std::result::Result<T, TransportError>;
