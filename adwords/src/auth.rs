use crate::http::{HttpClient, UreqClient};
use crate::observer::{NoopObserver, TracingObserver, TransportObserver};
use adwconfig::{FaultPolicy, TransportConfig};
use std::fmt;
use std::sync::Arc;

pub type SharedClient = Arc<dyn HttpClient + Send + Sync>;
pub type SharedObserver = Arc<dyn TransportObserver + Send + Sync>;

/// Credential and session context for one caller
///
/// Requests only read from it, so one `Auth` can be shared across threads
/// as long as its HTTP client tolerates concurrent use.
#[derive(Clone)]
pub struct Auth {
    pub customer_id: String,
    pub developer_token: String,
    pub user_agent: String,
    /// Ask the server to apply every valid operation of a batch
    pub partial_failure: bool,
    pub fault_policy: FaultPolicy,
    client: SharedClient,
    observer: SharedObserver,
}

impl Auth {
    pub fn builder(client: SharedClient) -> AuthBuilder {
        AuthBuilder::new(client)
    }

    /// Builder with a ureq client, tracing observer, user agent and fault
    /// policy taken from the transport configuration
    pub fn from_config(config: &TransportConfig) -> AuthBuilder {
        AuthBuilder::new(Arc::new(UreqClient::new(config)))
            .user_agent(config.user_agent.clone())
            .fault_policy(config.fault_policy)
            .observer(Arc::new(TracingObserver::from_config(config)))
    }

    pub fn client(&self) -> &(dyn HttpClient + Send + Sync) {
        self.client.as_ref()
    }

    pub fn observer(&self) -> &(dyn TransportObserver + Send + Sync) {
        self.observer.as_ref()
    }

    /// Copy of this context with another partial-failure setting
    pub fn with_partial_failure(&self, partial_failure: bool) -> Auth {
        Auth {
            partial_failure,
            ..self.clone()
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("customer_id", &self.customer_id)
            .field("developer_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("partial_failure", &self.partial_failure)
            .field("fault_policy", &self.fault_policy)
            .finish_non_exhaustive()
    }
}

pub struct AuthBuilder {
    customer_id: String,
    developer_token: String,
    user_agent: String,
    partial_failure: bool,
    fault_policy: FaultPolicy,
    client: SharedClient,
    observer: SharedObserver,
}

impl AuthBuilder {
    fn new(client: SharedClient) -> Self {
        Self {
            customer_id: String::new(),
            developer_token: String::new(),
            user_agent: adwconfig::DEFAULT_USER_AGENT.to_string(),
            partial_failure: false,
            fault_policy: FaultPolicy::default(),
            client,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = token.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn partial_failure(mut self, partial_failure: bool) -> Self {
        self.partial_failure = partial_failure;
        self
    }

    pub fn fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }

    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Auth {
        Auth {
            customer_id: self.customer_id,
            developer_token: self.developer_token,
            user_agent: self.user_agent,
            partial_failure: self.partial_failure,
            fault_policy: self.fault_policy,
            client: self.client,
            observer: self.observer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpError, HttpRequest, HttpResponse};

    struct Unreachable;

    impl HttpClient for Unreachable {
        fn post(&self, _request: &HttpRequest) -> Result<HttpResponse, HttpError> {
            Err("unreachable".into())
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let auth = Auth::builder(Arc::new(Unreachable))
            .customer_id("123")
            .developer_token("secret-token")
            .build();

        let debug = format!("{:?}", auth);
        assert!(debug.contains("123"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_with_partial_failure_leaves_original() {
        let auth = Auth::builder(Arc::new(Unreachable)).build();
        let batch = auth.with_partial_failure(true);

        assert!(!auth.partial_failure);
        assert!(batch.partial_failure);
    }

    #[test]
    fn test_from_config() {
        let config = TransportConfig {
            user_agent: "reporting-job".to_string(),
            fault_policy: FaultPolicy::NonSuccess,
            ..Default::default()
        };

        let auth = Auth::from_config(&config).developer_token("tok").build();
        assert_eq!(auth.user_agent, "reporting-job");
        assert_eq!(auth.fault_policy, FaultPolicy::NonSuccess);
    }
}
