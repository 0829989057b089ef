use adwconfig::TransportConfig;
use std::time::Duration;
use ureq::Agent;

pub type HttpError = Box<dyn std::error::Error + Send + Sync>;

/// Outbound POST, fully buffered
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub url: String,
    /// Repeated names are sent as repeated headers
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// All values of a header, case-insensitive on the name
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP client used by the transport
///
/// Implementations must return non-2xx responses as `Ok` with their body:
/// fault bodies travel with 4xx/5xx statuses. Deadlines are the client's
/// business, the transport has none of its own.
pub trait HttpClient {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// [`HttpClient`] backed by a `ureq` agent
#[derive(Clone)]
pub struct UreqClient {
    agent: Agent,
    max_response_bytes: u64,
}

impl std::fmt::Debug for UreqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqClient")
            .field("max_response_bytes", &self.max_response_bytes)
            .finish_non_exhaustive()
    }
}

impl UreqClient {
    pub fn new(config: &TransportConfig) -> Self {
        Self::with_agent(default_agent(config), config.max_response_bytes)
    }

    /// Wraps a caller-supplied agent.
    ///
    /// The agent must be built with `http_status_as_error(false)`, otherwise
    /// fault bodies are lost behind `ureq::Error::StatusCode`.
    pub fn with_agent(agent: Agent, max_response_bytes: u64) -> Self {
        Self {
            agent,
            max_response_bytes,
        }
    }
}

/// Agent that does not treat 4xx/5xx as errors, with the configured timeout
pub fn default_agent(config: &TransportConfig) -> Agent {
    let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));

    let config = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build();

    config.into()
}

impl HttpClient for UreqClient {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.send(request.body.as_slice())?;
        let status = response.status().as_u16();

        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_response_bytes)
            .read_to_vec()?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values_case_insensitive() {
        let request = HttpRequest {
            url: "http://localhost/".to_string(),
            headers: vec![
                ("Accept".to_string(), "text/xml".to_string()),
                ("accept".to_string(), "multipart/*".to_string()),
                ("SOAPAction".to_string(), "get".to_string()),
            ],
            body: Vec::new(),
        };

        assert_eq!(request.header_values("ACCEPT"), vec!["text/xml", "multipart/*"]);
        assert_eq!(request.header_values("soapaction"), vec!["get"]);
        assert!(request.header_values("Content-Type").is_empty());
    }
}
