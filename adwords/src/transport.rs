//! SOAP envelope transport
//!
//! One call is one linear exchange: build the envelope, POST it, unwrap the
//! response envelope and decide whether the body is a fault. Nothing is
//! retried and no state is kept between calls.

use crate::auth::Auth;
use crate::endpoints::ServiceUrl;
use crate::errors::TransportError;
use crate::http::HttpRequest;
use adwsoap::{
    RequestHeader, ResponseHeader, XmlPayload, build_request_envelope, parse_fault,
    parse_response_envelope,
};
use tracing::{debug, warn};

pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Unwrapped response of a successful call
#[derive(Debug, Clone)]
pub struct SoapResponse {
    pub status: u16,
    pub header: ResponseHeader,
    /// Inner XML of `soap:Body`, left for the operation-specific decoder
    pub body: Vec<u8>,
}

fn soap_headers(action: &str, content_length: usize) -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "text/xml".to_string()),
        ("Accept".to_string(), "multipart/*".to_string()),
        (
            "Content-Type".to_string(),
            "text/xml;charset=UTF-8".to_string(),
        ),
        ("Content-Length".to_string(), content_length.to_string()),
        (SOAP_ACTION_HEADER.to_string(), action.to_string()),
    ]
}

impl Auth {
    fn request_header(&self, endpoint: &ServiceUrl) -> RequestHeader {
        RequestHeader::new(endpoint.namespace())
            .with_user_agent(self.user_agent.as_str())
            .with_developer_token(self.developer_token.as_str())
            .with_client_customer_id(self.customer_id.as_str())
            .with_partial_failure(self.partial_failure)
    }

    /// Sends `body` as operation `action` to `endpoint`
    ///
    /// Fault detection follows [`Auth::fault_policy`]: for a fault-eligible
    /// status the inner body must decode as a fault, and that fault is the
    /// error. Any other status is a success, whatever the body holds.
    pub fn request<P: XmlPayload + ?Sized>(
        &self,
        endpoint: &ServiceUrl,
        action: &str,
        body: &P,
    ) -> Result<SoapResponse, TransportError> {
        let envelope = build_request_envelope(&self.request_header(endpoint), body)
            .map_err(TransportError::Serialize)?;

        let url = endpoint.to_string();
        let request = HttpRequest {
            headers: soap_headers(action, envelope.len()),
            url: url.clone(),
            body: envelope,
        };

        self.observer().on_request(action, &request);

        let response = self
            .client()
            .post(&request)
            .map_err(|source| TransportError::Http {
                url: url.clone(),
                source,
            })?;

        self.observer().on_response(&url, &response);

        let status = response.status;
        let envelope = match parse_response_envelope(&response.body) {
            Ok(envelope) => envelope,
            Err(source) => {
                return Err(TransportError::Envelope {
                    status,
                    source,
                    raw: response.body,
                });
            }
        };

        if self.fault_policy.is_fault_status(status) {
            return match parse_fault(&envelope.body) {
                Ok(fault) => {
                    warn!(url=%url, action=%action, status, fault=%fault, "SOAP fault");
                    Err(TransportError::Fault {
                        status,
                        fault,
                        raw: envelope.body,
                    })
                }
                Err(source) => Err(TransportError::FaultParse {
                    status,
                    source,
                    raw: response.body,
                }),
            };
        }

        debug!(
            url=%url,
            action=%action,
            status,
            request_id=%envelope.header.request_id,
            operations=envelope.header.operations,
            "SOAP call completed"
        );

        Ok(SoapResponse {
            status,
            header: envelope.header,
            body: envelope.body,
        })
    }
}

/// Sends `body` as operation `action` to `endpoint` on behalf of `auth` and
/// returns the inner response body
pub fn send<P: XmlPayload + ?Sized>(
    endpoint: &ServiceUrl,
    action: &str,
    body: &P,
    auth: &Auth,
) -> Result<Vec<u8>, TransportError> {
    auth.request(endpoint, action, body).map(|r| r.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_headers() {
        let headers = soap_headers("mutate", 42);
        let names: Vec<&str> = headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["Accept", "Accept", "Content-Type", "Content-Length", "SOAPAction"]
        );
        assert_eq!(headers[3].1, "42");
        assert_eq!(headers[4].1, "mutate");
    }
}
