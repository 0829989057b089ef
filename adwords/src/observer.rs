//! Diagnostics hooks around each SOAP exchange
//!
//! Observers see the full outbound request and the raw inbound response.
//! They only observe: nothing they do changes the outcome of a call.

use crate::http::{HttpRequest, HttpResponse};
use adwconfig::TransportConfig;
use parking_lot::Mutex;
use tracing::{debug, trace};

pub trait TransportObserver {
    fn on_request(&self, action: &str, request: &HttpRequest);

    fn on_response(&self, url: &str, response: &HttpResponse);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransportObserver for NoopObserver {
    fn on_request(&self, _action: &str, _request: &HttpRequest) {}

    fn on_response(&self, _url: &str, _response: &HttpResponse) {}
}

/// Emits `tracing` events; full bodies are dumped only when `dump_bodies`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    dump_bodies: bool,
}

impl TracingObserver {
    pub fn new(dump_bodies: bool) -> Self {
        Self { dump_bodies }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(config.debug)
    }
}

impl TransportObserver for TracingObserver {
    fn on_request(&self, action: &str, request: &HttpRequest) {
        trace!(url=%request.url, action=%action, bytes=request.body.len(), "SOAP request");

        if self.dump_bodies {
            debug!(
                "request ->\n{}\n{:?}\n{}",
                request.url,
                request.headers,
                String::from_utf8_lossy(&request.body)
            );
        }
    }

    fn on_response(&self, url: &str, response: &HttpResponse) {
        trace!(url=%url, status=response.status, bytes=response.body.len(), "SOAP response");

        if self.dump_bodies {
            debug!(
                "response ->\n{}\n{}",
                String::from_utf8_lossy(&response.body),
                response.status
            );
        }
    }
}

/// One side of a recorded exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Request {
        action: String,
        url: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    },
    Response {
        url: String,
        status: u16,
        body: Vec<u8>,
    },
}

/// Keeps every exchange in memory, for tests and ad-hoc inspection
#[derive(Debug, Default)]
pub struct MemoryObserver {
    exchanges: Mutex<Vec<Exchange>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().clone()
    }

    pub fn clear(&self) {
        self.exchanges.lock().clear();
    }
}

impl TransportObserver for MemoryObserver {
    fn on_request(&self, action: &str, request: &HttpRequest) {
        self.exchanges.lock().push(Exchange::Request {
            action: action.to_string(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
    }

    fn on_response(&self, url: &str, response: &HttpResponse) {
        self.exchanges.lock().push(Exchange::Response {
            url: url.to_string(),
            status: response.status,
            body: response.body.clone(),
        });
    }
}
