use crate::http::HttpError;
use adwsoap::{ApiExceptionFault, SoapError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to build SOAP request: {0}")]
    Serialize(#[source] SoapError),

    #[error("HTTP error when sending SOAP request to {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The response is not a readable SOAP envelope. `raw` is the full HTTP body.
    #[error("Invalid SOAP envelope in response (HTTP status {status}): {source}")]
    Envelope {
        status: u16,
        #[source]
        source: SoapError,
        raw: Vec<u8>,
    },

    /// Fault-eligible status whose body could not be decoded as a fault.
    /// `raw` is the full HTTP body.
    #[error("Cannot decode fault (HTTP status {status}): {source}")]
    FaultParse {
        status: u16,
        #[source]
        source: SoapError,
        raw: Vec<u8>,
    },

    /// Application-level rejection reported by the server. `raw` is the inner
    /// SOAP body that carried the fault.
    #[error("API fault (HTTP status {status}): {fault}")]
    Fault {
        status: u16,
        #[source]
        fault: ApiExceptionFault,
        raw: Vec<u8>,
    },
}

impl TransportError {
    /// True for faults reported by the remote service, as opposed to local
    /// or network problems
    pub fn is_fault(&self) -> bool {
        matches!(self, TransportError::Fault { .. })
    }

    pub fn fault(&self) -> Option<&ApiExceptionFault> {
        match self {
            TransportError::Fault { fault, .. } => Some(fault),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Envelope { status, .. }
            | TransportError::FaultParse { status, .. }
            | TransportError::Fault { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response bytes kept for diagnostics, when a response was received
    pub fn raw_response(&self) -> Option<&[u8]> {
        match self {
            TransportError::Envelope { raw, .. }
            | TransportError::FaultParse { raw, .. }
            | TransportError::Fault { raw, .. } => Some(raw.as_slice()),
            _ => None,
        }
    }
}
