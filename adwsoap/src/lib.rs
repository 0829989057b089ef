//! # adwsoap - enveloppes SOAP pour l'API AdWords
//!
//! Ce crate regroupe la plomberie SOAP 1.1 utilisée par le client `adwords` :
//! construction des enveloppes de requête, lecture des enveloppes de réponse
//! et extraction des fautes applicatives.
//!
//! ## Fonctionnalités
//!
//! - ✅ Construction d'enveloppes de requête avec `RequestHeader`
//! - ✅ Parsing d'enveloppes de réponse (métadonnées + corps brut)
//! - ✅ Parsing des `ApiExceptionFault`
//! - ✅ Abstraction [`XmlPayload`] pour les corps d'opération
//!
//! ## Example
//!
//! ```ignore
//! use adwsoap::{RequestHeader, SoapOperation, build_request_envelope};
//!
//! let header = RequestHeader::new("https://adwords.google.com/api/adwords/cm/v201603")
//!     .with_developer_token("tok")
//!     .with_client_customer_id("123");
//!
//! let op = SoapOperation::new("https://adwords.google.com/api/adwords/cm/v201603", "get");
//! let xml = build_request_envelope(&header, &op).unwrap();
//! ```

mod builder;
mod envelope;
mod error;
mod fault;
mod parser;
mod payload;

pub use builder::build_request_envelope;
pub use envelope::{RequestHeader, ResponseEnvelope, ResponseHeader};
pub use error::SoapError;
pub use fault::{ApiError, ApiExceptionFault, build_fault_envelope, parse_fault};
pub use parser::{parse_request_header, parse_response_envelope};
pub use payload::{SoapOperation, XmlPayload, serde_element};

/// Namespace de l'enveloppe SOAP 1.1
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace XML Schema Instance (attribut `xsi:type` des erreurs)
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub type Result<T> = std::result::Result<T, SoapError>;
