//! Erreurs SOAP

/// Erreur de construction ou de parsing SOAP
#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("XML write error: {0}")]
    Write(#[from] xmltree::Error),

    #[error("XML serialization error: {0}")]
    Serialize(String),

    #[error("Generated XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Missing RequestHeader in SOAP Header")]
    MissingRequestHeader,

    #[error("Response body is not a fault: {0}")]
    NotAFault(String),

    #[error("Invalid {0} value: {1}")]
    InvalidValue(String, String),
}

impl SoapError {
    pub fn serialize(err: impl std::fmt::Display) -> Self {
        SoapError::Serialize(err.to_string())
    }

    pub fn invalid_value(name: &str, value: &str) -> Self {
        SoapError::InvalidValue(name.to_string(), value.to_string())
    }
}
