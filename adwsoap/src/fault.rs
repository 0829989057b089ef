//! Fautes applicatives renvoyées par l'API

use crate::builder::{text_element, write_element};
use crate::parser::{child, child_text};
use crate::{SOAP_ENV_NS, SoapError, XSI_NS};
use std::fmt;
use xmltree::{Element, XMLNode};

/// Erreur élémentaire d'une `ApiExceptionFault`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// Type concret de l'erreur (attribut `xsi:type`, ex: "RateExceededError")
    pub error_type: String,

    /// Chemin OGNL du champ en cause (ex: "operations[0].operand.name")
    pub field_path: String,

    /// Valeur ayant déclenché l'erreur
    pub trigger: String,

    /// Code lisible (ex: "RateExceededError.RATE_EXCEEDED")
    pub error_string: String,

    /// Raison énumérée, spécifique au type d'erreur
    pub reason: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_string)?;
        if !self.field_path.is_empty() {
            write!(f, " @ {}", self.field_path)?;
        }
        if !self.trigger.is_empty() {
            write!(f, " (trigger: {})", self.trigger)?;
        }
        Ok(())
    }
}

/// Faute SOAP portant une `ApiExceptionFault`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiExceptionFault {
    /// `faultcode` de l'enveloppe, vide si le corps ne contenait que l'exception
    pub fault_code: String,

    /// `faultstring` de l'enveloppe
    pub fault_string: String,

    pub message: String,

    /// `ApplicationException.Type`
    pub application_exception_type: String,

    pub errors: Vec<ApiError>,
}

impl ApiExceptionFault {
    pub fn has_error_type(&self, error_type: &str) -> bool {
        self.errors.iter().any(|e| e.error_type == error_type)
    }
}

impl fmt::Display for ApiExceptionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = if !self.message.is_empty() {
            &self.message
        } else {
            &self.fault_string
        };
        write!(f, "{}", summary)?;

        let errors: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        if !errors.is_empty() {
            if !summary.is_empty() {
                write!(f, ": ")?;
            }
            write!(f, "{}", errors.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiExceptionFault {}

fn parse_api_error(elem: &Element) -> ApiError {
    let error_type = elem
        .attributes
        .get("type")
        .or_else(|| elem.attributes.get("xsi:type"))
        .map(|t| strip_prefix(t).to_string())
        .unwrap_or_else(|| child_text(elem, "ApiError.Type"));

    ApiError {
        error_type,
        field_path: child_text(elem, "fieldPath"),
        trigger: child_text(elem, "trigger"),
        error_string: child_text(elem, "errorString"),
        reason: child_text(elem, "reason"),
    }
}

fn strip_prefix(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

fn parse_api_exception(elem: &Element) -> ApiExceptionFault {
    let errors = elem
        .children
        .iter()
        .filter_map(|n| n.as_element())
        .filter(|e| e.name == "errors")
        .map(parse_api_error)
        .collect();

    ApiExceptionFault {
        message: child_text(elem, "message"),
        application_exception_type: child_text(elem, "ApplicationException.Type"),
        errors,
        ..Default::default()
    }
}

/// Parse le contenu interne d'un `soap:Body` comme une faute
///
/// Accepte un `Fault` SOAP complet (`faultcode`, `faultstring`,
/// `detail > ApiExceptionFault`) ou une `ApiExceptionFault` nue.
/// Tout autre contenu est une erreur.
pub fn parse_fault(inner_body: &[u8]) -> Result<ApiExceptionFault, SoapError> {
    // Le corps interne peut contenir plusieurs noeuds : on l'enveloppe
    let mut wrapped = Vec::with_capacity(inner_body.len() + 16);
    wrapped.extend_from_slice(b"<FaultBody>");
    wrapped.extend_from_slice(inner_body);
    wrapped.extend_from_slice(b"</FaultBody>");

    let wrapper = Element::parse(wrapped.as_slice())?;
    let first = wrapper
        .children
        .iter()
        .find_map(|n| n.as_element())
        .ok_or_else(|| SoapError::NotAFault("empty body".to_string()))?;

    match first.name.as_str() {
        "Fault" => {
            let mut fault = child(first, "detail")
                .and_then(|d| child(d, "ApiExceptionFault"))
                .map(parse_api_exception)
                .unwrap_or_default();
            fault.fault_code = child_text(first, "faultcode");
            fault.fault_string = child_text(first, "faultstring");
            Ok(fault)
        }
        "ApiExceptionFault" => Ok(parse_api_exception(first)),
        other => Err(SoapError::NotAFault(other.to_string())),
    }
}

/// Construit une enveloppe de réponse SOAP portant une faute
pub fn build_fault_envelope(fault: &ApiExceptionFault, namespace: &str) -> Result<String, SoapError> {
    let mut exception = Element::new("ApiExceptionFault");
    if !namespace.is_empty() {
        exception
            .attributes
            .insert("xmlns".to_string(), namespace.to_string());
    }
    exception
        .children
        .push(XMLNode::Element(text_element("message", &fault.message)));
    exception.children.push(XMLNode::Element(text_element(
        "ApplicationException.Type",
        &fault.application_exception_type,
    )));

    for error in &fault.errors {
        let mut errors = Element::new("errors");
        errors
            .attributes
            .insert("xmlns:xsi".to_string(), XSI_NS.to_string());
        errors
            .attributes
            .insert("xsi:type".to_string(), error.error_type.clone());
        errors
            .children
            .push(XMLNode::Element(text_element("fieldPath", &error.field_path)));
        errors
            .children
            .push(XMLNode::Element(text_element("trigger", &error.trigger)));
        errors
            .children
            .push(XMLNode::Element(text_element("errorString", &error.error_string)));
        errors
            .children
            .push(XMLNode::Element(text_element("reason", &error.reason)));
        exception.children.push(XMLNode::Element(errors));
    }

    let mut detail = Element::new("detail");
    detail.children.push(XMLNode::Element(exception));

    let mut soap_fault = Element::new("soap:Fault");
    soap_fault
        .children
        .push(XMLNode::Element(text_element("faultcode", &fault.fault_code)));
    soap_fault
        .children
        .push(XMLNode::Element(text_element("faultstring", &fault.fault_string)));
    soap_fault.children.push(XMLNode::Element(detail));

    let mut body = Element::new("soap:Body");
    body.children.push(XMLNode::Element(soap_fault));

    let mut envelope = Element::new("soap:Envelope");
    envelope
        .attributes
        .insert("xmlns:soap".to_string(), SOAP_ENV_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    Ok(String::from_utf8(write_element(&envelope, true)?)?)
}
