//! Construction des requêtes SOAP

use crate::{RequestHeader, SOAP_ENV_NS, SoapError, XmlPayload};
use xmltree::{Element, XMLNode};

pub(crate) fn text_element(name: &str, text: &str) -> Element {
    let mut elem = Element::new(name);
    if !text.is_empty() {
        elem.children.push(XMLNode::Text(text.to_string()));
    }
    elem
}

impl RequestHeader {
    pub(crate) fn to_element(&self) -> Element {
        let mut header = Element::new("RequestHeader");
        if !self.namespace.is_empty() {
            header
                .attributes
                .insert("xmlns".to_string(), self.namespace.clone());
        }

        header
            .children
            .push(XMLNode::Element(text_element("userAgent", &self.user_agent)));
        header.children.push(XMLNode::Element(text_element(
            "developerToken",
            &self.developer_token,
        )));

        if let Some(customer_id) = self.client_customer_id.as_deref().filter(|c| !c.is_empty()) {
            header
                .children
                .push(XMLNode::Element(text_element("clientCustomerId", customer_id)));
        }

        // https://developers.google.com/adwords/api/docs/guides/partial-failure
        if self.partial_failure {
            header
                .children
                .push(XMLNode::Element(text_element("partialFailure", "true")));
        }

        header
    }
}

pub(crate) fn write_element(element: &Element, indent: bool) -> Result<Vec<u8>, SoapError> {
    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(indent)
        .perform_indent(indent)
        .indent_string("  ");
    element.write_with_config(&mut buf, config)?;
    Ok(buf)
}

/// Construit une enveloppe de requête complète
///
/// ```text
/// <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
///   <soap:Header>
///     <RequestHeader xmlns="…">…</RequestHeader>
///   </soap:Header>
///   <soap:Body>{payload}</soap:Body>
/// </soap:Envelope>
/// ```
///
/// L'indentation n'a qu'un intérêt de lisibilité pour les traces de debug.
pub fn build_request_envelope<P: XmlPayload + ?Sized>(
    header: &RequestHeader,
    body: &P,
) -> Result<Vec<u8>, SoapError> {
    let mut soap_header = Element::new("soap:Header");
    soap_header
        .children
        .push(XMLNode::Element(header.to_element()));

    let mut soap_body = Element::new("soap:Body");
    soap_body.children.push(XMLNode::Element(body.to_element()?));

    let mut envelope = Element::new("soap:Envelope");
    envelope
        .attributes
        .insert("xmlns:soap".to_string(), SOAP_ENV_NS.to_string());
    envelope.children.push(XMLNode::Element(soap_header));
    envelope.children.push(XMLNode::Element(soap_body));

    write_element(&envelope, true)
}
