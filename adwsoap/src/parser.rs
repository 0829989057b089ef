//! Parser des enveloppes SOAP

use crate::builder::write_element;
use crate::{RequestHeader, ResponseEnvelope, ResponseHeader, SoapError};
use std::io::BufReader;
use xmltree::{Element, XMLNode};

/// Enfant direct dont le nom local est `name`, quel que soit le préfixe
pub(crate) fn child<'a>(parent: &'a Element, name: &str) -> Option<&'a Element> {
    parent.children.iter().find_map(|node| match node {
        XMLNode::Element(elem) if elem.name == name => Some(elem),
        _ => None,
    })
}

/// Texte d'un enfant direct, chaîne vide si absent
pub(crate) fn child_text(parent: &Element, name: &str) -> String {
    child(parent, name)
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

fn child_i64(parent: &Element, name: &str) -> Result<i64, SoapError> {
    let text = child_text(parent, name);
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>()
        .map_err(|_| SoapError::invalid_value(name, &text))
}

fn parse_root(xml: &[u8]) -> Result<Element, SoapError> {
    let root = Element::parse(BufReader::new(xml))?;

    if root.name != "Envelope" {
        return Err(SoapError::MissingEnvelope);
    }

    Ok(root)
}

/// Parse une enveloppe de réponse
///
/// Les métadonnées sont lues dans `Header > ResponseHeader` (ou
/// `RequestHeader`, que certains serveurs renvoient à la place) ; un en-tête
/// absent donne des métadonnées vides. Le contenu de `Body` est re-sérialisé
/// tel quel, sans être interprété.
pub fn parse_response_envelope(xml: &[u8]) -> Result<ResponseEnvelope, SoapError> {
    let root = parse_root(xml)?;

    let header = match child(&root, "Header")
        .and_then(|h| child(h, "ResponseHeader").or_else(|| child(h, "RequestHeader")))
    {
        Some(elem) => ResponseHeader {
            request_id: child_text(elem, "requestId"),
            service_name: child_text(elem, "serviceName"),
            method_name: child_text(elem, "methodName"),
            operations: child_i64(elem, "operations")?,
            response_time: child_i64(elem, "responseTime")?,
        },
        None => ResponseHeader::default(),
    };

    let body_elem = child(&root, "Body").ok_or(SoapError::MissingBody)?;

    Ok(ResponseEnvelope {
        header,
        body: inner_xml(body_elem)?,
    })
}

/// Re-sérialise les enfants d'un élément, sans déclaration XML
fn inner_xml(element: &Element) -> Result<Vec<u8>, SoapError> {
    let mut buf = Vec::new();
    for node in &element.children {
        match node {
            XMLNode::Element(elem) => buf.extend(write_element(elem, false)?),
            XMLNode::Text(text) => {
                buf.extend_from_slice(quick_xml::escape::escape(text.as_str()).as_bytes())
            }
            XMLNode::CData(text) => {
                buf.extend_from_slice(b"<![CDATA[");
                buf.extend_from_slice(text.as_bytes());
                buf.extend_from_slice(b"]]>");
            }
            _ => {}
        }
    }
    Ok(buf)
}

/// Relit l'en-tête d'une enveloppe de requête
pub fn parse_request_header(xml: &[u8]) -> Result<RequestHeader, SoapError> {
    let root = parse_root(xml)?;

    let elem = child(&root, "Header")
        .and_then(|h| child(h, "RequestHeader"))
        .ok_or(SoapError::MissingRequestHeader)?;

    let customer_id = child_text(elem, "clientCustomerId");
    let partial_failure = match child(elem, "partialFailure") {
        Some(_) => match child_text(elem, "partialFailure").as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => return Err(SoapError::invalid_value("partialFailure", other)),
        },
        None => false,
    };

    Ok(RequestHeader {
        namespace: elem.namespace.clone().unwrap_or_default(),
        user_agent: child_text(elem, "userAgent"),
        developer_token: child_text(elem, "developerToken"),
        client_customer_id: (!customer_id.is_empty()).then_some(customer_id),
        partial_failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SoapOperation, build_request_envelope};

    #[test]
    fn test_parse_response_envelope() {
        let xml = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <ResponseHeader xmlns="https://adwords.google.com/api/adwords/cm/v201603">
      <requestId>0005a1</requestId>
      <serviceName>CampaignService</serviceName>
      <methodName>get</methodName>
      <operations>2</operations>
      <responseTime>187</responseTime>
    </ResponseHeader>
  </soap:Header>
  <soap:Body>
    <getResponse xmlns="https://adwords.google.com/api/adwords/cm/v201603">
      <rval><totalNumEntries>0</totalNumEntries></rval>
    </getResponse>
  </soap:Body>
</soap:Envelope>"#;

        let envelope = parse_response_envelope(xml.as_bytes()).unwrap();
        assert_eq!(envelope.header.request_id, "0005a1");
        assert_eq!(envelope.header.service_name, "CampaignService");
        assert_eq!(envelope.header.method_name, "get");
        assert_eq!(envelope.header.operations, 2);
        assert_eq!(envelope.header.response_time, 187);

        let body = envelope.body_text();
        assert!(body.starts_with("<getResponse"));
        assert!(body.contains("<totalNumEntries>0</totalNumEntries>"));
        assert!(!body.contains("<?xml"));
    }

    #[test]
    fn test_parse_response_without_header() {
        let xml = r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope/"><Body/></Envelope>"#;

        let envelope = parse_response_envelope(xml.as_bytes()).unwrap();
        assert_eq!(envelope.header, ResponseHeader::default());
        assert!(envelope.body.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_envelope() {
        let err = parse_response_envelope(b"<html><body>502</body></html>").unwrap_err();
        assert!(matches!(err, SoapError::MissingEnvelope));
    }

    #[test]
    fn test_parse_rejects_missing_body() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Header/></s:Envelope>"#;
        let err = parse_response_envelope(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::MissingBody));
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        let err = parse_response_envelope(b"not xml at all <").unwrap_err();
        assert!(matches!(err, SoapError::Xml(_)));
    }

    #[test]
    fn test_request_header_round_trip() {
        let headers = [
            RequestHeader::new("urn:a")
                .with_user_agent("ua")
                .with_developer_token("tok")
                .with_client_customer_id("123-456-7890"),
            RequestHeader::new("urn:b")
                .with_developer_token("other")
                .with_partial_failure(true),
            RequestHeader::new("urn:c"),
        ];

        for header in headers {
            let xml = build_request_envelope(&header, &SoapOperation::new("urn:x", "get")).unwrap();
            let parsed = parse_request_header(&xml).unwrap();
            assert_eq!(parsed, header);
        }
    }
}
