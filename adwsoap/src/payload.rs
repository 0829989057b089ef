//! Corps d'opération SOAP

use crate::SoapError;
use serde::Serialize;
use xmltree::{Element, XMLNode};

/// Tout ce qui peut être rendu en fragment XML et placé dans `soap:Body`
pub trait XmlPayload {
    fn to_element(&self) -> Result<Element, SoapError>;
}

impl XmlPayload for Element {
    fn to_element(&self) -> Result<Element, SoapError> {
        Ok(self.clone())
    }
}

impl<T: XmlPayload + ?Sized> XmlPayload for &T {
    fn to_element(&self) -> Result<Element, SoapError> {
        (**self).to_element()
    }
}

/// Rend une valeur `serde` en élément XML nommé `root`
///
/// Le fragment produit par quick-xml est relu avec xmltree ; les
/// informations de namespace sont effacées pour que l'élément hérite du
/// namespace par défaut de son parent une fois inséré.
pub fn serde_element<T: Serialize + ?Sized>(root: &str, value: &T) -> Result<Element, SoapError> {
    let xml = quick_xml::se::to_string_with_root(root, value).map_err(SoapError::serialize)?;
    let mut element = Element::parse(xml.as_bytes())?;
    clear_namespaces(&mut element);
    Ok(element)
}

fn clear_namespaces(element: &mut Element) {
    element.namespace = None;
    element.namespaces = None;
    for child in element.children.iter_mut() {
        if let XMLNode::Element(elem) = child {
            clear_namespaces(elem);
        }
    }
}

/// Élément d'opération, par ex. `<get xmlns="…/cm/v201603">…</get>`
#[derive(Debug, Clone)]
pub struct SoapOperation {
    pub name: String,
    pub namespace: String,
    pub parts: Vec<Element>,
}

impl SoapOperation {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            parts: Vec::new(),
        }
    }

    /// Ajoute un argument rendu par un autre payload
    pub fn part<P: XmlPayload + ?Sized>(mut self, payload: &P) -> Result<Self, SoapError> {
        self.parts.push(payload.to_element()?);
        Ok(self)
    }

    /// Ajoute un argument texte simple (`<name>value</name>`)
    pub fn text_part(mut self, name: &str, value: impl Into<String>) -> Self {
        let mut child = Element::new(name);
        child.children.push(XMLNode::Text(value.into()));
        self.parts.push(child);
        self
    }
}

impl XmlPayload for SoapOperation {
    fn to_element(&self) -> Result<Element, SoapError> {
        let mut element = Element::new(&self.name);
        if !self.namespace.is_empty() {
            element
                .attributes
                .insert("xmlns".to_string(), self.namespace.clone());
        }
        for part in &self.parts {
            element.children.push(XMLNode::Element(part.clone()));
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Lookup {
        #[serde(rename = "id")]
        ids: Vec<String>,
        #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    }

    #[test]
    fn test_serde_element_repeats_sequences() {
        let lookup = Lookup {
            ids: vec!["1".to_string(), "2".to_string()],
            limit: None,
        };

        let elem = serde_element("lookup", &lookup).unwrap();
        assert_eq!(elem.name, "lookup");

        let ids: Vec<String> = elem
            .children
            .iter()
            .filter_map(|n| n.as_element())
            .filter(|e| e.name == "id")
            .map(|e| e.get_text().unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(elem.get_child("limit").is_none());
    }

    #[test]
    fn test_operation_wraps_parts() {
        let op = SoapOperation::new("urn:test", "get")
            .text_part("query", "SELECT Id")
            .part(&Element::new("extra"))
            .unwrap();

        let elem = op.to_element().unwrap();
        assert_eq!(elem.name, "get");
        assert_eq!(elem.attributes.get("xmlns").map(String::as_str), Some("urn:test"));
        assert_eq!(
            elem.get_child("query").and_then(|q| q.get_text()).as_deref(),
            Some("SELECT Id")
        );
        assert!(elem.get_child("extra").is_some());
    }
}
