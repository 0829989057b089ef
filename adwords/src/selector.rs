//! Selector and AWQL query bodies for `get` / `query` style operations

use adwsoap::{SoapError, XmlPayload, serde_element};
use serde::{Serialize, Serializer};
use xmltree::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    StartsWith,
    StartsWithIgnoreCase,
    Contains,
    ContainsIgnoreCase,
    DoesNotContain,
    DoesNotContainIgnoreCase,
    ContainsAny,
    ContainsAll,
    ContainsNone,
}

impl PredicateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateOperator::Equals => "EQUALS",
            PredicateOperator::NotEquals => "NOT_EQUALS",
            PredicateOperator::In => "IN",
            PredicateOperator::NotIn => "NOT_IN",
            PredicateOperator::GreaterThan => "GREATER_THAN",
            PredicateOperator::GreaterThanEquals => "GREATER_THAN_EQUALS",
            PredicateOperator::LessThan => "LESS_THAN",
            PredicateOperator::LessThanEquals => "LESS_THAN_EQUALS",
            PredicateOperator::StartsWith => "STARTS_WITH",
            PredicateOperator::StartsWithIgnoreCase => "STARTS_WITH_IGNORE_CASE",
            PredicateOperator::Contains => "CONTAINS",
            PredicateOperator::ContainsIgnoreCase => "CONTAINS_IGNORE_CASE",
            PredicateOperator::DoesNotContain => "DOES_NOT_CONTAIN",
            PredicateOperator::DoesNotContainIgnoreCase => "DOES_NOT_CONTAIN_IGNORE_CASE",
            PredicateOperator::ContainsAny => "CONTAINS_ANY",
            PredicateOperator::ContainsAll => "CONTAINS_ALL",
            PredicateOperator::ContainsNone => "CONTAINS_NONE",
        }
    }
}

impl Serialize for PredicateOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASCENDING",
            SortOrder::Descending => "DESCENDING",
        }
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inclusive date range, dates formatted `YYYYMMDD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub field: String,
    pub operator: PredicateOperator,
    pub values: Vec<String>,
}

impl Predicate {
    pub fn new<I, V>(field: impl Into<String>, operator: PredicateOperator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            field: field.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(rename = "sortOrder")]
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paging {
    #[serde(rename = "startIndex")]
    pub offset: i64,
    #[serde(rename = "numberResults")]
    pub limit: i64,
}

/// Declarative query for list-style operations
///
/// `element_name` is the name of the element the selector is rendered as,
/// e.g. `serviceSelector` for most `get` operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    #[serde(skip)]
    pub element_name: String,
    pub fields: Vec<String>,
    pub predicates: Vec<Predicate>,
    #[serde(rename = "dateRange", skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub ordering: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl Selector {
    const DEFAULT_ELEMENT: &'static str = "selector";

    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            ..Default::default()
        }
    }

    pub fn fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn date_range(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.date_range = Some(DateRange {
            min: min.into(),
            max: max.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, sort_order: SortOrder) -> Self {
        self.ordering.push(OrderBy {
            field: field.into(),
            sort_order,
        });
        self
    }

    pub fn paging(mut self, offset: i64, limit: i64) -> Self {
        self.paging = Some(Paging { offset, limit });
        self
    }

    fn element_name(&self) -> &str {
        if self.element_name.is_empty() {
            Self::DEFAULT_ELEMENT
        } else {
            &self.element_name
        }
    }
}

impl XmlPayload for Selector {
    fn to_element(&self) -> Result<Element, SoapError> {
        serde_element(self.element_name(), self)
    }
}

/// AWQL query body, rendered as `<{element_name}><query>…</query></…>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwqlQuery {
    #[serde(skip)]
    pub element_name: String,
    pub query: String,
}

impl AwqlQuery {
    pub fn new(element_name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            query: query.into(),
        }
    }
}

impl XmlPayload for AwqlQuery {
    fn to_element(&self) -> Result<Element, SoapError> {
        let name: &str = if self.element_name.is_empty() {
            "query"
        } else {
            &self.element_name
        };
        serde_element(name, self)
    }
}
