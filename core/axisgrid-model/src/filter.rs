//! Declarative filter contract handed to the query layer.
//!
//! The grid never evaluates these conditions; it only checks their shape
//! before they leave the process (see the engine's filter validation).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 12] = [
        Self::Contains,
        Self::NotContains,
        Self::Equals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterThanOrEqual,
        Self::LessThanOrEqual,
        Self::StartsWith,
        Self::EndsWith,
        Self::IsEmpty,
        Self::IsNotEmpty,
    ];

    /// Wire name, as used in serialized filter models.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A filter operand. Booleans and nulls are deliberately not representable:
/// boolean columns filter through checkboxes and empty inputs are `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// How a condition joins the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterJoin {
    And,
    Or,
}

/// One condition on one field.
///
/// Serialized as `{"type": "contains", "value": "acme", "operator": "AND"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    #[serde(rename = "type")]
    pub kind: FilterOperator,
    pub value: FilterValue,
    #[serde(rename = "operator", default, skip_serializing_if = "Option::is_none")]
    pub join: Option<FilterJoin>,
}

impl FilterCondition {
    pub fn new(kind: FilterOperator, value: impl Into<FilterValue>) -> Self {
        Self {
            kind,
            value: value.into(),
            join: None,
        }
    }

    #[must_use]
    pub fn joined(mut self, join: FilterJoin) -> Self {
        self.join = Some(join);
        self
    }
}

/// Either one condition or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterClause {
    Single(FilterCondition),
    Many(Vec<FilterCondition>),
}

impl FilterClause {
    #[must_use]
    pub fn conditions(&self) -> &[FilterCondition] {
        match self {
            Self::Single(condition) => std::slice::from_ref(condition),
            Self::Many(conditions) => conditions,
        }
    }
}

impl From<FilterCondition> for FilterClause {
    fn from(condition: FilterCondition) -> Self {
        Self::Single(condition)
    }
}

impl From<Vec<FilterCondition>> for FilterClause {
    fn from(conditions: Vec<FilterCondition>) -> Self {
        Self::Many(conditions)
    }
}

/// Field → conditions. Ordered by field so serialized models are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterModel(BTreeMap<String, FilterClause>);

impl FilterModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: &str, clause: impl Into<FilterClause>) -> Self {
        self.insert(field, clause);
        self
    }

    pub fn insert(&mut self, field: &str, clause: impl Into<FilterClause>) {
        self.0.insert(field.into(), clause.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FilterClause> {
        self.0.remove(field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FilterClause> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterClause)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
