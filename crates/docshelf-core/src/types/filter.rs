//! Equality filters for table-store queries.

use serde::{Deserialize, Serialize};

/// A filter value. Serialized untagged so it compares directly against
/// JSON row values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
}

impl FilterValue {
    /// Render the value the way it appears in a REST query string.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }

    /// Whether a JSON row value equals this filter value.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (Self::String(s), serde_json::Value::String(v)) => s == v,
            (Self::Integer(i), serde_json::Value::Number(n)) => n.as_i64() == Some(*i),
            (Self::Boolean(b), serde_json::Value::Bool(v)) => b == v,
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<uuid::Uuid> for FilterValue {
    fn from(value: uuid::Uuid) -> Self {
        Self::String(value.to_string())
    }
}

/// A single equality condition on a named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column name.
    pub field: String,
    /// The value the column must equal.
    pub value: FilterValue,
}

impl FilterField {
    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether a JSON row satisfies this condition.
    pub fn matches(&self, row: &serde_json::Map<String, serde_json::Value>) -> bool {
        row.get(&self.field)
            .is_some_and(|value| self.value.matches(value))
    }
}
