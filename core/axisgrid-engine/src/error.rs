//! Error types for the grid engine.

use std::fmt;
use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Caller contract violations.
///
/// Formatting, sorting, paging and selection absorb bad data locally and
/// never produce these; only operations that name a field, a page size or
/// a filter model the caller got wrong do.
#[derive(Debug, Error)]
pub enum GridError {
    /// A sort, column operation or filter names a field not in the schema.
    #[error("unknown column field: {0}")]
    UnknownField(String),

    /// Two schema entries share a field.
    #[error("duplicate column field: {0}")]
    DuplicateField(String),

    /// The filter model is structurally invalid. Every problem found is listed.
    #[error("invalid filter model: {}", join_violations(.0))]
    InvalidFilter(Vec<FilterViolation>),

    /// Page size is not one of the configured options.
    #[error("invalid page size {size}: expected one of {options:?}")]
    InvalidPageSize { size: usize, options: Vec<usize> },

    /// Grid configuration failed validation.
    #[error("invalid grid config: {0}")]
    InvalidConfig(String),

    /// A model value failed to decode.
    #[error("model error: {0}")]
    Model(axisgrid_model::Error),

    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<axisgrid_model::Error> for GridError {
    fn from(err: axisgrid_model::Error) -> Self {
        match err {
            axisgrid_model::Error::DuplicateField(field) => Self::DuplicateField(field),
            axisgrid_model::Error::Serialization(e) => Self::Serialization(e),
            other @ axisgrid_model::Error::InvalidViewId(_) => Self::Model(other),
        }
    }
}

/// One problem found in a filter model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterViolation {
    /// Field the clause is keyed on (empty when the model itself is malformed).
    pub field: String,
    /// Position within a condition list; `None` for a single condition.
    pub index: Option<usize>,
    pub reason: ViolationReason,
}

impl fmt::Display for FilterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]: {}", self.field, i, self.reason),
            None if self.field.is_empty() => write!(f, "{}", self.reason),
            None => write!(f, "{}: {}", self.field, self.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    NotAnObject,
    UnknownField,
    NotFilterable,
    EmptyConditionList,
    MalformedCondition,
    MissingOperator,
    UnknownOperator(String),
    MissingValue,
    InvalidValue(&'static str),
    InvalidJoin(String),
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("filter model must be an object"),
            Self::UnknownField => f.write_str("field is not in the column schema"),
            Self::NotFilterable => f.write_str("column is not filterable"),
            Self::EmptyConditionList => f.write_str("condition list is empty"),
            Self::MalformedCondition => f.write_str("condition must be an object"),
            Self::MissingOperator => f.write_str("missing \"type\""),
            Self::UnknownOperator(op) => write!(f, "unknown operator {op:?}"),
            Self::MissingValue => f.write_str("missing \"value\""),
            Self::InvalidValue(kind) => write!(f, "value must be a string or number, got {kind}"),
            Self::InvalidJoin(join) => write!(f, "join must be \"AND\" or \"OR\", got {join:?}"),
        }
    }
}

fn join_violations(violations: &[FilterViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
