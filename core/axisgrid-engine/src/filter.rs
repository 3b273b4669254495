//! Filter model validation.
//!
//! The query layer receives filter models from the grid, but the grid never
//! evaluates them. What it does guarantee is that a model which leaves the
//! process is well-formed: known filterable fields, operators from the
//! closed set, and string or number operands. Every violation is reported;
//! nothing is silently dropped.

use axisgrid_model::{
    Column, FilterClause, FilterCondition, FilterModel, FilterOperator, FilterValue,
};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{FilterViolation, GridError, GridResult, ViolationReason};

/// Checks a typed filter model against the schema.
pub fn validate_filter_model(model: &FilterModel, columns: &[Column]) -> GridResult<()> {
    let mut violations = Vec::new();
    for (field, clause) in model.iter() {
        if let Some(reason) = field_violation(field, columns) {
            violations.push(violation(field, None, reason));
            continue;
        }
        let conditions = clause.conditions();
        if conditions.is_empty() {
            violations.push(violation(field, None, ViolationReason::EmptyConditionList));
        }
        for (i, condition) in conditions.iter().enumerate() {
            if let Some(reason) = typed_value_violation(condition) {
                violations.push(violation(field, is_list(clause).then_some(i), reason));
            }
        }
    }
    finish(violations)
}

/// Validates a filter model received as raw JSON and decodes it.
///
/// Use this at the boundary where the model arrives from a client or from
/// storage; unlike plain deserialization it reports every problem at once,
/// with the field and position of each.
pub fn parse_filter_model(raw: &Value, columns: &[Column]) -> GridResult<FilterModel> {
    let Some(object) = raw.as_object() else {
        warn!("Rejected filter model: not an object");
        return Err(GridError::InvalidFilter(vec![violation(
            "",
            None,
            ViolationReason::NotAnObject,
        )]));
    };

    let mut violations = Vec::new();
    for (field, clause) in object {
        if let Some(reason) = field_violation(field, columns) {
            violations.push(violation(field, None, reason));
            continue;
        }
        match clause {
            Value::Array(conditions) if conditions.is_empty() => {
                violations.push(violation(field, None, ViolationReason::EmptyConditionList));
            }
            Value::Array(conditions) => {
                for (i, condition) in conditions.iter().enumerate() {
                    if let Some(reason) = raw_condition_violation(condition) {
                        violations.push(violation(field, Some(i), reason));
                    }
                }
            }
            condition => {
                if let Some(reason) = raw_condition_violation(condition) {
                    violations.push(violation(field, None, reason));
                }
            }
        }
    }
    finish(violations)?;
    Ok(serde_json::from_value(raw.clone())?)
}

fn is_list(clause: &FilterClause) -> bool {
    matches!(clause, FilterClause::Many(_))
}

fn field_violation(field: &str, columns: &[Column]) -> Option<ViolationReason> {
    match columns.iter().find(|c| c.field == field) {
        None => Some(ViolationReason::UnknownField),
        Some(c) if !c.filterable => Some(ViolationReason::NotFilterable),
        Some(_) => None,
    }
}

fn typed_value_violation(condition: &FilterCondition) -> Option<ViolationReason> {
    match condition.value {
        FilterValue::Number(x) if !x.is_finite() => {
            Some(ViolationReason::InvalidValue("non-finite number"))
        }
        _ => None,
    }
}

fn raw_condition_violation(condition: &Value) -> Option<ViolationReason> {
    let Some(object) = condition.as_object() else {
        return Some(ViolationReason::MalformedCondition);
    };
    operator_violation(object)
        .or_else(|| value_violation(object))
        .or_else(|| join_violation(object))
}

fn operator_violation(object: &Map<String, Value>) -> Option<ViolationReason> {
    match object.get("type") {
        None => Some(ViolationReason::MissingOperator),
        Some(Value::String(op)) => op
            .parse::<FilterOperator>()
            .err()
            .map(ViolationReason::UnknownOperator),
        Some(other) => Some(ViolationReason::UnknownOperator(other.to_string())),
    }
}

fn value_violation(object: &Map<String, Value>) -> Option<ViolationReason> {
    match object.get("value") {
        None => Some(ViolationReason::MissingValue),
        Some(Value::String(_) | Value::Number(_)) => None,
        Some(Value::Bool(_)) => Some(ViolationReason::InvalidValue("boolean")),
        Some(Value::Null) => Some(ViolationReason::InvalidValue("null")),
        Some(Value::Array(_)) => Some(ViolationReason::InvalidValue("array")),
        Some(Value::Object(_)) => Some(ViolationReason::InvalidValue("object")),
    }
}

fn join_violation(object: &Map<String, Value>) -> Option<ViolationReason> {
    match object.get("operator") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s == "AND" || s == "OR" => None,
        Some(Value::String(s)) => Some(ViolationReason::InvalidJoin(s.clone())),
        Some(other) => Some(ViolationReason::InvalidJoin(other.to_string())),
    }
}

fn violation(field: &str, index: Option<usize>, reason: ViolationReason) -> FilterViolation {
    FilterViolation {
        field: field.to_string(),
        index,
        reason,
    }
}

fn finish(violations: Vec<FilterViolation>) -> GridResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    warn!(count = violations.len(), "Rejected filter model");
    Err(GridError::InvalidFilter(violations))
}
