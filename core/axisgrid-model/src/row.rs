use serde_json::{Map, Value};

/// One record of the dataset: an open field → value mapping.
///
/// The grid only needs the fields named by the schema and the configured
/// row key to be present; everything else is carried through untouched.
pub type Row = Map<String, Value>;

/// Looks up a field, treating an explicit JSON `null` the same as a
/// missing key.
#[must_use]
pub fn field_value<'a>(row: &'a Row, field: &str) -> Option<&'a Value> {
    row.get(field).filter(|v| !v.is_null())
}
