use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Error, Result};

/// Minimum width applied when a column does not declare one.
pub const DEFAULT_MIN_WIDTH: u32 = 50;

/// Describes one field of a row: how it is labelled, formatted and sized,
/// and which interactions it allows.
///
/// The JSON representation uses the dashboard's camelCase keys
/// (`minWidth`, `rangeFormat`, `type`) so schemas can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Key into the row. Unique within a schema.
    pub field: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Only meaningful when `column_type` is `Composite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<CompositeFormat>,
    /// Only meaningful when `column_type` is `Range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_format: Option<RangeFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<PinSide>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

fn default_true() -> bool {
    true
}

impl Column {
    /// Creates a column with every flag at its default.
    pub fn new(field: &str, header: &str, column_type: ColumnType) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            tooltip: None,
            column_type,
            format: None,
            range_format: None,
            width: None,
            min_width: None,
            max_width: None,
            pinned: None,
            sortable: true,
            filterable: true,
            resizable: true,
            hidden: false,
            align: None,
        }
    }

    /// Shorthand for a plain text column.
    pub fn text(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Text)
    }

    /// Shorthand for a compact-notation number column.
    pub fn number(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Number)
    }

    /// Shorthand for a dollar amount column.
    pub fn currency(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Currency)
    }

    /// Shorthand for a percentage column.
    pub fn percentage(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Percentage)
    }

    /// Shorthand for a date column.
    pub fn date(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Date)
    }

    /// Shorthand for a Yes/No column.
    pub fn boolean(field: &str, header: &str) -> Self {
        Self::new(field, header, ColumnType::Boolean)
    }

    /// Shorthand for a primary value with an optional secondary annotation.
    pub fn composite(field: &str, header: &str, format: CompositeFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::new(field, header, ColumnType::Composite)
        }
    }

    /// Shorthand for a min/max pair read from two other row fields.
    pub fn range(field: &str, header: &str, range_format: RangeFormat) -> Self {
        Self {
            range_format: Some(range_format),
            ..Self::new(field, header, ColumnType::Range)
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min_width: Option<u32>, max_width: Option<u32>) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    #[must_use]
    pub fn aligned(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub fn pinned_to(mut self, side: PinSide) -> Self {
        self.pinned = Some(side);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    #[must_use]
    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    #[must_use]
    pub fn fixed_width(mut self) -> Self {
        self.resizable = false;
        self
    }

    /// Alignment to render with: the explicit one, else center for every
    /// non-text type.
    #[must_use]
    pub fn effective_align(&self) -> Align {
        match self.align {
            Some(align) => align,
            None if self.column_type == ColumnType::Text => Align::Left,
            None => Align::Center,
        }
    }

    /// Lower resize bound, falling back to [`DEFAULT_MIN_WIDTH`].
    #[must_use]
    pub fn effective_min_width(&self) -> u32 {
        self.min_width.unwrap_or(DEFAULT_MIN_WIDTH)
    }

    /// Clamps a requested width into this column's `[min, max]` bounds.
    #[must_use]
    pub fn clamp_width(&self, width: u32) -> u32 {
        let min = self.effective_min_width();
        let clamped = width.max(min);
        match self.max_width {
            Some(max) if max >= min => clamped.min(max),
            _ => clamped,
        }
    }
}

/// The display type of a column. Each variant has exactly one formatting
/// strategy in the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Currency,
    Percentage,
    Date,
    Boolean,
    Composite,
    Range,
}

impl ColumnType {
    /// Number, currency and percentage share numeric coercion and the
    /// em-dash fallback for non-numeric input.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency | Self::Percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Which edge a column is pinned to. Unpinned is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
}

/// Format of a composite column: a primary number with an optional
/// annotation pulled from another field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFormat {
    pub primary: PrimaryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryValue>,
}

impl CompositeFormat {
    pub fn primary(primary: PrimaryType) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: SecondaryValue) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryType {
    Number,
    Currency,
    Percentage,
}

impl From<PrimaryType> for ColumnType {
    fn from(primary: PrimaryType) -> Self {
        match primary {
            PrimaryType::Number => ColumnType::Number,
            PrimaryType::Currency => ColumnType::Currency,
            PrimaryType::Percentage => ColumnType::Percentage,
        }
    }
}

/// The annotation shown after a composite column's primary value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryValue {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: SecondaryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl SecondaryValue {
    pub fn new(field: &str, kind: SecondaryKind) -> Self {
        Self {
            field: field.into(),
            kind,
            prefix: None,
            suffix: None,
        }
    }

    /// Text before the secondary value, `(` unless configured.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("(")
    }

    /// Text after the secondary value, `)` unless configured.
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryKind {
    Percentage,
    Change,
    Multiplier,
}

/// Format of a range column. The pair is read from `min_field`/`max_field`,
/// not from the column's own field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFormat {
    pub unit_type: RangeUnit,
    pub min_field: String,
    pub max_field: String,
    /// Boolean row field; when true the cell shows "Unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unknown_field: Option<String>,
}

impl RangeFormat {
    pub fn new(unit_type: RangeUnit, min_field: &str, max_field: &str) -> Self {
        Self {
            unit_type,
            min_field: min_field.into(),
            max_field: max_field.into(),
            is_unknown_field: None,
        }
    }

    #[must_use]
    pub fn with_unknown_flag(mut self, field: &str) -> Self {
        self.is_unknown_field = Some(field.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeUnit {
    Dollars,
    Years,
    Sqft,
    Acres,
}

/// A column schema whose fields are known to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnSet(Vec<Column>);

impl ColumnSet {
    /// Validates field uniqueness.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.field.as_str()) {
                return Err(Error::DuplicateField(column.field.clone()));
            }
        }
        Ok(Self(columns))
    }

    /// Parses and validates a JSON array of columns.
    pub fn from_json(json: &str) -> Result<Self> {
        let columns: Vec<Column> = serde_json::from_str(json)?;
        Self::new(columns)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Column> {
        self.0.iter().find(|c| c.field == field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Column] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.field.as_str())
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Column> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
