//! Grid configuration: row identity, page sizes and feature switches.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Page sizes offered by the rows-per-page selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [25, 50, 100, 250];

/// Caller-supplied grid configuration.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```toml
/// row_key = "client"
/// default_page_size = 25
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Row field used as selection identity.
    #[serde(default = "default_row_key")]
    pub row_key: String,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Header activation cycles the sort when true.
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// When false the whole dataset is one page.
    #[serde(default = "default_true")]
    pub paginated: bool,
    /// Maximum number of page buttons in the page window.
    #[serde(default = "default_page_button_count")]
    pub page_button_count: usize,
    /// Noun used in the "1 - 50 of 120 rows" summary.
    #[serde(default = "default_row_label")]
    pub row_label: String,
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_row_key() -> String {
    "id".to_string()
}

fn default_page_size_options() -> Vec<usize> {
    DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

fn default_page_size() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_page_button_count() -> usize {
    7
}

fn default_row_label() -> String {
    "rows".to_string()
}

fn default_empty_message() -> String {
    "No data found".to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_key: default_row_key(),
            page_size_options: default_page_size_options(),
            default_page_size: default_page_size(),
            sortable: true,
            selectable: true,
            paginated: true,
            page_button_count: default_page_button_count(),
            row_label: default_row_label(),
            empty_message: default_empty_message(),
        }
    }
}

impl GridConfig {
    /// Default config with a different row key.
    pub fn with_row_key(row_key: &str) -> Self {
        Self {
            row_key: row_key.to_string(),
            ..Self::default()
        }
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(s: &str) -> GridResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.row_key.is_empty() {
            return Err(GridError::InvalidConfig("row_key must not be empty".into()));
        }
        if self.page_size_options.is_empty() {
            return Err(GridError::InvalidConfig(
                "page_size_options must not be empty".into(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(GridError::InvalidConfig(
                "page_size_options must be positive".into(),
            ));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(GridError::InvalidPageSize {
                size: self.default_page_size,
                options: self.page_size_options.clone(),
            });
        }
        if self.page_button_count == 0 {
            return Err(GridError::InvalidConfig(
                "page_button_count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Checks a requested page size against the option list.
    pub fn check_page_size(&self, size: usize) -> GridResult<usize> {
        if self.page_size_options.contains(&size) {
            Ok(size)
        } else {
            Err(GridError::InvalidPageSize {
                size,
                options: self.page_size_options.clone(),
            })
        }
    }
}
