//! Loading, driving and text rendering for the `axisgrid` command.

use anyhow::{Context, Result, bail};
use axisgrid_engine::{
    Grid, GridConfig, GridError, GridResult, GridState, GridView, PaginationSummary, RowKey,
    parse_filter_model,
};
use axisgrid_model::{Align, ColumnSet, FilterModel, Row, SortModel, SortOrder};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::{debug, warn};

/// Everything a grid needs, loaded from disk.
#[derive(Debug, Clone)]
pub struct Input {
    pub columns: ColumnSet,
    pub rows: Vec<Row>,
    pub config: GridConfig,
}

impl Input {
    /// Reads a JSON column schema, a JSON array of row objects and an
    /// optional TOML grid config.
    pub fn load(columns: &Path, rows: &Path, config: Option<&Path>) -> Result<Self> {
        let text = fs::read_to_string(columns)
            .with_context(|| format!("Failed to read columns file {}", columns.display()))?;
        let columns = ColumnSet::from_json(&text).context("Failed to parse column schema")?;

        let text = fs::read_to_string(rows)
            .with_context(|| format!("Failed to read rows file {}", rows.display()))?;
        let rows: Vec<Row> = serde_json::from_str(&text).context("Rows must be a JSON array of objects")?;

        let config = match config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                GridConfig::from_toml_str(&text).context("Invalid grid config")?
            }
            None => GridConfig::default(),
        };

        debug!(columns = columns.len(), rows = rows.len(), "Loaded grid input");
        Ok(Self {
            columns,
            rows,
            config,
        })
    }

    pub fn grid(&self) -> Grid<'_> {
        Grid::new(&self.config, &self.columns, &self.rows)
    }
}

/// Parses `field`, `field:asc` or `field:desc`.
pub fn parse_sort(s: &str) -> std::result::Result<SortModel, String> {
    let (field, order) = match s.split_once(':') {
        Some((field, "asc")) => (field, SortOrder::Asc),
        Some((field, "desc")) => (field, SortOrder::Desc),
        Some((_, other)) => return Err(format!("unknown sort order {other:?}, use asc or desc")),
        None => (s, SortOrder::Asc),
    };
    if field.is_empty() {
        return Err("sort field must not be empty".to_string());
    }
    Ok(SortModel {
        field: field.to_string(),
        order,
    })
}

/// User actions given on the command line, applied in a fixed order:
/// page size, sort, selection, then page.
#[derive(Debug, Clone, Default)]
pub struct Actions {
    pub page_size: Option<usize>,
    pub sort: Option<SortModel>,
    pub select: Vec<String>,
    pub select_page: bool,
    pub page: Option<usize>,
}

/// Runs `actions` through the state transitions, starting from the
/// grid's initial state.
pub fn drive(grid: &Grid<'_>, actions: &Actions) -> GridResult<GridState> {
    let config = grid.config();
    let mut state = grid.initial_state();
    if let Some(size) = actions.page_size {
        state = state.set_page_size(size, config)?;
    }
    if let Some(sort) = &actions.sort {
        state = state.set_sort(Some(sort.clone()), grid.columns())?;
    }
    for key in &actions.select {
        let key = RowKey::from(key.as_str());
        match grid.rows().iter().find(|row| RowKey::of(row, &config.row_key) == key) {
            Some(row) => state = state.toggle_row(row, config),
            None => warn!(key = %key, "No row with this key"),
        }
    }
    if let Some(page) = actions.page {
        state = grid.goto_page(state, page);
    }
    if actions.select_page {
        state = grid.toggle_select_all_on_page(state);
    }
    Ok(state)
}

/// Plain-text table of the visible page followed by the pager and
/// selection lines.
pub fn render_page(view: &GridView<'_>, config: &GridConfig) -> String {
    let mut out = String::new();
    if view.is_empty() {
        out.push_str(&config.empty_message);
        out.push('\n');
        return out;
    }

    let headers: Vec<String> = view.visible_columns.iter().map(|c| c.header.clone()).collect();
    let cells = view.cells();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let aligns: Vec<Align> = view.visible_columns.iter().map(|c| c.effective_align()).collect();

    let marker = |selected: bool| if selected { "[x] " } else { "[ ] " };
    if config.selectable {
        out.push_str(marker(view.selection.is_all_selected_on_page));
    }
    let header_aligns = vec![Align::Left; headers.len()];
    push_line(&mut out, &headers, &widths, &header_aligns);
    if config.selectable {
        out.push_str("    ");
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths, &aligns);

    for (row, line) in view.page_rows.iter().zip(&cells) {
        if config.selectable {
            let selected = view
                .selection
                .selected_keys
                .contains(&RowKey::of(row, &config.row_key));
            out.push_str(marker(selected));
        }
        push_line(&mut out, line, &widths, &aligns);
    }

    let p = &view.pagination;
    out.push('\n');
    out.push_str(&format!(
        "{} - {} of {} {}\n",
        p.start_row, p.end_row, p.total_rows, config.row_label
    ));
    if config.paginated {
        out.push_str(&format!(
            "Page {} of {}  {}\n",
            p.current_page,
            p.total_pages,
            page_buttons(view)
        ));
    }
    if config.selectable && !view.selection.selected_keys.is_empty() {
        out.push_str(&format!(
            "{} selected\n",
            view.selection.selected_keys.len()
        ));
    }
    out
}

fn page_buttons(view: &GridView<'_>) -> String {
    let mut parts = Vec::with_capacity(view.page_numbers.len() + 2);
    if view.has_previous {
        parts.push("<".to_string());
    }
    for n in &view.page_numbers {
        if *n == view.pagination.current_page {
            parts.push(format!("[{n}]"));
        } else {
            parts.push(n.to_string());
        }
    }
    if view.has_next {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], aligns: &[Align]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(aligns)
        .map(|((cell, width), align)| pad(cell, *width, *align))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    match align {
        Align::Left => format!("{cell}{}", " ".repeat(fill)),
        Align::Right => format!("{}{cell}", " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

/// Machine-readable form of a view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport {
    pub headers: Vec<String>,
    pub cells: Vec<Vec<String>>,
    pub pagination: PaginationSummary,
    pub page_numbers: Vec<usize>,
    pub selected_keys: Vec<String>,
    pub is_all_selected_on_page: bool,
    pub is_some_selected_on_page: bool,
}

impl ViewReport {
    pub fn new(view: &GridView<'_>) -> Self {
        Self {
            headers: view.visible_columns.iter().map(|c| c.header.clone()).collect(),
            cells: view.cells(),
            pagination: view.pagination,
            page_numbers: view.page_numbers.clone(),
            selected_keys: view
                .selection
                .selected_keys
                .iter()
                .map(|k| k.to_string())
                .collect(),
            is_all_selected_on_page: view.selection.is_all_selected_on_page,
            is_some_selected_on_page: view.selection.is_some_selected_on_page,
        }
    }
}

/// Reads a filter model file and validates it against the schema.
pub fn load_filter_model(path: &Path, columns: &ColumnSet) -> Result<FilterModel> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter file {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text).context("Filter file is not JSON")?;
    match parse_filter_model(&raw, columns.as_slice()) {
        Ok(model) => Ok(model),
        Err(GridError::InvalidFilter(violations)) => {
            let lines: Vec<String> = violations.iter().map(|v| format!("  {v}")).collect();
            bail!("Invalid filter model:\n{}", lines.join("\n"))
        }
        Err(e) => Err(e.into()),
    }
}
