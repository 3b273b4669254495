use axisgrid_cli::{Actions, Input, ViewReport, drive, load_filter_model, parse_sort, render_page};
use axisgrid_model::SortModel;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    columns: PathBuf,
    rows: PathBuf,
    config: PathBuf,
}

fn fixture(rows: serde_json::Value) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let columns = dir.path().join("columns.json");
    let rows_path = dir.path().join("rows.json");
    let config = dir.path().join("grid.toml");
    fs::write(
        &columns,
        json!([
            {"field": "client", "header": "Client"},
            {"field": "events", "header": "Events", "type": "number"}
        ])
        .to_string(),
    )
    .unwrap();
    fs::write(&rows_path, rows.to_string()).unwrap();
    fs::write(&config, "page_size_options = [2, 10]\ndefault_page_size = 2\n").unwrap();
    Fixture {
        _dir: dir,
        columns,
        rows: rows_path,
        config,
    }
}

fn three_clients() -> serde_json::Value {
    json!([
        {"id": 1, "client": "Acme", "events": 1200},
        {"id": 2, "client": "Globex", "events": 5},
        {"id": 3, "client": "Initech", "events": null}
    ])
}

fn load(f: &Fixture) -> Input {
    Input::load(&f.columns, &f.rows, Some(&f.config)).unwrap()
}

// ── Sort argument ────────────────────────────────────────────────

#[test]
fn sort_argument_forms() {
    assert_eq!(parse_sort("events").unwrap(), SortModel::asc("events"));
    assert_eq!(parse_sort("events:asc").unwrap(), SortModel::asc("events"));
    assert_eq!(parse_sort("events:desc").unwrap(), SortModel::desc("events"));
    assert!(parse_sort("events:down").is_err());
    assert!(parse_sort(":desc").is_err());
}

// ── Loading ──────────────────────────────────────────────────────

#[test]
fn load_reads_all_three_files() {
    let f = fixture(three_clients());
    let input = load(&f);
    assert_eq!(input.columns.len(), 2);
    assert_eq!(input.rows.len(), 3);
    assert_eq!(input.config.default_page_size, 2);
}

#[test]
fn load_without_config_uses_defaults() {
    let f = fixture(three_clients());
    let input = Input::load(&f.columns, &f.rows, None).unwrap();
    assert_eq!(input.config.default_page_size, 50);
}

#[test]
fn load_reports_missing_files() {
    let f = fixture(three_clients());
    let err = Input::load(&f.columns, &f.rows.with_extension("missing"), None).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read rows file"));
}

#[test]
fn load_rejects_rows_that_are_not_objects() {
    let f = fixture(json!([1, 2, 3]));
    let err = Input::load(&f.columns, &f.rows, None).unwrap_err();
    assert_eq!(err.to_string(), "Rows must be a JSON array of objects");
}

// ── Rendering ────────────────────────────────────────────────────

#[test]
fn renders_first_page_table() {
    let f = fixture(three_clients());
    let input = load(&f);
    let grid = input.grid();
    let state = drive(&grid, &Actions::default()).unwrap();
    let out = render_page(&grid.view(&state), &input.config);
    assert_eq!(
        out,
        "[ ] Client  Events\n\
         \x20   ------  ------\n\
         [ ] Acme     1.2K\n\
         [ ] Globex    5\n\
         \n\
         1 - 2 of 3 rows\n\
         Page 1 of 2  [1] 2 >\n"
    );
}

#[test]
fn renders_selection_markers_and_count() {
    let f = fixture(three_clients());
    let input = load(&f);
    let grid = input.grid();
    let actions = Actions {
        select: vec!["2".into()],
        ..Actions::default()
    };
    let state = drive(&grid, &actions).unwrap();
    let out = render_page(&grid.view(&state), &input.config);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "[ ] Client  Events");
    assert_eq!(lines[3], "[x] Globex    5");
    assert_eq!(lines.last().copied(), Some("1 selected"));
}

#[test]
fn renders_sorted_second_page() {
    let f = fixture(three_clients());
    let input = load(&f);
    let grid = input.grid();
    let actions = Actions {
        sort: Some(SortModel::desc("events")),
        page: Some(2),
        ..Actions::default()
    };
    let state = drive(&grid, &actions).unwrap();
    let out = render_page(&grid.view(&state), &input.config);
    assert!(out.contains("[ ] Globex"));
    assert!(out.contains("3 - 3 of 3 rows"));
    assert!(out.contains("Page 2 of 2  < 1 [2]"));
}

#[test]
fn renders_empty_message() {
    let f = fixture(json!([]));
    let input = load(&f);
    let grid = input.grid();
    let state = drive(&grid, &Actions::default()).unwrap();
    assert_eq!(render_page(&grid.view(&state), &input.config), "No data found\n");
}

#[test]
fn select_page_marks_every_visible_row() {
    let f = fixture(three_clients());
    let input = load(&f);
    let grid = input.grid();
    let actions = Actions {
        select_page: true,
        ..Actions::default()
    };
    let state = drive(&grid, &actions).unwrap();
    let report = ViewReport::new(&grid.view(&state));
    assert_eq!(report.selected_keys, vec!["1", "2"]);
    assert!(report.is_all_selected_on_page);
    assert_eq!(report.cells, vec![vec!["Acme", "1.2K"], vec!["Globex", "5"]]);
}

#[test]
fn invalid_page_size_fails() {
    let f = fixture(three_clients());
    let input = load(&f);
    let grid = input.grid();
    let actions = Actions {
        page_size: Some(7),
        ..Actions::default()
    };
    assert!(drive(&grid, &actions).is_err());
}

// ── Filters ──────────────────────────────────────────────────────

#[test]
fn filter_file_is_validated() {
    let f = fixture(three_clients());
    let input = load(&f);
    let path = f.columns.with_file_name("filters.json");

    fs::write(&path, r#"{"client": {"type": "contains", "value": "ac"}}"#).unwrap();
    let model = load_filter_model(&path, &input.columns).unwrap();
    assert_eq!(model.len(), 1);

    fs::write(&path, r#"{"client": {"type": "like", "value": "ac"}, "ghost": {"type": "equals", "value": 1}}"#).unwrap();
    let err = load_filter_model(&path, &input.columns).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid filter model:\n  client: unknown operator \"like\"\n  ghost: field is not in the column schema"
    );
}
