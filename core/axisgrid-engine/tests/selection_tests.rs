use axisgrid_engine::{PageSelection, RowKey, Selection, SelectionSummary};
use axisgrid_model::Row;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::BTreeSet;

fn rows(values: Value) -> Vec<Row> {
    serde_json::from_value(values).unwrap()
}

fn four_rows() -> Vec<Row> {
    rows(json!([
        {"id": 1, "client": "Acme"},
        {"id": 2, "client": "Globex"},
        {"id": 3, "client": "Initech"},
        {"id": 4, "client": "Umbrella"},
    ]))
}

// ── Row keys ─────────────────────────────────────────────────────

#[test]
fn numeric_and_string_keys_normalize_to_the_same_key() {
    let numeric = rows(json!([{"id": 1}]));
    let text = rows(json!([{"id": "1"}]));
    assert_eq!(RowKey::of(&numeric[0], "id"), RowKey::of(&text[0], "id"));
    assert_eq!(RowKey::of(&numeric[0], "id"), RowKey::from(1));
}

#[test]
fn missing_key_falls_back_to_row_content() {
    let data = rows(json!([{"client": "Acme"}, {"client": "Globex"}]));
    let a = RowKey::of(&data[0], "id");
    let b = RowKey::of(&data[1], "id");
    assert_ne!(a, b);
    assert_eq!(a.as_str(), r#"{"client":"Acme"}"#);
}

#[test]
fn non_primitive_key_falls_back_to_row_content() {
    let data = rows(json!([{"id": {"nested": 1}}]));
    assert_eq!(RowKey::of(&data[0], "id").as_str(), r#"{"id":{"nested":1}}"#);
}

#[test]
fn custom_key_field() {
    let data = rows(json!([{"client": "Acme", "id": 9}]));
    assert_eq!(RowKey::of(&data[0], "client"), RowKey::from("Acme"));
}

// ── Toggling ─────────────────────────────────────────────────────

#[test]
fn toggle_adds_then_removes() {
    let data = four_rows();
    let s = Selection::new().toggle_row(&data[0], "id");
    assert!(s.is_selected(&data[0], "id"));
    assert_eq!(s.len(), 1);
    let s = s.toggle_row(&data[0], "id");
    assert!(s.is_empty());
}

#[test]
fn transitions_do_not_mutate_the_original() {
    let data = four_rows();
    let before = Selection::new().toggle_row(&data[0], "id");
    let _after = before.toggle_row(&data[1], "id");
    assert_eq!(before.len(), 1);
}

#[test]
fn colliding_keys_select_together() {
    let data = rows(json!([{"id": 1, "n": "a"}, {"id": "1", "n": "b"}]));
    let s = Selection::new().toggle_row(&data[0], "id");
    assert!(s.is_selected(&data[1], "id"));
    assert_eq!(s.selected_rows(&data, "id").len(), 2);
}

// ── Select-all on page ───────────────────────────────────────────

#[test]
fn select_all_only_touches_visible_page() {
    let data = four_rows();
    let page: Vec<&Row> = data[..2].iter().collect();
    let s = Selection::new().toggle_page(&page, "id");
    let expected: BTreeSet<RowKey> = [RowKey::from(1), RowKey::from(2)].into_iter().collect();
    assert_eq!(s.keys(), &expected);
}

#[test]
fn select_all_when_all_selected_deselects_page_only() {
    let data = four_rows();
    let page: Vec<&Row> = data[..2].iter().collect();
    let s = Selection::from_keys([RowKey::from(1), RowKey::from(2), RowKey::from(4)]);
    let s = s.toggle_page(&page, "id");
    let expected: BTreeSet<RowKey> = [RowKey::from(4)].into_iter().collect();
    assert_eq!(s.keys(), &expected);
}

#[test]
fn select_all_with_partial_page_selects_the_rest() {
    let data = four_rows();
    let page: Vec<&Row> = data[..2].iter().collect();
    let s = Selection::from_keys([RowKey::from(2)]).toggle_page(&page, "id");
    assert_eq!(s.len(), 2);
    assert_eq!(s.page_status(&page, "id"), PageSelection::Full);
}

#[test]
fn page_status_flags() {
    let data = four_rows();
    let page: Vec<&Row> = data[..2].iter().collect();

    let none = Selection::new().page_status(&page, "id");
    assert_eq!(none, PageSelection::Empty);
    assert!(!none.is_all_selected());
    assert!(!none.is_some_selected());

    let some = Selection::from_keys([RowKey::from(1)]).page_status(&page, "id");
    assert_eq!(some, PageSelection::Partial);
    assert!(some.is_some_selected());
    assert!(!some.is_all_selected());

    let all = Selection::from_keys([RowKey::from(1), RowKey::from(2)]).page_status(&page, "id");
    assert!(all.is_all_selected());
    assert!(!all.is_some_selected());
}

#[test]
fn empty_page_is_never_all_selected() {
    let s = Selection::from_keys([RowKey::from(1)]);
    assert_eq!(s.page_status(&[], "id"), PageSelection::Empty);
}

#[test]
fn select_all_on_empty_page_is_a_no_op() {
    let s = Selection::from_keys([RowKey::from(1)]);
    assert_eq!(s.toggle_page(&[], "id"), s);
}

// ── Derived rows ─────────────────────────────────────────────────

#[test]
fn selected_rows_follow_dataset_order_and_skip_stale_keys() {
    let data = four_rows();
    let s = Selection::from_keys([RowKey::from(3), RowKey::from(1), RowKey::from(99)]);
    let selected: Vec<i64> = s
        .selected_rows(&data, "id")
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(selected, vec![1, 3]);
    assert_eq!(s.len(), 3);
}

#[test]
fn summary_combines_keys_rows_and_page_flags() {
    let data = four_rows();
    let page: Vec<&Row> = data[2..].iter().collect();
    let s = Selection::from_keys([RowKey::from(1), RowKey::from(3)]);
    let summary = SelectionSummary::new(&s, &data, &page, "id");
    assert_eq!(summary.selected_keys.len(), 2);
    assert_eq!(summary.selected_rows.len(), 2);
    assert!(!summary.is_all_selected_on_page);
    assert!(summary.is_some_selected_on_page);
    assert_eq!(summary.unkeyed_rows, 0);
}

#[test]
fn summary_counts_rows_without_usable_keys() {
    let data = rows(json!([
        {"id": 1, "name": "a"},
        {"name": "b"},
        {"id": {"nested": true}, "name": "c"},
        {"id": "x", "name": "d"}
    ]));
    assert!(RowKey::is_keyed(&data[0], "id"));
    assert!(!RowKey::is_keyed(&data[1], "id"));
    assert!(!RowKey::is_keyed(&data[2], "id"));

    let page: Vec<&Row> = data.iter().collect();
    let s = Selection::new().toggle_row(&data[1], "id");
    let summary = SelectionSummary::new(&s, &data, &page, "id");
    assert_eq!(summary.unkeyed_rows, 2);
    assert_eq!(summary.selected_rows.len(), 1);
    assert!(summary.is_some_selected_on_page);
}

#[test]
fn selection_serializes_as_key_list() {
    let s = Selection::from_keys([RowKey::from("b"), RowKey::from("a")]);
    assert_eq!(serde_json::to_value(&s).unwrap(), json!(["a", "b"]));
    let back: Selection = serde_json::from_value(json!(["a", "b"])).unwrap();
    assert_eq!(back, s);
}
