use axisgrid_model::{
    ColumnState, FilterClause, FilterCondition, FilterJoin, FilterModel, FilterOperator,
    FilterValue, GridParams, PinSide, SavedView, SortModel, SortOrder, ViewId, field_value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── SortModel ────────────────────────────────────────────────────

#[test]
fn sort_model_wire_shape() {
    let s = SortModel::desc("events");
    assert_eq!(
        serde_json::to_value(&s).unwrap(),
        json!({"field": "events", "order": "desc"})
    );
    let back: SortModel = serde_json::from_value(json!({"field": "a", "order": "asc"})).unwrap();
    assert_eq!(back, SortModel::asc("a"));
}

#[test]
fn sort_order_display() {
    assert_eq!(SortOrder::Asc.to_string(), "asc");
    assert_eq!(SortOrder::Desc.to_string(), "desc");
}

// ── Filter contracts ─────────────────────────────────────────────

#[test]
fn operator_names_round_trip_through_from_str() {
    for op in FilterOperator::ALL {
        assert_eq!(op.as_str().parse::<FilterOperator>().unwrap(), op);
    }
    assert!("between".parse::<FilterOperator>().is_err());
}

#[test]
fn condition_wire_shape() {
    let c = FilterCondition::new(FilterOperator::GreaterThanOrEqual, 10i64).joined(FilterJoin::Or);
    assert_eq!(
        serde_json::to_value(&c).unwrap(),
        json!({"type": "greaterThanOrEqual", "value": 10.0, "operator": "OR"})
    );
}

#[test]
fn filter_value_rejects_booleans_when_decoding() {
    let bad = json!({"type": "equals", "value": true});
    assert!(serde_json::from_value::<FilterCondition>(bad).is_err());
    let null = json!({"type": "equals", "value": null});
    assert!(serde_json::from_value::<FilterCondition>(null).is_err());
}

#[test]
fn clause_accepts_single_or_list() {
    let model: FilterModel = serde_json::from_value(json!({
        "client": {"type": "contains", "value": "acme"},
        "events": [
            {"type": "greaterThan", "value": 5},
            {"type": "lessThan", "value": 100, "operator": "AND"}
        ]
    }))
    .unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.get("client").unwrap().conditions().len(), 1);
    let events = model.get("events").unwrap();
    assert!(matches!(events, FilterClause::Many(v) if v.len() == 2));
    assert_eq!(
        events.conditions()[1].value,
        FilterValue::Number(100.0)
    );
}

#[test]
fn filter_model_builder() {
    let mut model = FilterModel::new()
        .with("a", FilterCondition::new(FilterOperator::IsEmpty, ""))
        .with("b", vec![FilterCondition::new(FilterOperator::Equals, "x")]);
    assert_eq!(model.iter().map(|(f, _)| f).collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(model.remove("a").is_some());
    assert_eq!(model.len(), 1);
    assert!(!model.is_empty());
}

// ── ColumnState ──────────────────────────────────────────────────

#[test]
fn column_state_wire_shape_allows_null_pinning() {
    let cs: ColumnState = serde_json::from_value(json!({
        "order": ["a", "b"],
        "widths": {"a": 120},
        "visibility": {"b": false},
        "pinning": {"a": "left", "b": null}
    }))
    .unwrap();
    assert_eq!(cs.order, vec!["a", "b"]);
    assert_eq!(cs.widths["a"], 120);
    assert_eq!(cs.visibility["b"], false);
    assert_eq!(cs.pinning["a"], Some(PinSide::Left));
    assert_eq!(cs.pinning["b"], None);
}

#[test]
fn column_state_missing_sections_default_empty() {
    let cs: ColumnState = serde_json::from_value(json!({"order": ["x"]})).unwrap();
    assert!(cs.widths.is_empty());
    assert!(cs.visibility.is_empty());
    assert!(cs.pinning.is_empty());
}

#[test]
fn column_state_restricted_to_drops_unknown_fields() {
    let mut cs = ColumnState::new();
    cs.order = vec!["a".into(), "gone".into(), "b".into()];
    cs.widths.insert("gone".into(), 10);
    cs.widths.insert("a".into(), 90);
    cs.visibility.insert("gone".into(), true);
    cs.pinning.insert("b".into(), Some(PinSide::Right));

    let r = cs.restricted_to(["a", "b"]);
    assert_eq!(r.order, vec!["a", "b"]);
    assert_eq!(r.widths.len(), 1);
    assert!(r.visibility.is_empty());
    assert_eq!(r.pinning["b"], Some(PinSide::Right));
}

// ── Saved views ──────────────────────────────────────────────────

#[test]
fn saved_view_round_trips_json() {
    let mut view = SavedView::new("Top clients", ColumnState::new());
    view.set_sort(Some(SortModel::desc("events")));
    view.filter_model.insert("client", FilterCondition::new(FilterOperator::StartsWith, "a"));
    view.is_default = true;

    let json = view.to_json().unwrap();
    let back = SavedView::from_json(&json).unwrap();
    assert_eq!(back, view);
    assert_eq!(back.sort(), Some(&SortModel::desc("events")));
}

#[test]
fn saved_view_clearing_sort_empties_list() {
    let mut view = SavedView::new("v", ColumnState::new());
    view.set_sort(Some(SortModel::asc("a")));
    view.set_sort(None);
    assert!(view.sort_model.is_empty());
    assert_eq!(view.sort(), None);
}

#[test]
fn view_ids_are_unique_and_parse() {
    let a = ViewId::new();
    let b = ViewId::new();
    assert_ne!(a, b);
    assert_eq!(ViewId::parse(&a.to_string()).unwrap(), a);
    assert!(ViewId::parse("nope").is_err());
}

#[test]
fn grid_params_skip_empty_sections() {
    let p = GridParams {
        start_row: 50,
        end_row: 100,
        sort_model: Vec::new(),
        filter_model: None,
    };
    assert_eq!(
        serde_json::to_value(&p).unwrap(),
        json!({"startRow": 50, "endRow": 100})
    );
}

// ── Rows ─────────────────────────────────────────────────────────

#[test]
fn field_value_treats_null_as_missing() {
    let row = json!({"a": 1, "b": null}).as_object().unwrap().clone();
    assert_eq!(field_value(&row, "a"), Some(&json!(1)));
    assert_eq!(field_value(&row, "b"), None);
    assert_eq!(field_value(&row, "c"), None);
}
