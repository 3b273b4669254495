use axisgrid_engine::{Pagination, PaginationSummary, clamp_page, total_pages};
use pretty_assertions::assert_eq;

// ── Totals ───────────────────────────────────────────────────────

#[test]
fn empty_dataset_still_has_one_page() {
    let p = Pagination::new(1, 50, 0);
    assert_eq!(p.total_pages(), 1);
    assert_eq!(p.start_row(), 0);
    assert_eq!(p.end_row(), 0);
    assert_eq!(p.range(), 0..0);
}

#[test]
fn partial_last_page() {
    assert_eq!(total_pages(101, 50), 3);
    let p = Pagination::new(3, 50, 101);
    assert_eq!(p.start_row(), 101);
    assert_eq!(p.end_row(), 101);
    assert_eq!(p.range(), 100..101);
}

#[test]
fn exact_multiple() {
    assert_eq!(total_pages(100, 50), 2);
    assert_eq!(total_pages(1, 50), 1);
    assert_eq!(total_pages(50, 50), 1);
    assert_eq!(total_pages(51, 50), 2);
}

#[test]
fn zero_page_size_is_treated_as_one() {
    let p = Pagination::new(1, 0, 3);
    assert_eq!(p.page_size(), 1);
    assert_eq!(p.total_pages(), 3);
}

// ── Clamping ─────────────────────────────────────────────────────

#[test]
fn pages_clamp_into_range() {
    assert_eq!(clamp_page(0, 120, 50), 1);
    assert_eq!(clamp_page(9, 120, 50), 3);
    assert_eq!(clamp_page(2, 120, 50), 2);
    assert_eq!(Pagination::new(7, 25, 30).current_page(), 2);
}

#[test]
fn shrinking_data_pulls_page_back() {
    let p = Pagination::new(5, 10, 12);
    assert_eq!(p.current_page(), 2);
    assert_eq!(p.start_row(), 11);
    assert_eq!(p.end_row(), 12);
}

// ── Slicing ──────────────────────────────────────────────────────

#[test]
fn slice_returns_visible_items() {
    let items: Vec<u32> = (1..=7).collect();
    assert_eq!(Pagination::new(1, 3, 7).slice(&items), &[1, 2, 3]);
    assert_eq!(Pagination::new(3, 3, 7).slice(&items), &[7]);
}

#[test]
fn slice_tolerates_shorter_input() {
    let items = [1, 2];
    assert_eq!(Pagination::new(1, 3, 7).slice(&items), &[1, 2]);
    assert!(Pagination::new(3, 3, 7).slice(&items).is_empty());
}

#[test]
fn single_page_shows_everything() {
    let p = Pagination::single_page(120);
    assert_eq!(p.total_pages(), 1);
    assert_eq!(p.range(), 0..120);
    assert_eq!(Pagination::single_page(0).total_pages(), 1);
}

// ── Navigation ───────────────────────────────────────────────────

#[test]
fn previous_and_next_flags() {
    let first = Pagination::new(1, 10, 25);
    assert!(!first.has_previous());
    assert!(first.has_next());

    let last = Pagination::new(3, 10, 25);
    assert!(last.has_previous());
    assert!(!last.has_next());

    let only = Pagination::new(1, 10, 0);
    assert!(!only.has_previous());
    assert!(!only.has_next());
}

#[test]
fn page_window_shows_all_when_few_pages() {
    assert_eq!(Pagination::new(2, 10, 45).page_numbers(7), vec![1, 2, 3, 4, 5]);
}

#[test]
fn page_window_slides_with_current_page() {
    let total = 200;
    assert_eq!(Pagination::new(1, 10, total).page_numbers(7), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(Pagination::new(10, 10, total).page_numbers(7), vec![7, 8, 9, 10, 11, 12, 13]);
    assert_eq!(
        Pagination::new(20, 10, total).page_numbers(7),
        vec![14, 15, 16, 17, 18, 19, 20]
    );
}

#[test]
fn page_window_always_contains_current() {
    for page in 1..=20 {
        let numbers = Pagination::new(page, 10, 200).page_numbers(4);
        assert_eq!(numbers.len(), 4);
        assert!(numbers.contains(&page), "page {page} not in {numbers:?}");
    }
}

// ── Summary ──────────────────────────────────────────────────────

#[test]
fn summary_reports_bounds() {
    let summary = Pagination::new(2, 50, 120).summary();
    assert_eq!(
        summary,
        PaginationSummary {
            current_page: 2,
            total_pages: 3,
            start_row: 51,
            end_row: 100,
            total_rows: 120,
            page_size: 50,
        }
    );
}

#[test]
fn summary_serializes_camel_case() {
    let json = serde_json::to_value(Pagination::new(1, 25, 10).summary()).unwrap();
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["startRow"], 1);
    assert_eq!(json["endRow"], 10);
}
