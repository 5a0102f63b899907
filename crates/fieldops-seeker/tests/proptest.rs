//! Property-based tests for the list pipeline using proptest.

use proptest::prelude::*;
use fieldops_seeker::{
    apply_filters, apply_sort, build_view, ActiveFilters, Dir, Number, Seekable, SortSpec, Value,
    ViewQuery,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: usize,
    name: String,
    status: &'static str,
    amount: Option<i64>,
    urgent: bool,
}

impl Seekable for Row {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::String(&self.name),
            "status" => Value::String(self.status),
            "amount" => self.amount.map(Number::I64).into(),
            "urgent" => Value::Bool(self.urgent),
            _ => Value::None,
        }
    }
}

const STATUSES: [&str; 3] = ["open", "scheduled", "closed"];

fn rows_strategy(max: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            "[a-zA-Z ]{0,8}",
            0usize..3,
            prop::option::of(-50i64..50),
            any::<bool>(),
        ),
        0..max,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(id, (name, status, amount, urgent))| Row {
                id,
                name,
                status: STATUSES[status],
                amount,
                urgent,
            })
            .collect()
    })
}

fn filters_strategy() -> impl Strategy<Value = ActiveFilters> {
    (
        prop::collection::btree_set(prop::sample::select(STATUSES.to_vec()), 0..3),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(statuses, urgent)| {
            let mut filters = ActiveFilters::new().with("status", statuses);
            if let Some(urgent) = urgent {
                filters.set("urgent", [urgent.to_string()]);
            }
            filters
        })
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

fn ids<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<usize> {
    rows.into_iter().map(|r| r.id).collect()
}

fn search_fields() -> Vec<String> {
    vec!["name".to_string(), "status".to_string()]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filtering twice with the same arguments changes nothing the second time.
    #[test]
    fn filtering_is_idempotent(
        rows in rows_strategy(60),
        search in "[a-z]{0,2}",
        filters in filters_strategy(),
    ) {
        let once: Vec<Row> = apply_filters(&rows, &search, &search_fields(), &filters)
            .into_iter()
            .cloned()
            .collect();
        let twice = apply_filters(&once, &search, &search_fields(), &filters);

        prop_assert_eq!(ids(&once), ids(twice));
    }

    /// Filtering never grows the collection and keeps input order.
    #[test]
    fn filtering_preserves_order(
        rows in rows_strategy(60),
        filters in filters_strategy(),
    ) {
        let filtered = apply_filters(&rows, "", &[], &filters);
        prop_assert!(filtered.len() <= rows.len());

        let positions = ids(filtered);
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Every result satisfies every facet with a selection.
    #[test]
    fn facets_and_across_keys(
        rows in rows_strategy(60),
        filters in filters_strategy(),
    ) {
        for row in apply_filters(&rows, "", &[], &filters) {
            let statuses: Vec<&str> = filters.selected("status").collect();
            prop_assert!(statuses.is_empty() || statuses.contains(&row.status));
            let urgent: Vec<&str> = filters.selected("urgent").collect();
            let urgent_form = row.urgent.to_string();
            prop_assert!(urgent.is_empty() || urgent.contains(&urgent_form.as_str()));
        }
    }

    /// Without a sort field the view shows filtered records in input order.
    #[test]
    fn unsorted_view_keeps_input_order(
        rows in rows_strategy(60),
        filters in filters_strategy(),
    ) {
        let query = ViewQuery::new().filters(filters.clone()).page_size(1000);
        let view = build_view(&rows, &query);
        let filtered = apply_filters(&rows, "", &[], &filters);

        prop_assert_eq!(ids(view.page_items), ids(filtered));
    }

    /// Concatenating all pages reproduces the filtered and sorted set exactly.
    #[test]
    fn pages_concatenate_to_full_result(
        rows in rows_strategy(80),
        filters in filters_strategy(),
        dir in dir_strategy(),
        page_size in 1usize..15,
    ) {
        let sort = SortSpec::new("amount", dir);
        let expected = ids(apply_sort(apply_filters(&rows, "", &[], &filters), &sort));

        let base = ViewQuery::new().filters(filters).sort(sort).page_size(page_size);
        let first = build_view(&rows, &base);
        prop_assert_eq!(first.total_items, expected.len());

        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            let view = build_view(&rows, &base.clone().page(page));
            prop_assert!(view.page_items.len() <= page_size);
            collected.extend(ids(view.page_items));
        }

        prop_assert_eq!(collected, expected);
    }

    /// Nulls come after every defined value, in both directions.
    #[test]
    fn nulls_sink_to_bottom(
        rows in rows_strategy(60),
        dir in dir_strategy(),
    ) {
        let sorted = apply_sort(rows.iter().collect(), &SortSpec::new("amount", dir));
        let first_null = sorted.iter().position(|r| r.amount.is_none()).unwrap_or(sorted.len());

        prop_assert!(sorted[first_null..].iter().all(|r| r.amount.is_none()));
        prop_assert!(sorted[..first_null].iter().all(|r| r.amount.is_some()));
    }

    /// Defined values follow the direction; equal values keep input order.
    #[test]
    fn sort_is_ordered_and_stable(
        rows in rows_strategy(60),
        dir in dir_strategy(),
    ) {
        let sorted = apply_sort(rows.iter().collect(), &SortSpec::new("amount", dir));

        for pair in sorted.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].amount, pair[1].amount) {
                match dir {
                    Dir::Asc => prop_assert!(a <= b),
                    Dir::Desc => prop_assert!(a >= b),
                }
                if a == b {
                    prop_assert!(pair[0].id < pair[1].id, "equal amounts reordered");
                }
            }
        }
    }

    /// Pages past the end are empty but still report the filtered totals.
    #[test]
    fn out_of_range_page_is_empty(
        rows in rows_strategy(40),
        page_size in 1usize..10,
        overshoot in 1usize..5,
    ) {
        let query = ViewQuery::new().page_size(page_size);
        let total_pages = build_view(&rows, &query).total_pages;
        let view = build_view(&rows, &query.page(total_pages + overshoot));

        prop_assert!(view.page_items.is_empty());
        prop_assert_eq!(view.total_items, rows.len());
        prop_assert!(view.total_pages >= 1);
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn empty_collection_yields_single_empty_page() {
    let rows: Vec<Row> = Vec::new();
    let view = build_view(&rows, &ViewQuery::new().search("anything", ["name"]));

    assert!(view.page_items.is_empty());
    assert_eq!(view.total_items, 0);
    assert_eq!(view.total_pages, 1);
}

#[test]
fn mixed_types_sort_without_panicking() {
    use serde_json::json;

    let rows = vec![
        json!({ "v": 10 }),
        json!({ "v": "9" }),
        json!({ "v": 9 }),
        json!({ "v": "10" }),
        json!({ "v": true }),
        json!({ "v": null }),
    ];
    let sorted = apply_sort(rows.iter().collect(), &SortSpec::asc("v"));

    assert_eq!(sorted[0]["v"], 9);
    assert_eq!(sorted[1]["v"], 10);
    assert_eq!(sorted[2]["v"], "10");
    assert_eq!(sorted[3]["v"], "9");
    assert_eq!(sorted[4]["v"], true);
    assert!(sorted[5]["v"].is_null());
}
