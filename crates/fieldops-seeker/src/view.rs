//! The list pipeline: filter, then sort, then paginate.
//!
//! [`build_view`] is a pure function of its inputs. Callers that want to
//! memoize a view can key the cache on the records and the [`ViewQuery`].

use serde::Serialize;

use crate::filter::{apply_filters, ActiveFilters};
use crate::ordering::{apply_sort, SortSpec};
use crate::pagination::{total_pages_for, DEFAULT_PAGE_SIZE};
use crate::traits::Seekable;

/// Everything the pipeline needs besides the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    /// Free-text search.
    pub search_text: String,
    /// Fields the search text is matched against.
    pub search_fields: Vec<String>,
    /// Facet selections.
    pub active_filters: ActiveFilters,
    /// Sort field and direction.
    pub sort: SortSpec,
    /// Requested 1-based page.
    pub page: usize,
    /// Items per page; zero is treated as one.
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        ViewQuery {
            search_text: String::new(),
            search_fields: Vec::new(),
            active_filters: ActiveFilters::new(),
            sort: SortSpec::none(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewQuery {
    /// Creates a query for the first page with the default page size.
    pub fn new() -> Self {
        ViewQuery::default()
    }

    /// Sets the search text and the fields it applies to.
    pub fn search<I, S>(mut self, text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_text = text.into();
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the facet selections.
    pub fn filters(mut self, filters: ActiveFilters) -> Self {
        self.active_filters = filters;
        self
    }

    /// Sets the sort spec.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the requested page.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// One rendered page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<T> {
    /// Items on the requested page.
    pub page_items: Vec<T>,
    /// Items matching the filters, before pagination.
    pub total_items: usize,
    /// Pages available for `total_items`; at least one.
    pub total_pages: usize,
}

impl<T> ListView<T> {
    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }

    /// Maps the page items, keeping the counts.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ListView<U> {
        ListView {
            page_items: self.page_items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

impl<T: Clone> ListView<&T> {
    /// Clones the page items out of the borrowed view.
    pub fn cloned(self) -> ListView<T> {
        self.map(Clone::clone)
    }
}

/// Runs the list pipeline over `records`.
///
/// Filtering (search and facets) happens first, then sorting, then the
/// requested page is cut out of the sorted result. `total_items` counts the
/// filtered records. A page outside `[1, total_pages]` yields an empty page
/// rather than being clamped; clamping belongs to [`Pagination`].
///
/// [`Pagination`]: crate::Pagination
///
/// # Example
///
/// ```
/// use fieldops_seeker::{build_view, SortSpec, ViewQuery};
/// use serde_json::json;
///
/// let quotes: Vec<_> = (1..=23).map(|n| json!({ "number": n })).collect();
/// let query = ViewQuery::new()
///     .sort(SortSpec::desc("number"))
///     .page(3)
///     .page_size(10);
///
/// let view = build_view(&quotes, &query);
/// assert_eq!(view.total_items, 23);
/// assert_eq!(view.total_pages, 3);
/// assert_eq!(view.page_items.len(), 3);
/// assert_eq!(view.page_items[0]["number"], 3);
/// ```
pub fn build_view<'a, T: Seekable>(records: &'a [T], query: &ViewQuery) -> ListView<&'a T> {
    let filtered = apply_filters(
        records,
        &query.search_text,
        &query.search_fields,
        &query.active_filters,
    );
    let sorted = apply_sort(filtered, &query.sort);

    let page_size = query.page_size.max(1);
    let total_items = sorted.len();
    let total_pages = total_pages_for(total_items, page_size);

    let page_items = if query.page == 0 || query.page > total_pages {
        Vec::new()
    } else {
        sorted
            .into_iter()
            .skip((query.page - 1) * page_size)
            .take(page_size)
            .collect()
    };

    tracing::trace!(
        input = records.len(),
        matched = total_items,
        page = query.page,
        shown = page_items.len(),
        sort = %query.sort,
        "built list view"
    );

    ListView {
        page_items,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn numbered(n: usize) -> Vec<Json> {
        (1..=n)
            .map(|i| json!({ "id": i, "name": format!("Client {i:02}"), "status": if i % 2 == 0 { "active" } else { "inactive" } }))
            .collect()
    }

    fn ids(view: &ListView<&Json>) -> Vec<i64> {
        view.page_items
            .iter()
            .map(|r| r["id"].as_i64().unwrap_or(-1))
            .collect()
    }

    #[test]
    fn counts_are_post_filter() {
        let records = numbered(23);
        let query = ViewQuery::new().filters(ActiveFilters::new().with("status", ["active"]));
        let view = build_view(&records, &query);
        assert_eq!(view.total_items, 11);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.page_items.len(), 10);
    }

    #[test]
    fn page_past_end_is_empty() {
        let records = numbered(5);
        let view = build_view(&records, &ViewQuery::new().page(2));
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);

        let view = build_view(&records, &ViewQuery::new().page(0));
        assert!(view.is_empty());
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let records: Vec<Json> = Vec::new();
        let view = build_view(&records, &ViewQuery::new());
        assert_eq!(view.total_items, 0);
        assert_eq!(view.total_pages, 1);
        assert!(view.is_empty());
    }

    #[test]
    fn sort_happens_before_pagination() {
        let records = numbered(15);
        let query = ViewQuery::new().sort(SortSpec::desc("id")).page_size(10);
        let view = build_view(&records, &query);
        // Paginating first would have shown 10..1.
        assert_eq!(ids(&view), (6..=15).rev().collect::<Vec<i64>>());
    }

    #[test]
    fn filter_happens_before_pagination() {
        let records = numbered(30);
        let query = ViewQuery::new()
            .search("client 2", ["name"])
            .page_size(5);
        let view = build_view(&records, &query);
        // "Client 20".."Client 29" all live beyond the first raw page.
        assert_eq!(view.total_items, 10);
        assert_eq!(ids(&view), vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn cloned_view_owns_items() {
        let records = numbered(3);
        let view = build_view(&records, &ViewQuery::new()).cloned();
        assert_eq!(view.page_items, records);
    }
}
