//! UI-bound list state.
//!
//! [`ListState`] is the caller side of the pipeline contract: it owns the
//! inputs a list page binds to its controls and resets the page to one
//! whenever the search, a facet, or the sort changes. A requested page is
//! kept as asked and clamped by the next [`ListState::view`], once the
//! filtered count is known. [`build_view`] itself never clamps or resets.

use crate::config::ListConfig;
use crate::filter::ActiveFilters;
use crate::ordering::{Dir, SortSpec};
use crate::pagination::{PageInfo, Pagination};
use crate::traits::Seekable;
use crate::view::{build_view, ListView, ViewQuery};

/// Search, facet, sort and page state for one list page.
#[derive(Debug, Clone)]
pub struct ListState {
    search_fields: Vec<String>,
    search_text: String,
    filters: ActiveFilters,
    sort: SortSpec,
    pagination: Pagination,
    requested_page: Option<usize>,
}

impl ListState {
    /// Initial state for a configured list.
    pub fn new(config: &ListConfig) -> Self {
        ListState {
            search_fields: config.search_fields.clone(),
            search_text: String::new(),
            filters: ActiveFilters::new(),
            sort: config.default_sort.clone(),
            pagination: Pagination::new(config.default_page_size),
            requested_page: None,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Replaces the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.restart();
    }

    /// Toggles one facet value.
    pub fn toggle_facet_value(&mut self, key: &str, value: &str) {
        self.filters.toggle(key, value);
        self.restart();
    }

    /// Replaces the selection of one facet.
    pub fn set_facet<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set(key, values);
        self.restart();
    }

    /// Replaces every facet selection.
    pub fn set_filters(&mut self, filters: ActiveFilters) {
        self.filters = filters;
        self.restart();
    }

    /// Clears one facet.
    pub fn clear_facet(&mut self, key: &str) {
        self.filters.clear(key);
        self.restart();
    }

    /// Clears the search text and every facet.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.filters.clear_all();
        self.restart();
    }

    /// Replaces the sort spec.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.restart();
    }

    /// Column-header sort: the active column flips direction, any other
    /// column starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let dir = match self.sort.active_field() {
            Some(current) if current == field => self.sort.dir.flipped(),
            _ => Dir::Asc,
        };
        self.set_sort(SortSpec::new(field, dir));
    }

    /// Requests a page. It is clamped against the filtered count on the
    /// next [`view`](Self::view), so a page restored before any records
    /// are loaded survives.
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to_page(page);
        self.requested_page = Some(page);
    }

    /// Changes the page size; always returns to page one.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.requested_page = None;
        self.pagination.set_page_size(page_size);
    }

    fn restart(&mut self) {
        self.requested_page = None;
        self.pagination.first_page();
    }

    fn page(&self) -> usize {
        self.requested_page
            .unwrap_or_else(|| self.pagination.current_page())
    }

    /// Number of active constraints, for a filter badge.
    pub fn active_filter_count(&self) -> usize {
        let search = usize::from(!self.search_text.trim().is_empty());
        search + self.filters.selected_count()
    }

    /// The pipeline inputs for the current state.
    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            search_text: self.search_text.clone(),
            search_fields: self.search_fields.clone(),
            active_filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: self.page(),
            page_size: self.pagination.page_size(),
        }
    }

    /// Builds the current page and records the filtered item count.
    ///
    /// A requested page beyond the filtered set, or a current page left out
    /// of range because the set shrank, is clamped first so the caller never
    /// sees an empty page that has data before it.
    pub fn view<'a, T: Seekable>(&mut self, records: &'a [T]) -> ListView<&'a T> {
        let query = self.query();
        let mut view = build_view(records, &query);
        self.pagination.set_total_items(view.total_items);
        if let Some(page) = self.requested_page.take() {
            self.pagination.go_to_page(page);
        }
        if self.pagination.current_page() != query.page {
            view = build_view(records, &self.query());
        }
        view
    }

    /// Page summary for the last computed view.
    pub fn page_info(&self) -> PageInfo {
        self.pagination.info()
    }
}
