//! Page-based pagination state.
//!
//! [`Pagination`] tracks the current page and page size of a list and
//! derives everything else (page count, slice bounds, navigation flags) from
//! the number of items the list currently holds.
//!
//! Navigation never fails: out-of-range pages are clamped, and a page that
//! became out of range because the item count shrank is clamped when next
//! observed.
//!
//! # Example
//!
//! ```
//! use fieldops_seeker::Pagination;
//!
//! let mut pages = Pagination::new(10);
//! pages.set_total_items(23);
//! assert_eq!(pages.total_pages(), 3);
//!
//! pages.go_to_page(3);
//! let items: Vec<u32> = (1..=23).collect();
//! assert_eq!(pages.paginate(&items), &[21, 22, 23]);
//!
//! pages.set_page_size(20);
//! assert_eq!(pages.current_page(), 1);
//! assert_eq!(pages.total_pages(), 2);
//! ```

use serde::Serialize;

/// Page size used when a list does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages_for(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Pagination state for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates pagination on page one. A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Pagination {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// Builder form of [`set_total_items`](Self::set_total_items).
    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.set_total_items(total_items);
        self
    }

    /// Current 1-based page, clamped to the current page count.
    pub fn current_page(&self) -> usize {
        self.current_page.clamp(1, self.total_pages())
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items being paginated.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; one when there are no items.
    pub fn total_pages(&self) -> usize {
        total_pages_for(self.total_items, self.page_size)
    }

    /// Moves to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, n: usize) {
        self.current_page = n.clamp(1, self.total_pages());
    }

    /// Moves to the next page if there is one.
    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page() + 1);
    }

    /// Moves to the previous page if there is one.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page().saturating_sub(1));
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) {
        self.current_page = self.total_pages();
    }

    /// Changes the page size and always restarts from page one.
    pub fn set_page_size(&mut self, n: usize) {
        self.page_size = n.max(1);
        self.current_page = 1;
    }

    /// Updates the item count, clamping the current page into range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page();
    }

    /// Index of the first item on the current page.
    pub fn start_index(&self) -> usize {
        (self.current_page() - 1) * self.page_size
    }

    /// Index one past the last item on the current page.
    pub fn end_index(&self) -> usize {
        (self.start_index() + self.page_size).min(self.total_items)
    }

    /// Returns `true` if there is a page before the current one.
    pub fn can_go_previous(&self) -> bool {
        self.current_page() > 1
    }

    /// Returns `true` if there is a page after the current one.
    pub fn can_go_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// The current page's slice of `records`.
    ///
    /// Bounds are clamped to the slice length, so a slice shorter than
    /// `total_items` yields a short or empty page instead of panicking.
    pub fn paginate<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let end = self.end_index().min(records.len());
        let start = self.start_index().min(end);
        &records[start..end]
    }

    /// Serializable snapshot of the derived state.
    pub fn info(&self) -> PageInfo {
        let start = self.start_index();
        let end = self.end_index();
        PageInfo {
            current_page: self.current_page(),
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages(),
            start_index: start,
            end_index: end,
            first_item: if end > start { start + 1 } else { 0 },
            last_item: end,
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
        }
    }

    /// Page-number links for a pager showing at most `max_links` numbers.
    ///
    /// The first and last page are always present; the window around the
    /// current page is centered where possible and gaps become
    /// [`PageLink::Gap`].
    pub fn page_window(&self, max_links: usize) -> Vec<PageLink> {
        let total = self.total_pages();
        let current = self.current_page();
        let max_links = max_links.max(5);

        if total <= max_links {
            return (1..=total)
                .map(|n| PageLink::Page {
                    number: n,
                    current: n == current,
                })
                .collect();
        }

        // Slots left for the middle run once first and last are placed.
        let inner = max_links - 2;
        let half = inner / 2;
        let mut lo = current.saturating_sub(half).max(2);
        let mut hi = lo + inner - 1;
        if hi >= total {
            hi = total - 1;
            lo = hi + 1 - inner;
        }
        // A gap replaces one slot on each side it appears on.
        if lo > 2 {
            lo += 1;
        }
        if hi < total - 1 {
            hi -= 1;
        }

        let page = |n: usize| PageLink::Page {
            number: n,
            current: n == current,
        };
        let mut links = vec![page(1)];
        if lo > 2 {
            links.push(PageLink::Gap);
        }
        links.extend((lo..=hi).map(page));
        if hi < total - 1 {
            links.push(PageLink::Gap);
        }
        links.push(page(total));
        links
    }
}

/// Derived pagination values, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    /// 1-based position of the first item shown (0 when the page is empty).
    pub first_item: usize,
    /// 1-based position of the last item shown.
    pub last_item: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// One entry of a page-number pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Gap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<Option<usize>> {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Gap => None,
            })
            .collect()
    }

    #[test]
    fn empty_list_has_one_page() {
        let mut pages = Pagination::new(10);
        assert_eq!(pages.total_pages(), 1);
        pages.go_to_page(5);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.start_index(), 0);
        assert_eq!(pages.end_index(), 0);
        assert!(!pages.can_go_previous());
        assert!(!pages.can_go_next());
    }

    #[test]
    fn go_to_page_clamps_both_ends() {
        let mut pages = Pagination::new(10).with_total_items(45);
        pages.go_to_page(0);
        assert_eq!(pages.current_page(), 1);
        pages.go_to_page(99);
        assert_eq!(pages.current_page(), 5);
        assert_eq!(pages.start_index(), 40);
        assert_eq!(pages.end_index(), 45);
    }

    #[test]
    fn scenario_23_records() {
        let items: Vec<usize> = (0..23).collect();
        let mut pages = Pagination::new(10).with_total_items(items.len());
        assert_eq!(pages.total_pages(), 3);

        pages.go_to_page(3);
        assert_eq!(pages.paginate(&items).len(), 3);
        assert!(!pages.can_go_next());
        assert!(pages.can_go_previous());

        pages.set_page_size(20);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.total_pages(), 2);
    }

    #[test]
    fn set_page_size_resets_even_when_page_still_valid() {
        let mut pages = Pagination::new(10).with_total_items(100);
        pages.go_to_page(2);
        pages.set_page_size(5);
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn zero_page_size_is_one() {
        let mut pages = Pagination::new(0).with_total_items(3);
        assert_eq!(pages.page_size(), 1);
        pages.set_page_size(0);
        assert_eq!(pages.total_pages(), 3);
    }

    #[test]
    fn shrinking_total_clamps_on_access() {
        let mut pages = Pagination::new(10).with_total_items(50);
        pages.go_to_page(5);
        pages.set_total_items(12);
        assert_eq!(pages.current_page(), 2);
        assert_eq!(pages.start_index(), 10);
        assert_eq!(pages.end_index(), 12);
    }

    #[test]
    fn paginate_leaves_input_untouched() {
        let items = vec!["a", "b", "c", "d"];
        let mut pages = Pagination::new(3).with_total_items(items.len());
        pages.next_page();
        assert_eq!(pages.paginate(&items), &["d"]);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn paginate_tolerates_short_slice() {
        let items = vec![1, 2];
        let mut pages = Pagination::new(10).with_total_items(30);
        pages.go_to_page(2);
        assert!(pages.paginate(&items).is_empty());
    }

    #[test]
    fn next_and_previous_stop_at_edges() {
        let mut pages = Pagination::new(10).with_total_items(15);
        pages.previous_page();
        assert_eq!(pages.current_page(), 1);
        pages.next_page();
        pages.next_page();
        assert_eq!(pages.current_page(), 2);
        pages.first_page();
        assert_eq!(pages.current_page(), 1);
        pages.last_page();
        assert_eq!(pages.current_page(), 2);
    }

    #[test]
    fn info_reports_visible_range() {
        let mut pages = Pagination::new(10).with_total_items(23);
        pages.go_to_page(3);
        let info = pages.info();
        assert_eq!(info.first_item, 21);
        assert_eq!(info.last_item, 23);
        assert_eq!(info.total_pages, 3);

        let empty = Pagination::new(10).info();
        assert_eq!(empty.first_item, 0);
        assert_eq!(empty.last_item, 0);
    }

    #[test]
    fn window_lists_all_pages_when_few() {
        let mut pages = Pagination::new(10).with_total_items(30);
        pages.go_to_page(2);
        let links = pages.page_window(7);
        assert_eq!(numbers(&links), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            links[1],
            PageLink::Page {
                number: 2,
                current: true
            }
        );
    }

    #[test]
    fn window_gaps_around_current_page() {
        let mut pages = Pagination::new(10).with_total_items(200);

        pages.go_to_page(10);
        assert_eq!(
            numbers(&pages.page_window(7)),
            vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]
        );

        pages.go_to_page(1);
        assert_eq!(
            numbers(&pages.page_window(7)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]
        );

        pages.go_to_page(20);
        assert_eq!(
            numbers(&pages.page_window(7)),
            vec![Some(1), None, Some(16), Some(17), Some(18), Some(19), Some(20)]
        );
    }
}
