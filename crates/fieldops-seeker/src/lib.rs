//! fieldops-seeker - the list pipeline behind every dashboard list page.
//!
//! Clients, locations, technicians, materials, work orders, quotes and
//! projects are all shown the same way: a search box, a row of multi-select
//! facet filters, sortable columns, and a pager. This crate implements that
//! pipeline once:
//!
//! - **Filter**: case-insensitive search over configured fields, then facets
//!   (OR within a facet, AND across facets)
//! - **Sort**: by one field or dot path, nulls last in both directions
//! - **Paginate**: 1-based pages, at least one page even when empty
//!
//! # Quick Start
//!
//! ```rust
//! use fieldops_seeker::{build_view, ActiveFilters, SortSpec, ViewQuery};
//! use serde_json::json;
//!
//! let clients = vec![
//!     json!({ "name": "Cedar HVAC", "status": "active" }),
//!     json!({ "name": "Acme Plumbing", "status": "active" }),
//!     json!({ "name": "Bolt Electric", "status": "inactive" }),
//! ];
//!
//! let query = ViewQuery::new()
//!     .search("", ["name"])
//!     .filters(ActiveFilters::new().with("status", ["active"]))
//!     .sort(SortSpec::asc("name"))
//!     .page_size(10);
//!
//! let view = build_view(&clients, &query);
//! assert_eq!(view.total_items, 2);
//! assert_eq!(view.page_items[0]["name"], "Acme Plumbing");
//! ```
//!
//! # Records
//!
//! Anything implementing [`Seekable`] can be listed. JSON rows from the
//! backing store implement it out of the box, with dot paths walking nested
//! objects; typed entities implement it by hand.
//!
//! # Pipeline Order
//!
//! ```text
//! records ─► search ─► facets ─► sort ─► page slice
//!                               │
//!                               └─► total_items / total_pages
//! ```
//!
//! [`build_view`] is pure and never clamps. [`ListState`] wraps it with the
//! page-reset and clamping rules a list page needs.

mod config;
mod error;
mod filter;
mod ordering;
mod pagination;
mod record;
mod state;
mod traits;
mod value;
mod view;

pub use config::{ListConfig, SortOption};
pub use error::{Result, SeekerError};
pub use filter::{
    apply_filters, facet_counts, matches_facets, matches_search, ActiveFilters, FacetArg,
    FacetFilterConfig, FacetOption,
};
pub use ordering::{apply_sort, compare_directed, compare_values, Dir, SortSpec};
pub use pagination::{
    total_pages_for, PageInfo, PageLink, Pagination, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
pub use record::Record;
pub use state::ListState;
pub use traits::{split_path, Seekable};
pub use value::{Number, Timestamp, Value};
pub use view::{build_view, ListView, ViewQuery};
