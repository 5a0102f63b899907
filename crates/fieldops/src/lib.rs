//! # fieldops
//!
//! Core of a field-services dashboard: the entities behind its list pages,
//! the quote totals calculator, and the `fieldops` command line.
//!
//! List pages do not implement their own searching or paging. Each one
//! declares a [`ListConfig`](fieldops_seeker::ListConfig) in [`lists`] and
//! runs its entities through the shared pipeline from `fieldops_seeker`:
//!
//! ```
//! use fieldops::entities::{Client, EntityKind};
//! use fieldops::lists;
//! use fieldops_seeker::ListState;
//!
//! let clients: Vec<Client> = serde_json::from_str(r#"[
//!     { "id": 1, "name": "Bolt Electric", "status": "active", "created_at": "2024-01-05T10:00:00Z" },
//!     { "id": 2, "name": "acme plumbing", "status": "inactive", "created_at": "2024-02-11T10:00:00Z" },
//!     { "id": 3, "name": "Cedar HVAC", "status": "active", "created_at": "2024-03-20T10:00:00Z" }
//! ]"#).unwrap();
//!
//! let mut state = ListState::new(&lists::config_for(EntityKind::Clients));
//! state.toggle_facet_value("status", "active");
//!
//! let view = state.view(&clients);
//! let names: Vec<&str> = view.page_items.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["Bolt Electric", "Cedar HVAC"]);
//! ```
//!
//! ## Modules
//!
//! - [`entities`]: typed records and [`EntityKind`](entities::EntityKind)
//! - [`lists`]: per-page search, facet and sort configuration
//! - [`quote`]: quote line items and [`calculate_totals`](quote::calculate_totals)
//! - [`store`]: the [`RecordStore`](store::RecordStore) seam and a JSON snapshot store
//! - [`prefs`]: persisted user preferences
//! - [`config`]: YAML configuration with environment overrides
//! - [`output`]: text tables and JSON/YAML/CSV serialization
//! - [`cli`]: the `fieldops` binary's commands

pub mod cli;
pub mod config;
pub mod entities;
mod error;
pub mod lists;
pub mod output;
pub mod prefs;
pub mod quote;
pub mod store;

pub use error::{Error, Result};
