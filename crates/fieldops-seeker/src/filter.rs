//! Search and facet predicates.
//!
//! A list page narrows its records with two kinds of predicate:
//!
//! - **Search**: one free-text box matched case-insensitively against a fixed
//!   set of fields. A record passes if any field contains the text.
//! - **Facets**: multi-select filters on discrete fields. Within one facet the
//!   selected values are OR-ed; across facets the constraints are AND-ed.
//!
//! ```text
//! match = (search empty ∨ ∃ field ∈ search_fields: field ⊇ text)
//!       ∧ (∀ facet with a selection: value(facet) ∈ selection)
//! ```
//!
//! Missing and null values never satisfy either predicate.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeekerError;
use crate::traits::Seekable;

/// One selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Value compared against the record field.
    pub value: String,
    /// Display name.
    pub label: String,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        FacetOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declares a facet filter: the field it applies to and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilterConfig {
    /// Field name (may be a dot path).
    pub key: String,
    /// Display name.
    pub label: String,
    /// Selectable values, in display order.
    pub options: Vec<FacetOption>,
}

impl FacetFilterConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        FacetFilterConfig {
            key: key.into(),
            label: label.into(),
            options: Vec::new(),
        }
    }

    /// Adds an option.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FacetOption::new(value, label));
        self
    }

    /// Yes/No options for a boolean field.
    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        FacetFilterConfig::new(key, label)
            .option("true", "Yes")
            .option("false", "No")
    }

    /// Returns the option with the given value, if configured.
    pub fn find_option(&self, value: &str) -> Option<&FacetOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Selected values per facet key.
///
/// A key that is absent or maps to an empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeMap<String, BTreeSet<String>>);

impl ActiveFilters {
    /// Creates an empty selection.
    pub fn new() -> Self {
        ActiveFilters::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(key, values);
        self
    }

    /// Replaces the selection for a facet.
    pub fn set<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// Adds a value to a facet selection, or removes it if already selected.
    ///
    /// Returns `true` if the value is selected afterwards.
    pub fn toggle(&mut self, key: &str, value: &str) -> bool {
        let selected = self.0.entry(key.to_string()).or_default();
        if selected.remove(value) {
            if selected.is_empty() {
                self.0.remove(key);
            }
            false
        } else {
            selected.insert(value.to_string());
            true
        }
    }

    /// Removes the selection for one facet.
    pub fn clear(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Removes every selection.
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Selected values for a facet (empty if none).
    pub fn selected(&self, key: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(key)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Returns `true` if the value is selected for the facet.
    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        self.0.get(key).is_some_and(|values| values.contains(value))
    }

    /// Facets that actually constrain records.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| (key.as_str(), values))
    }

    /// Total number of selected values across all facets.
    pub fn selected_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` when no facet constrains records.
    pub fn is_empty(&self) -> bool {
        self.constraints().next().is_none()
    }

    /// Short human summary such as `status=active,pending; industry=tech`.
    pub fn summary(&self) -> String {
        self.constraints()
            .map(|(key, values)| {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                format!("{}={}", key, joined.join(","))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K, V, S> FromIterator<(K, V)> for ActiveFilters
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut filters = ActiveFilters::new();
        for (key, values) in iter {
            filters.set(key, values);
        }
        filters
    }
}

/// A single `key=value[,value...]` argument.
///
/// Repeated arguments for the same key are merged by
/// [`ActiveFilters::merge_arg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetArg {
    pub key: String,
    pub values: Vec<String>,
}

impl FromStr for FacetArg {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, values) = s
            .split_once('=')
            .ok_or_else(|| SeekerError::InvalidFacet(s.to_string()))?;
        let key = key.trim();
        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();
        if key.is_empty() || values.is_empty() {
            return Err(SeekerError::InvalidFacet(s.to_string()));
        }
        Ok(FacetArg {
            key: key.to_string(),
            values,
        })
    }
}

impl ActiveFilters {
    /// Adds the values of a parsed argument to the selection.
    pub fn merge_arg(&mut self, arg: FacetArg) {
        self.0.entry(arg.key).or_default().extend(arg.values);
    }
}

/// Lowercased search needle, or `None` when the text places no constraint.
fn search_needle(search_text: &str) -> Option<String> {
    if search_text.trim().is_empty() {
        None
    } else {
        Some(search_text.to_lowercase())
    }
}

fn contains_needle<T: Seekable + ?Sized>(record: &T, needle: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| {
        record
            .field_value(field)
            .search_form()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Tests the search predicate for one record.
pub fn matches_search<T: Seekable + ?Sized>(
    record: &T,
    search_text: &str,
    search_fields: &[String],
) -> bool {
    match search_needle(search_text) {
        Some(needle) => contains_needle(record, &needle, search_fields),
        None => true,
    }
}

/// Tests every facet constraint for one record.
pub fn matches_facets<T: Seekable + ?Sized>(record: &T, active_filters: &ActiveFilters) -> bool {
    active_filters.constraints().all(|(key, selected)| {
        record
            .field_value(key)
            .facet_form()
            .is_some_and(|value| selected.contains(value.as_ref()))
    })
}

/// Filters records by search text and facet selections.
///
/// Input order is preserved. With an empty search and no facet constraints
/// every record is returned.
///
/// # Example
///
/// ```
/// use fieldops_seeker::{apply_filters, ActiveFilters};
/// use serde_json::json;
///
/// let clients = vec![
///     json!({ "name": "Acme Plumbing", "status": "active" }),
///     json!({ "name": "Bolt Electric", "status": "inactive" }),
/// ];
/// let fields = vec!["name".to_string()];
/// let active = ActiveFilters::new().with("status", ["active"]);
///
/// let matched = apply_filters(&clients, "acme", &fields, &active);
/// assert_eq!(matched.len(), 1);
/// ```
pub fn apply_filters<'a, T: Seekable>(
    records: &'a [T],
    search_text: &str,
    search_fields: &[String],
    active_filters: &ActiveFilters,
) -> Vec<&'a T> {
    let needle = search_needle(search_text);
    records
        .iter()
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| contains_needle(*record, needle, search_fields))
        })
        .filter(|record| matches_facets(*record, active_filters))
        .collect()
}

/// Number of records carrying each option of a facet, in option order.
///
/// Only the facet's own field is inspected, so counts reflect whatever
/// record set is passed in.
pub fn facet_counts<T: Seekable>(records: &[T], facet: &FacetFilterConfig) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = facet
        .options
        .iter()
        .map(|o| (o.value.as_str(), 0))
        .collect();
    for record in records {
        if let Some(value) = record.field_value(&facet.key).facet_form() {
            if let Some(count) = counts.get_mut(value.as_ref()) {
                *count += 1;
            }
        }
    }
    facet
        .options
        .iter()
        .map(|o| (o.value.clone(), counts.get(o.value.as_str()).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn clients() -> Vec<Json> {
        vec![
            json!({ "name": "Acme Plumbing", "email": "ops@acme.test", "status": "active", "industry": "tech", "vip": true }),
            json!({ "name": "Bolt Electric", "email": null, "status": "inactive", "industry": "tech", "vip": false }),
            json!({ "name": "Cedar HVAC", "email": "hi@cedar.test", "status": "active", "industry": "hvac" }),
        ]
    }

    #[test]
    fn empty_inputs_are_identity() {
        let records = clients();
        let out = apply_filters(&records, "", &fields(&["name"]), &ActiveFilters::new());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0]["name"], "Acme Plumbing");
        assert_eq!(out[2]["name"], "Cedar HVAC");
    }

    #[test]
    fn whitespace_search_matches_everything() {
        let records = clients();
        let out = apply_filters(&records, "   ", &fields(&["name"]), &ActiveFilters::new());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_over_any_field() {
        let records = clients();
        let search = fields(&["name", "email"]);

        let out = apply_filters(&records, "CEDAR", &search, &ActiveFilters::new());
        assert_eq!(out.len(), 1);

        let out = apply_filters(&records, "acme.test", &search, &ActiveFilters::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["name"], "Acme Plumbing");
    }

    #[test]
    fn null_fields_never_match_search() {
        let records = clients();
        let out = apply_filters(&records, "null", &fields(&["email"]), &ActiveFilters::new());
        assert!(out.is_empty());
    }

    #[test]
    fn facets_or_within_and_across() {
        let records = vec![
            json!({ "status": "active", "industry": "tech" }),
            json!({ "status": "inactive", "industry": "tech" }),
        ];
        let no_search: Vec<String> = Vec::new();

        let active = ActiveFilters::new().with("status", ["active"]);
        let out = apply_filters(&records, "", &no_search, &active);
        assert_eq!(out, vec![&records[0]]);

        let both = active.with("industry", ["tech"]);
        let out = apply_filters(&records, "", &no_search, &both);
        assert_eq!(out, vec![&records[0]]);

        let either = ActiveFilters::new().with("status", ["active", "inactive"]);
        assert_eq!(apply_filters(&records, "", &no_search, &either).len(), 2);
    }

    #[test]
    fn empty_facet_selection_is_no_constraint() {
        let records = clients();
        let active = ActiveFilters::new().with("status", Vec::<String>::new());
        assert!(active.is_empty());
        assert_eq!(apply_filters(&records, "", &[], &active).len(), 3);
    }

    #[test]
    fn boolean_facets_use_string_form() {
        let records = clients();
        let active = ActiveFilters::new().with("vip", ["false"]);
        let out = apply_filters(&records, "", &[], &active);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["name"], "Bolt Electric");
    }

    #[test]
    fn missing_facet_value_never_matches() {
        let records = clients();
        let active = ActiveFilters::new().with("vip", ["true", "false"]);
        // Cedar has no vip field
        assert_eq!(apply_filters(&records, "", &[], &active).len(), 2);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut active = ActiveFilters::new();
        assert!(active.toggle("status", "active"));
        assert!(active.is_selected("status", "active"));
        assert!(!active.toggle("status", "active"));
        assert!(active.is_empty());
        assert_eq!(active.selected("status").count(), 0);
    }

    #[test]
    fn facet_arg_parsing() {
        let arg: FacetArg = "status=active, pending".parse().unwrap();
        assert_eq!(arg.key, "status");
        assert_eq!(arg.values, vec!["active", "pending"]);

        assert!("status".parse::<FacetArg>().is_err());
        assert!("=active".parse::<FacetArg>().is_err());
        assert!("status=".parse::<FacetArg>().is_err());
    }

    #[test]
    fn merged_args_accumulate() {
        let mut active = ActiveFilters::new();
        active.merge_arg("status=active".parse().unwrap());
        active.merge_arg("status=pending".parse().unwrap());
        assert_eq!(active.selected_count(), 2);
        assert_eq!(active.summary(), "status=active,pending");
    }

    #[test]
    fn counts_follow_option_order() {
        let records = clients();
        let facet = FacetFilterConfig::new("status", "Status")
            .option("inactive", "Inactive")
            .option("active", "Active")
            .option("archived", "Archived");

        assert_eq!(
            facet_counts(&records, &facet),
            vec![
                ("inactive".to_string(), 1),
                ("active".to_string(), 2),
                ("archived".to_string(), 0),
            ]
        );
    }
}
