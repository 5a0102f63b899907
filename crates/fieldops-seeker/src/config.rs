//! Declarative list configuration.
//!
//! Each list page describes itself once (which fields the search box looks
//! at, which facets it offers, which columns can be sorted) and hands the
//! rest to the shared pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeekerError};
use crate::filter::{ActiveFilters, FacetFilterConfig};
use crate::ordering::SortSpec;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// A sortable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    /// Field (or dot path) to sort by.
    pub field: String,
    /// Display name.
    pub label: String,
}

impl SortOption {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        SortOption {
            field: field.into(),
            label: label.into(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Configuration of one list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Fields matched by the search box.
    #[serde(default)]
    pub search_fields: Vec<String>,
    /// Facet filters offered by the page.
    #[serde(default)]
    pub facets: Vec<FacetFilterConfig>,
    /// Sortable columns.
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    /// Sort applied when the page opens.
    #[serde(default)]
    pub default_sort: SortSpec,
    /// Page size applied when the page opens.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            search_fields: Vec::new(),
            facets: Vec::new(),
            sort_options: Vec::new(),
            default_sort: SortSpec::none(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        ListConfig::default()
    }

    /// Sets the searchable fields.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a facet.
    pub fn facet(mut self, facet: FacetFilterConfig) -> Self {
        self.facets.push(facet);
        self
    }

    /// Adds a sortable column.
    pub fn sort_option(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.sort_options.push(SortOption::new(field, label));
        self
    }

    /// Sets the initial sort.
    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    /// Sets the initial page size.
    pub fn default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Looks up a facet by key.
    pub fn find_facet(&self, key: &str) -> Option<&FacetFilterConfig> {
        self.facets.iter().find(|f| f.key == key)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(SeekerError::ZeroPageSize);
        }
        self.check_sort(&self.default_sort)
    }

    /// Checks that facet selections only name configured facets.
    pub fn check_filters(&self, filters: &ActiveFilters) -> Result<()> {
        for (key, _) in filters.constraints() {
            if self.find_facet(key).is_none() {
                return Err(SeekerError::UnknownFacet {
                    key: key.to_string(),
                    available: join_or_none(self.facets.iter().map(|f| f.key.as_str())),
                });
            }
        }
        Ok(())
    }

    /// Checks that a sort spec uses one of the sortable columns.
    ///
    /// An unset spec is always accepted. A list without sort options
    /// accepts any field.
    pub fn check_sort(&self, sort: &SortSpec) -> Result<()> {
        match sort.active_field() {
            Some(field)
                if !self.sort_options.is_empty()
                    && !self.sort_options.iter().any(|o| o.field == field) =>
            {
                Err(SeekerError::UnknownSortField {
                    field: field.to_string(),
                    available: join_or_none(self.sort_options.iter().map(|o| o.field.as_str())),
                })
            }
            _ => Ok(()),
        }
    }
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_list() -> ListConfig {
        ListConfig::new()
            .search_fields(["name", "email"])
            .facet(
                FacetFilterConfig::new("status", "Status")
                    .option("active", "Active")
                    .option("inactive", "Inactive"),
            )
            .sort_option("name", "Name")
            .sort_option("created_at", "Created")
            .default_sort(SortSpec::asc("name"))
    }

    #[test]
    fn valid_config_passes() {
        assert!(client_list().validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = client_list().default_page_size(0);
        assert_eq!(config.validate(), Err(SeekerError::ZeroPageSize));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = client_list()
            .check_sort(&SortSpec::desc("revenue"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown sort field 'revenue' (available: name, created_at)"
        );
        assert!(client_list().check_sort(&SortSpec::none()).is_ok());
    }

    #[test]
    fn unknown_facet_is_rejected() {
        let filters = ActiveFilters::new().with("industry", ["tech"]);
        let err = client_list().check_filters(&filters).unwrap_err();
        assert!(matches!(err, SeekerError::UnknownFacet { .. }));

        // An empty selection names nothing.
        let empty = ActiveFilters::new().with("industry", Vec::<String>::new());
        assert!(client_list().check_filters(&empty).is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ListConfig = serde_json::from_str(
            r#"{ "search_fields": ["name"], "default_sort": { "field": "name", "dir": "descending" } }"#,
        )
        .unwrap();
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.default_sort, SortSpec::desc("name"));
        assert!(config.facets.is_empty());
    }
}
