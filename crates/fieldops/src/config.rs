//! Application configuration.
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! | Variable             | Setting                        |
//! |----------------------|--------------------------------|
//! | `FIELDOPS_DATA`      | path of the store snapshot     |
//! | `FIELDOPS_PREFS`     | path of the preferences file   |
//! | `FIELDOPS_PAGE_SIZE` | page size for every list       |
//!
//! ```yaml
//! data: /var/lib/fieldops/store.json
//! page_size: 20
//! lists:
//!   quotes:
//!     page_size: 50
//!     default_sort: { field: total, dir: desc }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fieldops_seeker::{ListConfig, SortSpec};
use serde::{Deserialize, Serialize};

use crate::entities::EntityKind;
use crate::error::{Error, Result};
use crate::lists;

/// Config file read when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "fieldops.yaml";
const DEFAULT_DATA_FILE: &str = "fieldops.json";
const DEFAULT_PREFS_FILE: &str = "fieldops-prefs.json";

/// Overrides for one list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOverride {
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub default_sort: Option<SortSpec>,
}

/// Settings for the dashboard tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Store snapshot file.
    #[serde(default)]
    pub data: Option<PathBuf>,
    /// Preferences file.
    #[serde(default)]
    pub prefs: Option<PathBuf>,
    /// Page size for lists without their own override.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Per-list overrides keyed by list name (`clients`, `work-orders`, ...).
    #[serde(default)]
    pub lists: BTreeMap<String, ListOverride>,
}

impl AppConfig {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, `fieldops.yaml` in the
    /// working directory is used if present. Environment overrides are
    /// applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => AppConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                AppConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::debug!("no config file, using defaults");
                AppConfig::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = AppConfig::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies environment overrides read through `var`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data) = var("FIELDOPS_DATA") {
            tracing::info!(data = %data, "store path from FIELDOPS_DATA");
            self.data = Some(PathBuf::from(data));
        }
        if let Some(prefs) = var("FIELDOPS_PREFS") {
            self.prefs = Some(PathBuf::from(prefs));
        }
        if let Some(size) = var("FIELDOPS_PAGE_SIZE") {
            match size.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = Some(n),
                _ => tracing::warn!(value = %size, "invalid FIELDOPS_PAGE_SIZE, ignoring"),
            }
        }
    }

    /// Checks page sizes and override keys.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == Some(0) {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        for (name, list) in &self.lists {
            let kind: EntityKind = name
                .parse()
                .map_err(|_| Error::Config(format!("unknown list '{name}' in lists")))?;
            if list.page_size == Some(0) {
                return Err(Error::Config(format!(
                    "lists.{name}.page_size must be at least 1"
                )));
            }
            if let Some(sort) = &list.default_sort {
                lists::config_for(kind).check_sort(sort)?;
            }
        }
        Ok(())
    }

    /// Store snapshot path.
    pub fn data_path(&self) -> PathBuf {
        self.data
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Preferences path; next to the store snapshot unless configured.
    pub fn prefs_path(&self) -> PathBuf {
        self.prefs.clone().unwrap_or_else(|| {
            self.data_path()
                .parent()
                .map(|dir| dir.join(DEFAULT_PREFS_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE))
        })
    }

    fn list_override(&self, kind: EntityKind) -> Option<&ListOverride> {
        self.lists
            .iter()
            .find(|(name, _)| name.parse::<EntityKind>().ok() == Some(kind))
            .map(|(_, list)| list)
    }

    /// The list configuration of a page with overrides applied.
    pub fn list_config(&self, kind: EntityKind) -> ListConfig {
        let mut config = lists::config_for(kind);
        let list = self.list_override(kind);
        if let Some(size) = list.and_then(|l| l.page_size).or(self.page_size) {
            config.default_page_size = size;
        }
        if let Some(sort) = list.and_then(|l| l.default_sort.clone()) {
            config.default_sort = sort;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_seeker::DEFAULT_PAGE_SIZE;
    use tempfile::TempDir;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::default();
        assert_eq!(config.data_path(), PathBuf::from("fieldops.json"));
        assert_eq!(config.prefs_path(), PathBuf::from("fieldops-prefs.json"));
        assert_eq!(
            config.list_config(EntityKind::Clients).default_page_size,
            DEFAULT_PAGE_SIZE
        );
    }

    #[test]
    fn yaml_overrides_lists() {
        let config = AppConfig::from_yaml(
            r#"
data: /srv/fieldops/store.json
page_size: 20
lists:
  work_orders:
    page_size: 50
    default_sort: { field: priority_rank, dir: desc }
"#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.prefs_path(), PathBuf::from("/srv/fieldops/fieldops-prefs.json"));
        let orders = config.list_config(EntityKind::WorkOrders);
        assert_eq!(orders.default_page_size, 50);
        assert_eq!(orders.default_sort, SortSpec::desc("priority_rank"));
        assert_eq!(config.list_config(EntityKind::Quotes).default_page_size, 20);
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig::from_yaml("page_size: 20").unwrap();
        config.apply_env(env(&[
            ("FIELDOPS_DATA", "/tmp/other.json"),
            ("FIELDOPS_PAGE_SIZE", "100"),
        ]));
        assert_eq!(config.data_path(), PathBuf::from("/tmp/other.json"));
        assert_eq!(config.page_size, Some(100));
    }

    #[test]
    fn invalid_env_page_size_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("FIELDOPS_PAGE_SIZE", "zero")]));
        assert_eq!(config.page_size, None);
        config.apply_env(env(&[("FIELDOPS_PAGE_SIZE", "0")]));
        assert_eq!(config.page_size, None);
    }

    #[test]
    fn rejects_bad_overrides() {
        let unknown = AppConfig::from_yaml("lists:\n  invoices:\n    page_size: 5\n").unwrap();
        assert!(matches!(unknown.validate(), Err(Error::Config(_))));

        let bad_sort =
            AppConfig::from_yaml("lists:\n  clients:\n    default_sort: { field: revenue }\n")
                .unwrap();
        assert!(matches!(bad_sort.validate(), Err(Error::Seeker(_))));

        assert!(matches!(
            AppConfig::from_yaml("colour: blue"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
