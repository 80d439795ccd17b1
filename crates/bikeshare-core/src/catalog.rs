//! Mapping from city identifiers to trip-log source files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ExplorerError, Result};

/// Built-in city sources, relative to the data directory.
pub const DEFAULT_SOURCES: [(&str, &str); 3] = [
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Read-only mapping of lower-case city names to source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityCatalog {
    entries: BTreeMap<String, PathBuf>,
}

impl CityCatalog {
    /// The built-in catalog rooted at `data_dir`.
    pub fn builtin(data_dir: &Path) -> Self {
        Self::from_entries(
            DEFAULT_SOURCES
                .iter()
                .map(|(name, file)| (name.to_string(), PathBuf::from(file))),
            data_dir,
        )
    }

    /// Build a catalog from `(name, path)` pairs.
    ///
    /// Names are trimmed and lower-cased; relative paths are joined onto
    /// `data_dir`.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, PathBuf)>,
        data_dir: &Path,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, path)| {
                let path = if path.is_relative() {
                    data_dir.join(path)
                } else {
                    path
                };
                (name.trim().to_lowercase(), path)
            })
            .collect();
        Self { entries }
    }

    /// Load a JSON catalog file of the form `{"chicago": "chicago.csv", ...}`.
    pub fn load_from(path: &Path, data_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExplorerError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: BTreeMap<String, PathBuf> =
            serde_json::from_str(&content).map_err(|source| ExplorerError::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded {} catalog entries from {}", raw.len(), path.display());
        Ok(Self::from_entries(raw, data_dir))
    }

    /// Source path for `city`.
    pub fn resolve(&self, city: &str) -> Result<&Path> {
        self.entries
            .get(city)
            .map(PathBuf::as_path)
            .ok_or_else(|| ExplorerError::SourceNotFound(city.to_string()))
    }

    /// City identifiers in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose source file does not exist.
    ///
    /// Returns [`ExplorerError::EmptyCatalog`] when nothing is left.
    pub fn retain_available(mut self) -> Result<Self> {
        self.entries.retain(|name, path| {
            let exists = path.is_file();
            if !exists {
                warn!("Source for '{}' not found at {}; skipping", name, path.display());
            }
            exists
        });
        if self.entries.is_empty() {
            return Err(ExplorerError::EmptyCatalog);
        }
        Ok(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_names() {
        let catalog = CityCatalog::builtin(Path::new("/data"));
        assert_eq!(catalog.names(), vec!["chicago", "new york city", "washington"]);
        assert_eq!(
            catalog.resolve("new york city").unwrap(),
            Path::new("/data/new_york_city.csv")
        );
    }

    #[test]
    fn test_resolve_unknown_city() {
        let catalog = CityCatalog::builtin(Path::new("."));
        let err = catalog.resolve("boston").unwrap_err();
        assert!(matches!(err, ExplorerError::SourceNotFound(ref c) if c == "boston"));
    }

    #[test]
    fn test_from_entries_normalises_names_and_keeps_absolute_paths() {
        let catalog = CityCatalog::from_entries(
            vec![
                (" Boston ".to_string(), PathBuf::from("/abs/boston.csv")),
                ("Denver".to_string(), PathBuf::from("denver.csv")),
            ],
            Path::new("/data"),
        );
        assert_eq!(catalog.resolve("boston").unwrap(), Path::new("/abs/boston.csv"));
        assert_eq!(catalog.resolve("denver").unwrap(), Path::new("/data/denver.csv"));
    }

    #[test]
    fn test_load_from_json() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("cities.json");
        std::fs::write(&path, r#"{"portland": "pdx.csv"}"#).expect("write");

        let catalog = CityCatalog::load_from(&path, tmp.path()).expect("load");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("portland").unwrap(), tmp.path().join("pdx.csv"));
    }

    #[test]
    fn test_load_from_invalid_json() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("cities.json");
        std::fs::write(&path, "[not a map").expect("write");

        let err = CityCatalog::load_from(&path, tmp.path()).unwrap_err();
        assert!(matches!(err, ExplorerError::CatalogParse { .. }));
    }

    #[test]
    fn test_retain_available_drops_missing_sources() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("chicago.csv"), "Start Time\n").expect("write");

        let catalog = CityCatalog::builtin(tmp.path())
            .retain_available()
            .expect("one source exists");
        assert_eq!(catalog.names(), vec!["chicago"]);
    }

    #[test]
    fn test_retain_available_empty_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = CityCatalog::builtin(tmp.path()).retain_available().unwrap_err();
        assert!(matches!(err, ExplorerError::EmptyCatalog));
    }
}
