//! Dataset loaders.
//!
//! Datasets are JSON documents addressed by locale and dataset name. The
//! generators only read them; overrides are applied to a provider's private
//! copy (see [`super::DataProvider`]).

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use super::Locale;
use crate::error::{GenResult, GenerationError};

/// Read-only access to locale datasets.
pub trait DatasetLoader: Send + Sync {
    /// Load the dataset `name` for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnsupportedLocale`] if the locale has no
    /// such dataset, or [`GenerationError::Dataset`] if it cannot be read.
    fn load(&self, locale: Locale, name: &str) -> GenResult<Value>;
}

/// Loads `<root>/<locale>/<name>.json` and caches parsed documents.
pub struct FileDatasetLoader {
    root: PathBuf,
    cache: RwLock<HashMap<(Locale, String), Value>>,
}

impl FileDatasetLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Root directory of the datasets.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, locale: Locale, name: &str) -> PathBuf {
        self.root.join(locale.code()).join(format!("{name}.json"))
    }
}

impl DatasetLoader for FileDatasetLoader {
    fn load(&self, locale: Locale, name: &str) -> GenResult<Value> {
        let key = (locale, name.to_string());
        if let Some(value) = self.cache.read().get(&key) {
            return Ok(value.clone());
        }

        let path = self.path_for(locale, name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(GenerationError::UnsupportedLocale(locale.code().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let value: Value = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Dataset loaded");

        self.cache.write().insert(key, value.clone());
        Ok(value)
    }
}

/// Datasets held in memory, keyed by locale and name.
#[derive(Default)]
pub struct InMemoryDatasetLoader {
    datasets: RwLock<HashMap<(Locale, String), Value>>,
}

impl InMemoryDatasetLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_dataset(self, locale: Locale, name: &str, value: Value) -> Self {
        self.insert(locale, name, value);
        self
    }

    /// Add or replace a dataset.
    pub fn insert(&self, locale: Locale, name: &str, value: Value) {
        self.datasets.write().insert((locale, name.to_string()), value);
    }
}

impl DatasetLoader for InMemoryDatasetLoader {
    fn load(&self, locale: Locale, name: &str) -> GenResult<Value> {
        self.datasets
            .read()
            .get(&(locale, name.to_string()))
            .cloned()
            .ok_or_else(|| GenerationError::UnsupportedLocale(locale.code().to_string()))
    }
}
