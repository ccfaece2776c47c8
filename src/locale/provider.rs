//! Locale-bound dataset provider.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use serde_json::Value;

use super::{DatasetLoader, Locale};
use crate::error::GenResult;

/// A named dataset bound to a locale.
///
/// The provider owns a private copy of the dataset, so
/// [`update_dataset`](Self::update_dataset) never touches the loader's
/// backing store.
#[derive(Clone)]
pub struct DataProvider {
    name: &'static str,
    locale: Locale,
    dataset: Value,
    loader: Arc<dyn DatasetLoader>,
}

impl DataProvider {
    /// Load dataset `name` for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GenerationError::UnsupportedLocale`] if the
    /// locale has no such dataset.
    pub fn new(name: &'static str, locale: Locale, loader: Arc<dyn DatasetLoader>) -> GenResult<Self> {
        let dataset = loader.load(locale, name)?;
        Ok(Self {
            name,
            locale,
            dataset,
            loader,
        })
    }

    /// Dataset name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Current dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Value {
        &self.dataset
    }

    /// Nested value at `keys`, or `None` if any key is missing.
    #[must_use]
    pub fn extract(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(&self.dataset, |node, key| node.get(*key))
    }

    /// Merge `data` over the current dataset. Objects merge recursively,
    /// everything else is replaced.
    pub fn update_dataset(&mut self, data: Value) {
        merge_json(&mut self.dataset, data);
    }

    /// Switch to `locale` for the lifetime of the returned guard.
    ///
    /// The original locale and dataset are restored when the guard is
    /// dropped, on every exit path. If the new dataset cannot be loaded the
    /// provider is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GenerationError::UnsupportedLocale`] if the
    /// locale has no dataset.
    pub fn override_locale(&mut self, locale: Locale) -> GenResult<LocaleOverride<'_>> {
        let dataset = self.loader.load(locale, self.name)?;
        let original_locale = std::mem::replace(&mut self.locale, locale);
        let original_dataset = std::mem::replace(&mut self.dataset, dataset);

        Ok(LocaleOverride {
            provider: self,
            original: Some((original_locale, original_dataset)),
        })
    }

    /// Run `f` with `locale` in effect, restoring the original afterwards.
    ///
    /// # Errors
    ///
    /// Returns the override error, or whatever `f` returns.
    pub fn with_locale<T>(
        &mut self,
        locale: Locale,
        f: impl FnOnce(&mut Self) -> GenResult<T>,
    ) -> GenResult<T> {
        let mut guard = self.override_locale(locale)?;
        f(&mut *guard)
    }
}

/// Guard returned by [`DataProvider::override_locale`].
pub struct LocaleOverride<'a> {
    provider: &'a mut DataProvider,
    original: Option<(Locale, Value)>,
}

impl Deref for LocaleOverride<'_> {
    type Target = DataProvider;

    fn deref(&self) -> &Self::Target {
        self.provider
    }
}

impl DerefMut for LocaleOverride<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.provider
    }
}

impl Drop for LocaleOverride<'_> {
    fn drop(&mut self) {
        if let Some((locale, dataset)) = self.original.take() {
            self.provider.locale = locale;
            self.provider.dataset = dataset;
        }
    }
}

/// Recursively merge `other` into `target`.
pub fn merge_json(target: &mut Value, other: Value) {
    match (target, other) {
        (Value::Object(target), Value::Object(other)) => {
            for (key, value) in other {
                match target.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_json(existing, value);
                    }
                    Some(existing) => *existing = value,
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, other) => *target = other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::locale::InMemoryDatasetLoader;
    use serde_json::json;

    fn loader() -> Arc<dyn DatasetLoader> {
        Arc::new(
            InMemoryDatasetLoader::new()
                .with_dataset(
                    Locale::En,
                    "person",
                    json!({"names": {"male": ["John"], "female": ["Mary"]}, "title": "Mr"}),
                )
                .with_dataset(Locale::Ru, "person", json!({"names": {"male": ["Ivan"]}})),
        )
    }

    #[test]
    fn test_extract_nested() {
        let provider = DataProvider::new("person", Locale::En, loader()).unwrap();
        assert_eq!(provider.extract(&["names", "male", "0"]), None);
        assert_eq!(provider.extract(&["names", "male"]), Some(&json!(["John"])));
        assert_eq!(provider.extract(&["missing", "key"]), None);
    }

    #[test]
    fn test_update_dataset_merges_recursively() {
        let mut provider = DataProvider::new("person", Locale::En, loader()).unwrap();
        provider.update_dataset(json!({"names": {"male": ["Bob"]}, "extra": true}));

        assert_eq!(provider.extract(&["names", "male"]), Some(&json!(["Bob"])));
        assert_eq!(provider.extract(&["names", "female"]), Some(&json!(["Mary"])));
        assert_eq!(provider.extract(&["extra"]), Some(&json!(true)));
    }

    #[test]
    fn test_override_locale_restores_on_drop() {
        let mut provider = DataProvider::new("person", Locale::En, loader()).unwrap();
        {
            let guard = provider.override_locale(Locale::Ru).unwrap();
            assert_eq!(guard.locale(), Locale::Ru);
            assert_eq!(guard.extract(&["names", "male"]), Some(&json!(["Ivan"])));
        }
        assert_eq!(provider.locale(), Locale::En);
        assert_eq!(provider.extract(&["names", "male"]), Some(&json!(["John"])));
    }

    #[test]
    fn test_override_locale_restores_after_error() {
        let mut provider = DataProvider::new("person", Locale::En, loader()).unwrap();
        let result: GenResult<()> = provider.with_locale(Locale::Ru, |inner| {
            inner.update_dataset(json!({"names": {"male": ["Oleg"]}}));
            Err(GenerationError::EmptyChoice)
        });

        assert_eq!(result, Err(GenerationError::EmptyChoice));
        assert_eq!(provider.locale(), Locale::En);
        assert_eq!(provider.extract(&["names", "male"]), Some(&json!(["John"])));
    }

    #[test]
    fn test_failed_override_leaves_provider_untouched() {
        let mut provider = DataProvider::new("person", Locale::En, loader()).unwrap();
        assert!(matches!(
            provider.override_locale(Locale::Ja),
            Err(GenerationError::UnsupportedLocale(_))
        ));
        assert_eq!(provider.locale(), Locale::En);
    }
}
