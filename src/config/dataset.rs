//! Dataset configuration.

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

/// Locale dataset configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding `<locale>/<name>.json` files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DatasetConfig {
    /// Validate the dataset configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `data_dir` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "dataset.data_dir cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
