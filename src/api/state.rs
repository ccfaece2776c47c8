//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::config::AppConfig;
use crate::locale::{DatasetLoader, FileDatasetLoader};
use crate::service::FieldRegistry;

/// Counter of generated values, labelled by field name.
pub const GENERATED_TOTAL: &str = "datagen_generated_total";

/// Gauge set to 1 while the worker runs.
pub const UP: &str = "datagen_up";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Locale dataset loader.
    pub loader: Arc<dyn DatasetLoader>,
    /// Fields usable in schemas.
    pub registry: Arc<FieldRegistry>,
    /// Prometheus recorder owned by this state.
    recorder: Arc<PrometheusRecorder>,
    /// Renders the recorder for `/metrics`.
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create a new application state reading datasets from
    /// `config.dataset.data_dir`.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let loader: Arc<dyn DatasetLoader> =
            Arc::new(FileDatasetLoader::new(config.dataset.data_dir.clone()));
        Self::with_loader(config, loader)
    }

    /// Create a new application state with a custom dataset loader.
    pub fn with_loader(config: Arc<AppConfig>, loader: Arc<dyn DatasetLoader>) -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let metrics = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::describe_gauge!(UP, "Whether the service is up");
            metrics::describe_counter!(GENERATED_TOTAL, "Values generated per field");
            metrics::gauge!(UP).set(1.0);
        });

        Self {
            config,
            loader,
            registry: Arc::new(FieldRegistry::builtin()),
            recorder: Arc::new(recorder),
            metrics,
        }
    }

    /// Add `count` to the counter of `field`.
    pub fn record_generated(&self, field: &str, count: usize) {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        metrics::with_local_recorder(self.recorder.as_ref(), || {
            metrics::counter!(GENERATED_TOTAL, "field" => field.to_string()).increment(count);
        });
    }
}
