//! Shared application state

use frogcheck_classifiers::RequestPipeline;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::storage::ObjectFetcher;

/// State handed to every handler; cloning is cheap
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RequestPipeline,
    pub storage: Option<Arc<dyn ObjectFetcher>>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        pipeline: RequestPipeline,
        storage: Option<Arc<dyn ObjectFetcher>>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            pipeline,
            storage,
            metrics_handle,
        }
    }
}
