//! FrogCheck Telemetry
//!
//! Pipeline outcome metrics. Counters are mirrored to the `metrics` facade so
//! whichever recorder the binary installs (Prometheus in production) sees
//! them, and kept in process-local atomics for snapshots.

pub mod metrics;

pub use crate::metrics::{describe_metrics, MetricsSnapshot, PipelineMetrics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsSnapshot, PipelineMetrics};
}
