//! Metrics collection and reporting

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Register descriptions with the installed recorder
pub fn describe_metrics() {
    ::metrics::describe_counter!(
        "frogcheck_requests_total",
        "Total number of classification requests processed"
    );
    ::metrics::describe_counter!(
        "frogcheck_outcomes_total",
        "Classification outcomes by category"
    );
    ::metrics::describe_counter!(
        "frogcheck_decisions_total",
        "Successful classifications by decision"
    );
    ::metrics::describe_histogram!(
        "frogcheck_pipeline_latency_us",
        ::metrics::Unit::Microseconds,
        "End-to-end pipeline latency in microseconds"
    );
    ::metrics::describe_histogram!(
        "frogcheck_classifier_latency_us",
        ::metrics::Unit::Microseconds,
        "Classifier invocation latency in microseconds"
    );
    tracing::debug!("Metric descriptions registered");
}

/// Metrics collector for pipeline outcomes
#[derive(Clone)]
pub struct PipelineMetrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    total_requests: AtomicU64,
    matches: AtomicU64,
    non_matches: AtomicU64,
    failures: AtomicU64,
    total_latency_us: AtomicU64,
    classifier_latency_us: AtomicU64,
}

impl PipelineMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                total_requests: AtomicU64::new(0),
                matches: AtomicU64::new(0),
                non_matches: AtomicU64::new(0),
                failures: AtomicU64::new(0),
                total_latency_us: AtomicU64::new(0),
                classifier_latency_us: AtomicU64::new(0),
            }),
        }
    }

    /// Record a request entering the pipeline
    pub fn record_request(&self) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("frogcheck_requests_total").increment(1);
    }

    /// Record a successful classification
    pub fn record_decision(&self, is_match: bool) {
        if is_match {
            self.inner.matches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.non_matches.fetch_add(1, Ordering::Relaxed);
        }
        ::metrics::counter!("frogcheck_outcomes_total", "outcome" => "success").increment(1);
        ::metrics::counter!(
            "frogcheck_decisions_total",
            "is_frog" => if is_match { "true" } else { "false" }
        )
        .increment(1);
    }

    /// Record a failed request by error category
    pub fn record_failure(&self, kind: &'static str) {
        self.inner.failures.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("frogcheck_outcomes_total", "outcome" => kind).increment(1);
    }

    /// Record end-to-end latency
    pub fn record_latency(&self, latency_us: u64) {
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        ::metrics::histogram!("frogcheck_pipeline_latency_us").record(latency_us as f64);
    }

    /// Record classifier latency
    pub fn record_classifier_latency(&self, latency_us: u64) {
        self.inner
            .classifier_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        ::metrics::histogram!("frogcheck_classifier_latency_us").record(latency_us as f64);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            matches: self.inner.matches.load(Ordering::Relaxed),
            non_matches: self.inner.non_matches.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
            total_latency_us: self.inner.total_latency_us.load(Ordering::Relaxed),
            classifier_latency_us: self.inner.classifier_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub matches: u64,
    pub non_matches: u64,
    pub failures: u64,
    pub total_latency_us: u64,
    pub classifier_latency_us: u64,
}

impl MetricsSnapshot {
    /// Calculate average latency per request
    pub fn avg_latency_us(&self) -> u64 {
        if self.total_requests == 0 {
            0
        } else {
            self.total_latency_us / self.total_requests
        }
    }

    /// Fraction of successful classifications that were a match
    pub fn match_rate(&self) -> f64 {
        let decided = self.matches + self.non_matches;
        if decided == 0 {
            0.0
        } else {
            self.matches as f64 / decided as f64
        }
    }
}
