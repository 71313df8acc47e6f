//! Classifier backend configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which classifier backend serves inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifierBackendConfig {
    /// HTTP inference server
    Remote {
        /// Prediction endpoint URL
        endpoint: String,

        /// Request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Fixed label scores, for local smoke runs
    Static {
        #[serde(default)]
        scores: BTreeMap<String, f32>,
    },
}

impl Default for ClassifierBackendConfig {
    fn default() -> Self {
        Self::Remote {
            endpoint: "http://127.0.0.1:9000/predict".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierBackendConfig {
    /// Point the backend at a remote endpoint, keeping any configured timeout
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        let timeout_secs = match self {
            Self::Remote { timeout_secs, .. } => timeout_secs,
            Self::Static { .. } => default_timeout_secs(),
        };
        Self::Remote {
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
