//! Server configuration
//!
//! Layered lowest to highest: built-in defaults, optional YAML file,
//! `FROGCHECK__*` environment variables, CLI flags.

use anyhow::Context;
use frogcheck_classifiers::ClassifierBackendConfig;
use frogcheck_core::ProcessingConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::cli::Cli;

/// Environment variable prefix, with `__` separating nested keys
pub const ENV_PREFIX: &str = "FROGCHECK";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Pipeline limits and thresholds
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Classifier backend
    #[serde(default)]
    pub classifier: ClassifierBackendConfig,

    /// Object storage; `/classify-object` answers 503 when absent
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

/// S3-compatible object storage settings.
///
/// Credentials come from the standard AWS provider chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Region override
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,
}

impl ServerConfig {
    /// Load configuration from file, environment, and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", config_path))?;

        let mut config: ServerConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(url) = &cli.classifier_url {
            config.classifier = config.classifier.with_endpoint(url.clone());
        }

        config.processing.validate()?;
        Ok(config)
    }

    /// Socket address to bind
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.listen, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.listen, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            processing: ProcessingConfig::default(),
            classifier: ClassifierBackendConfig::default(),
            storage: None,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
