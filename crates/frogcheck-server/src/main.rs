//! FrogCheck Server
//!
//! Classifies whether an uploaded image depicts a frog.

use anyhow::Result;
use clap::Parser;
use frogcheck_classifiers::{build_classifier, RequestPipeline};
use frogcheck_server::{create_router, AppState, Cli, ObjectFetcher, S3ObjectFetcher, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    info!("Starting FrogCheck server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Target labels: {}", config.processing.target_labels.join(", "));
    info!("Decision threshold: {}", config.processing.decision_threshold);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Build the classifier and pipeline
    let classifier = build_classifier(&config.classifier, config.processing.jpeg_quality)?;
    let pipeline = RequestPipeline::new(Arc::new(config.processing.clone()), classifier)?;

    let storage: Option<Arc<dyn ObjectFetcher>> = match &config.storage {
        Some(storage) => Some(Arc::new(S3ObjectFetcher::from_config(storage).await)),
        None => {
            warn!("No object storage configured; /classify-object will answer 503");
            None
        }
    };

    let state = AppState::new(pipeline, storage, metrics_handle);
    let app = create_router(state);

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("frogcheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frogcheck=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    frogcheck_telemetry::describe_metrics();

    info!("Metrics exporter initialized");
    Ok(handle)
}
