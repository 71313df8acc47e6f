//! FrogCheck Server
//!
//! HTTP surface over the classification pipeline: direct multipart upload,
//! object-storage references, health, and Prometheus metrics.

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;

pub use cli::Cli;
pub use config::{ServerConfig, StorageConfig};
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
pub use storage::{ObjectFetcher, S3ObjectFetcher};
