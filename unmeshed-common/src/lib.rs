use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod types;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use types::*;

/// Error types for Unmeshed client operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmeshedError {
    #[error("Environment variable {0} must be set")]
    MissingEnv(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {0}: {1}")]
    HttpError(u16, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No worker registered for {0}")]
    WorkerNotFound(String),

    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

/// JSON error envelope returned by the engine for error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result type for Unmeshed operations
pub type Result<T> = std::result::Result<T, UnmeshedError>;
