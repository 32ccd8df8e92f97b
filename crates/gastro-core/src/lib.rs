//! Shared domain types and configuration for GastroAI.

pub mod app_config;
pub mod config;
pub mod feedback;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use feedback::{load_feedback, Feedback, FeedbackFile, Sentiment};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feedback file {path}: {source}")]
    FeedbackFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feedback file: {0}")]
    FeedbackFileParse(#[from] serde_yaml::Error),

    #[error("feedback validation failed: {0}")]
    Validation(String),
}
