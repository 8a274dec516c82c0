//! Shared data model and configuration for newsgenie.
//!
//! Holds the [`Article`] record that flows through the pipeline, the closed
//! [`Category`] taxonomy, [`Sentiment`] values, the feed [`SourceRegistry`],
//! and env-driven [`AppConfig`] loading.

mod app_config;
mod article;
mod config;
mod sources;

use thiserror::Error;

pub use app_config::AppConfig;
pub use article::{Article, Category, Sentiment, SentimentLabel};
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{load_sources, parse_sources, SourceConfig, SourceRegistry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
