//! Shared models and configuration for the LinkedIn social-data connector.
//!
//! Holds the per-account [`EngineConfiguration`], the per-feed
//! [`FeedConfiguration`], environment-driven [`AppConfig`] loading, the
//! `feeds.yaml` loader and the JSON-backed [`EngineStore`].

pub mod app_config;
pub mod config;
pub mod engine;
pub mod feed;
pub mod feeds;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine::EngineConfiguration;
pub use feed::{FeedConfiguration, DEFAULT_FETCH_LIMIT, LIMIT_UI_MAX, LIMIT_UI_MIN};
pub use feeds::{load_feeds, FeedEntry, FeedsFile};
pub use store::EngineStore;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(#[source] serde_yaml::Error),

    #[error("engine store I/O error at {path}: {source}")]
    EngineStoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine store at {path} is not valid JSON: {source}")]
    EngineStoreParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors raised by configuration models on structurally invalid input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
