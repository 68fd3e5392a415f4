//! Skimmer: a priority-driven storefront scraper
//!
//! This crate implements a sequential web crawler that dispatches fetched
//! pages to registered page types, follows the links they extract, and hands
//! selected results to a pluggable sink.

pub mod config;
pub mod crawler;
pub mod job;
pub mod pages;
pub mod registry;
pub mod sink;

use thiserror::Error;

/// Main error type for Skimmer operations
#[derive(Debug, Error)]
pub enum SkimmerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Skimmer operations
pub type Result<T> = std::result::Result<T, SkimmerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlStats, Fetcher, RetryPolicy};
pub use job::{Job, JobResult, JobStatus, Method};
pub use registry::{PageType, Registry};
pub use sink::ResultProcessor;
