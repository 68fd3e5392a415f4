//! Configuration loading and validation
//!
//! Settings come from an optional TOML file with kebab-case keys; every key
//! has a default, so the crawler runs without any config file at all.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig};
