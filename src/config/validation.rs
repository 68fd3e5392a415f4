use crate::config::types::Config;
use crate::{ConfigError, ConfigResult};

/// Validates a parsed configuration
///
/// Rejects values the crawl core cannot operate with: a retry bound of zero
/// would mean the fetcher never attempts a request at all, and a zero
/// backoff increment would make the escalating-delay contract meaningless.
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.crawler.retries == 0 {
        return Err(ConfigError::Validation(
            "crawler.retries must be at least 1".to_string(),
        ));
    }

    if config.crawler.backoff_increment_ms == 0 {
        return Err(ConfigError::Validation(
            "crawler.backoff-increment-ms must be greater than 0".to_string(),
        ));
    }

    if config.output.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.json-path must not be empty".to_string(),
        ));
    }

    if config.output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "output.csv-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
