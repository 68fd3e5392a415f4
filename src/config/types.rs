use serde::Deserialize;

/// Main configuration structure for Skimmer
///
/// Every table and key is optional; an absent config file means defaults
/// throughout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Fetch retry and backoff configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Retry bound for both retry dimensions of a fetch
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// First wait before a retry, in milliseconds
    #[serde(rename = "initial-backoff-ms", default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Added to the wait after every sleep, in milliseconds
    #[serde(rename = "backoff-increment-ms", default = "default_backoff_ms")]
    pub backoff_increment_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            initial_backoff_ms: default_backoff_ms(),
            backoff_increment_ms: default_backoff_ms(),
        }
    }
}

/// Output paths for the product sink
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON records file
    #[serde(rename = "json-path", default = "default_json_path")]
    pub json_path: String,

    /// Path of the CSV records file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            csv_path: default_csv_path(),
        }
    }
}

fn default_retries() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    5000
}

fn default_json_path() -> String {
    "./scraped_data/products.json".to_string()
}

fn default_csv_path() -> String {
    "./scraped_data/products.csv".to_string()
}
