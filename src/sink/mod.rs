//! Result processor boundary
//!
//! The crawl core hands results of forwarding page types to a
//! [`ResultProcessor`]; what the processor makes of them — field extraction,
//! on-disk formats — is entirely its own concern. The concrete
//! [`ProductSink`] turns product pages into records and persists them as
//! JSON and CSV.

mod product;

pub use product::{extract_product, ProductRecord, ProductSink};

use crate::job::JobResult;
use thiserror::Error;

/// Errors that can occur inside a result processor
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Result for {url} has no parseable body")]
    NoContent { url: String },

    #[error("Missing {field} in product markup for {url}")]
    MissingField { url: String, field: &'static str },
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// External sink consuming forwarded crawl results
///
/// `process` is invoked synchronously, in crawl order, once per forwarded
/// result. Errors are logged by the orchestrator and never abort the crawl;
/// implementations own their error isolation beyond that. `finalize` is
/// invoked exactly once after the crawl loop stops, for batched
/// persistence.
pub trait ResultProcessor {
    fn process(&mut self, result: &JobResult) -> SinkResult<()>;

    fn finalize(&mut self) -> SinkResult<()> {
        Ok(())
    }
}
