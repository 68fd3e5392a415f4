//! Crawl core: queue, fetcher, and orchestration
//!
//! This module contains the crawl loop and its moving parts:
//! - the priority job queue with visited-set deduplication
//! - the HTTP fetcher with bounded retries and escalating backoff
//! - link scanning for fetched pages
//! - the coordinator that ties them together

mod backoff;
mod coordinator;
mod fetcher;
mod parser;
mod queue;

pub use coordinator::{CrawlStats, Crawler, RunState};
pub use fetcher::{build_http_client, Fetcher, RetryPolicy};
pub use parser::extract_links;
pub use queue::JobQueue;
