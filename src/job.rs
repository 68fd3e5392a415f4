//! Job and result model
//!
//! A [`Job`] is one unit of crawl work; a [`JobResult`] is the outcome of
//! executing it. Jobs are created either as the seed (by the caller) or by a
//! page type's link extraction, and move through their lifecycle exactly
//! once: `Pending` on creation, `InProgress` when the fetcher picks them up,
//! `Done` after the orchestrator has routed the result.

use scraper::Html;
use serde_json::{Map, Value};
use std::fmt;

/// HTTP request verb for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Lifecycle status of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Waiting in the queue
    Pending,
    /// Picked up by the fetcher
    InProgress,
    /// Result has been routed; never re-enqueued
    Done,
}

/// One unit of crawl work
///
/// The URL doubles as the deduplication key and is never mutated after
/// creation. `priority` is assigned at creation time by whichever page type
/// discovered the URL; higher values are dequeued first.
#[derive(Debug, Clone)]
pub struct Job {
    pub url: String,
    pub method: Method,
    /// Request body, present only for POST jobs
    pub payload: Option<Map<String, Value>>,
    pub status: JobStatus,
    pub priority: i32,
}

impl Job {
    /// Creates a pending GET job with default priority
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            payload: None,
            status: JobStatus::Pending,
            priority: 0,
        }
    }

    /// Creates a pending POST job carrying a request payload
    pub fn post(url: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            url: url.into(),
            method: Method::Post,
            payload: Some(payload),
            status: JobStatus::Pending,
            priority: 0,
        }
    }

    /// Sets the priority, consuming and returning the job
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Outcome of executing one job
///
/// `body` and `status_code` are present if and only if any HTTP response was
/// received — a 4xx/5xx response still carries both. Only a connection
/// failure on every attempt leaves them absent.
#[derive(Debug)]
pub struct JobResult {
    /// The originating job
    pub job: Job,
    /// Raw response payload of the final attempt
    pub body: Option<Vec<u8>>,
    /// HTTP status of the final attempt
    pub status_code: Option<u16>,
    /// Epoch seconds at completion
    pub fetched_at: i64,
}

impl JobResult {
    /// Returns true when the final attempt produced a 2xx response with a body
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(code) if (200..300).contains(&code)) && self.body.is_some()
    }

    /// Parses the body as an HTML document when the fetch succeeded
    ///
    /// Returns `None` for failed or non-2xx results — "no content to parse"
    /// is an expected outcome, not an error.
    pub fn html(&self) -> Option<Html> {
        if !self.is_success() {
            return None;
        }
        let body = self.body.as_deref()?;
        Some(Html::parse_document(&String::from_utf8_lossy(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(status_code: Option<u16>, body: Option<&str>) -> JobResult {
        JobResult {
            job: Job::get("https://example.test/"),
            body: body.map(|b| b.as_bytes().to_vec()),
            status_code,
            fetched_at: 0,
        }
    }

    #[test]
    fn test_get_job_defaults() {
        let job = Job::get("https://example.test/");
        assert_eq!(job.method, Method::Get);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.priority, 0);
        assert!(job.payload.is_none());
    }

    #[test]
    fn test_post_job_carries_payload() {
        let mut payload = Map::new();
        payload.insert("page".to_string(), Value::from(2));

        let job = Job::post("https://example.test/search", payload);
        assert_eq!(job.method, Method::Post);
        assert!(job.payload.is_some());
    }

    #[test]
    fn test_with_priority() {
        let job = Job::get("https://example.test/").with_priority(2);
        assert_eq!(job.priority, 2);
    }

    #[test]
    fn test_html_on_success() {
        let result = result_with(Some(200), Some("<html><body><p>hi</p></body></html>"));
        assert!(result.is_success());
        assert!(result.html().is_some());
    }

    #[test]
    fn test_html_absent_on_server_error() {
        let result = result_with(Some(500), Some("internal error"));
        assert!(!result.is_success());
        assert!(result.html().is_none());
    }

    #[test]
    fn test_html_absent_on_connection_failure() {
        let result = result_with(None, None);
        assert!(!result.is_success());
        assert!(result.html().is_none());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
