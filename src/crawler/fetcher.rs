//! HTTP fetcher with bounded retries and escalating backoff
//!
//! [`Fetcher::execute`] performs one job's fetch as a two-level retry state
//! machine:
//!
//! - the inner loop re-sends the request while the server responds with a
//!   status other than 200, for up to `retries + 1` attempts, and breaks out
//!   immediately on 200;
//! - the outer loop restarts the inner one when the connection itself fails
//!   (transport error rather than a non-200 response), for up to `retries`
//!   cycles.
//!
//! Whatever response was last received is returned even when it is not a
//! 200; only a transport failure on every attempt yields a result with no
//! body and no status code. Connection errors are logged and swallowed so
//! the crawl loop can continue with the next job.

use crate::config::CrawlerConfig;
use crate::crawler::backoff::Backoff;
use crate::job::{Job, JobResult, JobStatus, Method};
use reqwest::Client;
use std::time::Duration;

/// Retry and backoff parameters for the fetcher
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Bound for both retry dimensions: `retries + 1` inner attempts per
    /// cycle, `retries` outer cycles
    pub retries: u32,
    /// First wait applied when a retry is needed
    pub initial_backoff: Duration,
    /// Added to the wait after every individual sleep
    pub backoff_increment: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            initial_backoff: Duration::from_secs(5),
            backoff_increment: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            retries: config.retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            backoff_increment: Duration::from_millis(config.backoff_increment_ms),
        }
    }
}

/// Builds the HTTP client the fetcher sends requests with
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Executes jobs one at a time, owning the shared backoff counter
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
    backoff: Backoff,
}

impl Fetcher {
    /// Creates a fetcher with a freshly built HTTP client
    pub fn new(policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?, policy))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, policy: RetryPolicy) -> Self {
        let backoff = Backoff::new(policy.initial_backoff, policy.backoff_increment);
        Self {
            client,
            policy,
            backoff,
        }
    }

    /// Fetches one job, consuming it into the returned result
    ///
    /// The backoff counter escalates across every wait this call performs
    /// and is restored to its initial value before returning, whatever the
    /// outcome.
    pub async fn execute(&mut self, mut job: Job) -> JobResult {
        job.status = JobStatus::InProgress;

        let mut last_response: Option<(u16, Vec<u8>)> = None;

        'cycles: for cycle in 0..self.policy.retries {
            for attempt in 0..=self.policy.retries {
                match self.send(&job).await {
                    Ok((status, body)) => {
                        let finished = status == 200 || attempt == self.policy.retries;
                        last_response = Some((status, body));
                        if finished {
                            break 'cycles;
                        }
                        tracing::info!(
                            "Retrying {} request to {} ({}/{})",
                            job.method,
                            job.url,
                            attempt + 1,
                            self.policy.retries
                        );
                        self.pause().await;
                    }
                    Err(err) => {
                        tracing::error!(
                            "Connection error while trying to access {} (cycle {}/{}): {}",
                            job.url,
                            cycle + 1,
                            self.policy.retries,
                            err
                        );
                        self.pause().await;
                        // Abandon this cycle's attempts and start a fresh one
                        continue 'cycles;
                    }
                }
            }
        }

        self.backoff.reset();

        let (status_code, body) = match last_response {
            Some((status, body)) => (Some(status), Some(body)),
            None => (None, None),
        };

        JobResult {
            job,
            body,
            status_code,
            fetched_at: chrono::Utc::now().timestamp(),
        }
    }

    async fn send(&self, job: &Job) -> Result<(u16, Vec<u8>), reqwest::Error> {
        let request = match job.method {
            Method::Get => self.client.get(&job.url),
            Method::Post => {
                let request = self.client.post(&job.url);
                match &job.payload {
                    Some(payload) => request.json(payload),
                    None => request,
                }
            }
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok((status, body))
    }

    async fn pause(&mut self) {
        let delay = self.backoff.next_delay();
        tracing::debug!("Waiting {:?} before next attempt", delay);
        tokio::time::sleep(delay).await;
    }
}
