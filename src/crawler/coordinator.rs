//! Crawl orchestration
//!
//! The [`Crawler`] owns the job queue, the visited set (via the queue), the
//! fetcher, and the optional result processor, and drives the run loop:
//! dequeue the highest-priority pending job, resolve its page type, fetch,
//! extract follow-up jobs, forward the result when the page type asks for
//! it, and stop when the queue runs dry — the sole termination condition.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::queue::JobQueue;
use crate::job::{Job, JobStatus};
use crate::registry::Registry;
use crate::sink::ResultProcessor;
use crate::SkimmerError;

/// Run state of the crawl loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlStats {
    /// Jobs fetched and routed to completion
    pub jobs_processed: u64,
    /// Jobs dropped because no page type matched their URL
    pub jobs_dropped: u64,
    /// Results successfully handed to the processor
    pub results_forwarded: u64,
}

/// Sequential crawl orchestrator
pub struct Crawler {
    registry: Registry,
    fetcher: Fetcher,
    queue: JobQueue,
    processor: Option<Box<dyn ResultProcessor>>,
    state: RunState,
}

impl Crawler {
    pub fn new(registry: Registry, fetcher: Fetcher) -> Self {
        Self {
            registry,
            fetcher,
            queue: JobQueue::new(),
            processor: None,
            state: RunState::Stopped,
        }
    }

    /// Attaches the result processor forwarded results are handed to
    pub fn with_processor(mut self, processor: Box<dyn ResultProcessor>) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Offers a job to the queue, recording its URL as visited
    ///
    /// Returns false when the URL was already enqueued at some point. Seeds
    /// go through the same gate as extracted links, so extraction can never
    /// re-enqueue the seed.
    pub fn enqueue(&mut self, job: Job) -> bool {
        self.queue.offer(job)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the crawl to completion
    ///
    /// Enters the loop immediately and returns once the queue is observed
    /// empty. The processor's `finalize` is invoked exactly once after the
    /// loop stops.
    pub async fn start(&mut self) -> Result<CrawlStats, SkimmerError> {
        self.state = RunState::Running;
        let stats = self.run().await;

        if let Some(processor) = self.processor.as_mut() {
            processor.finalize()?;
        }

        Ok(stats)
    }

    async fn run(&mut self) -> CrawlStats {
        let mut stats = CrawlStats::default();
        let started = std::time::Instant::now();

        while self.state == RunState::Running {
            let Some(job) = self.queue.next_pending() else {
                tracing::info!("Job queue drained, shutting down");
                self.state = RunState::Stopped;
                break;
            };

            // An open-world crawl reaches URLs nothing claims; dropping them
            // is a normal outcome, not an error. No fetch is made.
            let Some(page_type) = self.registry.resolve(&job.url) else {
                tracing::debug!("No page type matches {}, dropping job", job.url);
                stats.jobs_dropped += 1;
                continue;
            };

            tracing::debug!("Dispatching {} as page type {}", job.url, page_type.name());
            let mut result = self.fetcher.execute(job).await;

            // Extraction and visited-set deduplication happen before the
            // queue is offered anything, so a URL discovered twice in one
            // page, or by several pages, is enqueued once.
            for new_job in page_type.find_new_jobs(&result, &self.registry) {
                self.queue.offer(new_job);
            }

            if page_type.forwards_results() {
                if let Some(processor) = self.processor.as_mut() {
                    match processor.process(&result) {
                        Ok(()) => stats.results_forwarded += 1,
                        Err(err) => {
                            tracing::warn!(
                                "Result processor failed for {}: {}",
                                result.job.url,
                                err
                            );
                        }
                    }
                }
            }

            result.job.status = JobStatus::Done;
            stats.jobs_processed += 1;

            if stats.jobs_processed % 10 == 0 {
                tracing::info!(
                    "Progress: {} jobs processed, {} queued, elapsed {:?}",
                    stats.jobs_processed,
                    self.queue.len(),
                    started.elapsed()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} processed, {} dropped, {} forwarded in {:?}",
            stats.jobs_processed,
            stats.jobs_dropped,
            stats.results_forwarded,
            started.elapsed()
        );

        stats
    }
}
