//! Job queue and visited set
//!
//! The queue owns both halves of the crawl state: the pending jobs and the
//! set of every URL ever enqueued. Offering a job and recording it as
//! visited happen in one step, so a URL can never be enqueued twice across
//! the life of a run, no matter how many pages rediscover it.

use crate::job::{Job, JobStatus};
use std::collections::{HashSet, VecDeque};

/// Priority-ordered job queue with built-in URL deduplication
#[derive(Default)]
pub struct JobQueue {
    jobs: VecDeque<Job>,
    visited: HashSet<String>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a job to the queue
    ///
    /// Returns false without enqueuing when the URL has already been
    /// enqueued at any point during the run.
    pub fn offer(&mut self, job: Job) -> bool {
        if !self.visited.insert(job.url.clone()) {
            tracing::trace!("Skipping already visited URL {}", job.url);
            return false;
        }
        self.jobs.push_back(job);
        true
    }

    /// Removes and returns the next pending job
    ///
    /// The queue is re-sorted by priority (descending, ties keeping their
    /// insertion order) before dequeuing. Jobs whose status is no longer
    /// `Pending` are discarded, not re-queued; the skip loop terminates when
    /// a pending job is found or the queue is exhausted.
    pub fn next_pending(&mut self) -> Option<Job> {
        self.jobs
            .make_contiguous()
            .sort_by(|a, b| b.priority.cmp(&a.priority));

        while let Some(job) = self.jobs.pop_front() {
            if job.status == JobStatus::Pending {
                return Some(job);
            }
            tracing::trace!("Discarding job {} with status {:?}", job.url, job.status);
        }
        None
    }

    /// Whether the URL has ever been enqueued
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_and_dequeue() {
        let mut queue = JobQueue::new();
        assert!(queue.offer(Job::get("https://shop.test/")));
        assert_eq!(queue.len(), 1);

        let job = queue.next_pending().unwrap();
        assert_eq!(job.url, "https://shop.test/");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_offer_rejects_visited_url() {
        let mut queue = JobQueue::new();
        assert!(queue.offer(Job::get("https://shop.test/")));
        assert!(!queue.offer(Job::get("https://shop.test/")));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_visited_survives_dequeue() {
        let mut queue = JobQueue::new();
        queue.offer(Job::get("https://shop.test/"));
        queue.next_pending();

        // Still rejected even though the job left the queue.
        assert!(!queue.offer(Job::get("https://shop.test/")));
        assert!(queue.is_visited("https://shop.test/"));
    }

    #[test]
    fn test_priority_ordering_with_stable_ties() {
        let mut queue = JobQueue::new();
        queue.offer(Job::get("https://shop.test/first-zero").with_priority(0));
        queue.offer(Job::get("https://shop.test/one").with_priority(1));
        queue.offer(Job::get("https://shop.test/two").with_priority(2));
        queue.offer(Job::get("https://shop.test/second-zero").with_priority(0));

        let order: Vec<String> = std::iter::from_fn(|| queue.next_pending())
            .map(|job| job.url)
            .collect();

        assert_eq!(
            order,
            vec![
                "https://shop.test/two",
                "https://shop.test/one",
                "https://shop.test/first-zero",
                "https://shop.test/second-zero",
            ]
        );
    }

    #[test]
    fn test_skips_non_pending_jobs() {
        let mut queue = JobQueue::new();

        let mut done = Job::get("https://shop.test/done");
        done.status = JobStatus::Done;
        queue.offer(done);
        queue.offer(Job::get("https://shop.test/pending"));

        let job = queue.next_pending().unwrap();
        assert_eq!(job.url, "https://shop.test/pending");

        // The done job was discarded, not re-queued.
        assert!(queue.next_pending().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_queue_returns_none() {
        let mut queue = JobQueue::new();
        assert!(queue.next_pending().is_none());
    }

    #[test]
    fn test_sort_happens_before_each_dequeue() {
        let mut queue = JobQueue::new();
        queue.offer(Job::get("https://shop.test/low").with_priority(0));
        queue.offer(Job::get("https://shop.test/mid").with_priority(1));

        assert_eq!(queue.next_pending().unwrap().url, "https://shop.test/mid");

        // A higher-priority job arriving later overtakes the remaining one.
        queue.offer(Job::get("https://shop.test/high").with_priority(5));
        assert_eq!(queue.next_pending().unwrap().url, "https://shop.test/high");
        assert_eq!(queue.next_pending().unwrap().url, "https://shop.test/low");
    }
}
