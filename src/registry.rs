//! Page-type registry
//!
//! A page type bundles a URL matcher, a link-extraction strategy, a
//! forward-to-sink flag, and a priority weight. The registry is populated by
//! explicit registration calls at startup and is read-only afterwards;
//! resolution walks the page types in registration order and the first match
//! wins. Overlapping URL spaces are the registrant's responsibility — the
//! registry does not detect conflicts.

use crate::job::{Job, JobResult};

/// A registered strategy for one kind of page
pub trait PageType {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns true when this page type claims the URL
    fn matches(&self, url: &str) -> bool;

    /// Scans a fetched result for follow-up work
    ///
    /// Implementations filter extracted links to their allow-list, apply
    /// their own landing-page exclusions, deduplicate within the single
    /// call, and assign each new job's priority via
    /// [`Registry::priority_for`]. A result without a usable body yields an
    /// empty vector.
    fn find_new_jobs(&self, result: &JobResult, registry: &Registry) -> Vec<Job>;

    /// Whether results of this page type are handed to the result processor
    fn forwards_results(&self) -> bool {
        false
    }

    /// Priority assigned to jobs whose URL resolves to this page type
    fn priority_weight(&self) -> i32 {
        0
    }
}

/// Ordered collection of page types, resolved first-match-wins
#[derive(Default)]
pub struct Registry {
    page_types: Vec<Box<dyn PageType>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page type; registration order is the resolution order
    pub fn register<P: PageType + 'static>(&mut self, page_type: P) {
        self.page_types.push(Box::new(page_type));
    }

    /// Returns the first registered page type whose matcher accepts the URL
    pub fn resolve(&self, url: &str) -> Option<&dyn PageType> {
        self.page_types
            .iter()
            .find(|page_type| page_type.matches(url))
            .map(|page_type| page_type.as_ref())
    }

    /// Priority weight of the resolving page type, or 0 when none matches
    pub fn priority_for(&self, url: &str) -> i32 {
        self.resolve(url)
            .map(|page_type| page_type.priority_weight())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.page_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_types.is_empty()
    }
}
