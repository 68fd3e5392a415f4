//! Storefront page types
//!
//! The concrete page-type set for a webshop rooted at a single URL: the
//! home page, the shop listing pages under `shop/`, and the product pages
//! under `product/`. Product pages forward their results to the sink;
//! priorities make the crawl reach products before listings before
//! everything else.

use crate::crawler::extract_links;
use crate::job::{Job, JobResult};
use crate::registry::{PageType, Registry};
use std::collections::HashSet;
use url::Url;

/// Reduces a seed URL to the site root that bounds extraction
///
/// The root is the seed's origin with a bare `/` path — query and fragment
/// dropped — so any seed inside the site produces the same allow-list.
pub fn site_root(seed: &Url) -> Url {
    let mut root = seed.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

/// Builds the registry for a storefront rooted at `root`
///
/// Registration order is home, listing, product; their URL spaces are
/// disjoint, so first-match resolution is unambiguous here.
pub fn storefront_registry(root: &Url) -> Registry {
    let mut registry = Registry::new();
    registry.register(HomePage::new(root));
    registry.register(ListingPage::new(root));
    registry.register(ProductPage::new(root));
    registry
}

/// Collects in-root link candidates from a result, deduplicated per call
///
/// Returns no candidates when the result has no usable body — a failed
/// fetch is "nothing to parse", not an error. The same URL appearing twice
/// in one page yields one candidate, first occurrence winning.
fn in_root_candidates(result: &JobResult, root: &str, excluded: &[&str]) -> Vec<String> {
    let Some(document) = result.html() else {
        return Vec::new();
    };
    let Ok(base) = Url::parse(&result.job.url) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for link in extract_links(&document, &base) {
        if !link.starts_with(root) || excluded.contains(&link.as_str()) {
            continue;
        }
        if seen.insert(link.clone()) {
            candidates.push(link);
        }
    }
    candidates
}

fn jobs_for(candidates: Vec<String>, registry: &Registry) -> Vec<Job> {
    candidates
        .into_iter()
        .map(|url| {
            let priority = registry.priority_for(&url);
            Job::get(url).with_priority(priority)
        })
        .collect()
}

/// The storefront's landing page; matches the root URL exactly
pub struct HomePage {
    root: String,
}

impl HomePage {
    pub fn new(root: &Url) -> Self {
        Self {
            root: root.to_string(),
        }
    }
}

impl PageType for HomePage {
    fn name(&self) -> &str {
        "home"
    }

    fn matches(&self, url: &str) -> bool {
        url == self.root
    }

    fn find_new_jobs(&self, result: &JobResult, registry: &Registry) -> Vec<Job> {
        let candidates = in_root_candidates(result, &self.root, &[&self.root]);
        jobs_for(candidates, registry)
    }
}

/// A shop listing page under `<root>shop/`
pub struct ListingPage {
    root: String,
    prefix: String,
}

impl ListingPage {
    pub fn new(root: &Url) -> Self {
        let root = root.to_string();
        let prefix = format!("{root}shop/");
        Self { root, prefix }
    }
}

impl PageType for ListingPage {
    fn name(&self) -> &str {
        "listing"
    }

    fn matches(&self, url: &str) -> bool {
        url.starts_with(&self.prefix)
    }

    fn find_new_jobs(&self, result: &JobResult, registry: &Registry) -> Vec<Job> {
        // Listing pages link back to both the shop index and the home page;
        // neither is new work.
        let candidates = in_root_candidates(result, &self.root, &[&self.root, &self.prefix]);
        jobs_for(candidates, registry)
    }

    fn priority_weight(&self) -> i32 {
        1
    }
}

/// A product detail page under `<root>product/`; results feed the sink
pub struct ProductPage {
    root: String,
    prefix: String,
}

impl ProductPage {
    pub fn new(root: &Url) -> Self {
        let root = root.to_string();
        let prefix = format!("{root}product/");
        Self { root, prefix }
    }
}

impl PageType for ProductPage {
    fn name(&self) -> &str {
        "product"
    }

    fn matches(&self, url: &str) -> bool {
        url.starts_with(&self.prefix)
    }

    fn find_new_jobs(&self, result: &JobResult, registry: &Registry) -> Vec<Job> {
        let candidates = in_root_candidates(result, &self.root, &[&self.root]);
        jobs_for(candidates, registry)
    }

    fn forwards_results(&self) -> bool {
        true
    }

    fn priority_weight(&self) -> i32 {
        2
    }
}
