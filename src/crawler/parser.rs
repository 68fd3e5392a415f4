//! Link scanning for fetched pages
//!
//! Collects candidate URLs from `<a href>` tags in a parsed document,
//! resolving relative references against the page's own URL. Page types
//! apply their allow-list and landing-page exclusions on top of this.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from a parsed HTML document
///
/// Relative references are resolved against `base_url`. Excluded outright:
/// `javascript:`, `mailto:`, `tel:` and `data:` schemes, fragment-only
/// anchors, links carrying a `download` attribute, and anything that does
/// not resolve to HTTP(S).
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves one href to an absolute HTTP(S) URL, or rejects it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
