//! Product record extraction and persistence
//!
//! Turns fetched product pages (WooCommerce-style markup) into
//! [`ProductRecord`]s and writes the accumulated, deduplicated set to a JSON
//! array file and a CSV file when the crawl finalizes.

use crate::job::JobResult;
use crate::sink::{ResultProcessor, SinkError, SinkResult};
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One scraped product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: Option<String>,
    pub sale_price: Option<String>,
    pub on_sale: bool,
    pub description: Option<String>,
    pub stock_level: Option<String>,
}

/// Extracts a product record from a fetched product page
///
/// The product title is required; a page without it (or without the product
/// container at all) is malformed and yields an error for the orchestrator
/// to log. Price, description and stock level are optional — storefronts
/// omit them for unpriced or unstocked items.
///
/// Price semantics follow the storefront's markup: the summary block lists
/// one amount for a regularly priced product and two when a sale is in
/// effect (regular first, sale price second).
pub fn extract_product(result: &JobResult) -> SinkResult<ProductRecord> {
    let url = result.job.url.clone();
    let document = result
        .html()
        .ok_or_else(|| SinkError::NoContent { url: url.clone() })?;

    let product = first(document.root_element(), "div.product, div.type-product").ok_or_else(
        || SinkError::MissingField {
            url: url.clone(),
            field: "product container",
        },
    )?;

    let summary =
        first(product, "div.summary, div.entry-summary").ok_or_else(|| SinkError::MissingField {
            url: url.clone(),
            field: "summary block",
        })?;

    let name = first(summary, "h1.product_title, h1.entry-title")
        .map(text_of)
        .filter(|name| !name.is_empty())
        .ok_or(SinkError::MissingField {
            url,
            field: "product title",
        })?;

    let amounts = texts_of(summary, "span.woocommerce-Price-amount, span.amount");
    let (price, sale_price, on_sale) = match amounts.len() {
        0 => (None, None, false),
        1 => (Some(amounts[0].clone()), None, false),
        _ => (Some(amounts[0].clone()), Some(amounts[1].clone()), true),
    };

    let description = first(product, "div.woocommerce-Tabs-panel p").map(text_of);
    let stock_level = first(summary, "p.stock").map(text_of);

    Ok(ProductRecord {
        name,
        price,
        sale_price,
        on_sale,
        description,
        stock_level,
    })
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn texts_of(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).map(text_of).collect(),
        Err(_) => Vec::new(),
    }
}

/// Accumulates product records and persists them on finalize
pub struct ProductSink {
    json_path: PathBuf,
    csv_path: PathBuf,
    records: Vec<ProductRecord>,
}

impl ProductSink {
    pub fn new(json_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            csv_path: csv_path.into(),
            records: Vec::new(),
        }
    }

    /// Records collected so far
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }
}

impl ResultProcessor for ProductSink {
    fn process(&mut self, result: &JobResult) -> SinkResult<()> {
        let record = extract_product(result)?;
        if self.records.contains(&record) {
            tracing::debug!("Skipping duplicate product record for {}", result.job.url);
            return Ok(());
        }
        tracing::debug!("Collected product record: {}", record.name);
        self.records.push(record);
        Ok(())
    }

    fn finalize(&mut self) -> SinkResult<()> {
        for path in [&self.json_path, &self.csv_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        let json_file = fs::File::create(&self.json_path)?;
        serde_json::to_writer_pretty(json_file, &self.records)?;

        let mut writer = csv::Writer::from_path(&self.csv_path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!(
            "Wrote {} product records to {} and {}",
            self.records.len(),
            self.json_path.display(),
            self.csv_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Job;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
        <div class="product type-product">
            <div class="summary entry-summary">
                <h1 class="product_title entry-title">Garden Gnome</h1>
                <span class="woocommerce-Price-amount amount">&euro;12,50</span>
                <p class="stock">In stock</p>
            </div>
            <div class="woocommerce-Tabs-panel">
                <p>A cheerful gnome for any garden.</p>
            </div>
        </div>
        </body></html>
    "#;

    const SALE_PAGE: &str = r#"
        <html><body>
        <div class="product">
            <div class="summary">
                <h1 class="product_title">Watering Can</h1>
                <span class="woocommerce-Price-amount">&euro;20,00</span>
                <span class="woocommerce-Price-amount">&euro;15,00</span>
            </div>
        </div>
        </body></html>
    "#;

    fn result_for(url: &str, body: &str) -> JobResult {
        JobResult {
            job: Job::get(url),
            body: Some(body.as_bytes().to_vec()),
            status_code: Some(200),
            fetched_at: 0,
        }
    }

    #[test]
    fn test_extract_full_record() {
        let result = result_for("https://shop.test/product/gnome", PRODUCT_PAGE);
        let record = extract_product(&result).unwrap();

        assert_eq!(record.name, "Garden Gnome");
        assert_eq!(record.price.as_deref(), Some("€12,50"));
        assert_eq!(record.sale_price, None);
        assert!(!record.on_sale);
        assert_eq!(
            record.description.as_deref(),
            Some("A cheerful gnome for any garden.")
        );
        assert_eq!(record.stock_level.as_deref(), Some("In stock"));
    }

    #[test]
    fn test_extract_sale_prices() {
        let result = result_for("https://shop.test/product/can", SALE_PAGE);
        let record = extract_product(&result).unwrap();

        assert_eq!(record.price.as_deref(), Some("€20,00"));
        assert_eq!(record.sale_price.as_deref(), Some("€15,00"));
        assert!(record.on_sale);
        assert_eq!(record.description, None);
        assert_eq!(record.stock_level, None);
    }

    #[test]
    fn test_extract_requires_product_markup() {
        let result = result_for("https://shop.test/about", "<html><body>About us</body></html>");
        let err = extract_product(&result).unwrap_err();
        assert!(matches!(err, SinkError::MissingField { field, .. } if field == "product container"));
    }

    #[test]
    fn test_extract_requires_successful_fetch() {
        let result = JobResult {
            job: Job::get("https://shop.test/product/gone"),
            body: Some(b"server error".to_vec()),
            status_code: Some(500),
            fetched_at: 0,
        };
        let err = extract_product(&result).unwrap_err();
        assert!(matches!(err, SinkError::NoContent { .. }));
    }

    #[test]
    fn test_process_deduplicates_identical_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ProductSink::new(
            dir.path().join("products.json"),
            dir.path().join("products.csv"),
        );

        let result = result_for("https://shop.test/product/gnome", PRODUCT_PAGE);
        sink.process(&result).unwrap();
        sink.process(&result).unwrap();

        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_finalize_writes_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("out/products.json");
        let csv_path = dir.path().join("out/products.csv");
        let mut sink = ProductSink::new(&json_path, &csv_path);

        sink.process(&result_for("https://shop.test/product/gnome", PRODUCT_PAGE))
            .unwrap();
        sink.process(&result_for("https://shop.test/product/can", SALE_PAGE))
            .unwrap();
        sink.finalize().unwrap();

        let json = fs::read_to_string(&json_path).unwrap();
        let parsed: Vec<ProductRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Garden Gnome");

        let csv = fs::read_to_string(&csv_path).unwrap();
        assert!(csv.contains("Watering Can"));
    }
}
