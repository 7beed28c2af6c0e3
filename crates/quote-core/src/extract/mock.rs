//! Mock backend for testing
//!
//! Returns scripted results per filename. Useful for unit tests and for
//! exercising the batch pipeline without an extraction service. The
//! predictable variant (selected by `extraction.backend = "mock"`) also
//! answers unscripted documents with a record derived from the filename.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{RawAmount, RawExtractionRecord, RawLineItem};

use super::parsing::parse_extraction_response;
use super::{QuoteDocument, QuoteExtractor};

/// Scripted outcome for one document
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this record (filename is replaced with the document's)
    Record(RawExtractionRecord),
    /// Run this raw service reply through response parsing
    Raw(String),
    /// Fail extraction with this message
    Fail(String),
}

/// Mock extraction backend
///
/// Documents without a scripted response fail extraction, unless the
/// extractor was built with [`MockExtractor::predictable`].
#[derive(Clone, Default)]
pub struct MockExtractor {
    responses: Arc<HashMap<String, MockResponse>>,
    delays: Arc<HashMap<String, Duration>>,
    calls: Arc<AtomicUsize>,
    predictable: bool,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that invents a stable record for unscripted documents
    pub fn predictable() -> Self {
        Self {
            predictable: true,
            ..Self::default()
        }
    }

    /// Script a response for a filename
    pub fn with_response(mut self, filename: &str, response: MockResponse) -> Self {
        Arc::make_mut(&mut self.responses).insert(filename.to_string(), response);
        self
    }

    /// Script a successful record (keyed by the record's filename)
    pub fn with_record(self, record: RawExtractionRecord) -> Self {
        let filename = record.filename.clone();
        self.with_response(&filename, MockResponse::Record(record))
    }

    /// Script a failure for a filename
    pub fn with_failure(self, filename: &str, message: &str) -> Self {
        self.with_response(filename, MockResponse::Fail(message.to_string()))
    }

    /// Delay the response for a filename
    pub fn with_delay(mut self, filename: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(filename.to_string(), delay);
        self
    }

    /// Number of extract calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteExtractor for MockExtractor {
    async fn extract(&self, document: &QuoteDocument) -> Result<RawExtractionRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&document.filename) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(&document.filename) {
            Some(MockResponse::Record(record)) => Ok(RawExtractionRecord {
                filename: document.filename.clone(),
                ..record.clone()
            }),
            Some(MockResponse::Raw(response)) => {
                parse_extraction_response(response, &document.filename)
            }
            Some(MockResponse::Fail(message)) => Err(Error::Extraction(message.clone())),
            None if self.predictable => Ok(predictable_record(&document.filename)),
            None => Err(Error::Extraction(format!(
                "No scripted response for {}",
                document.filename
            ))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Stable record for a filename: same name, same vendor and total
fn predictable_record(filename: &str) -> RawExtractionRecord {
    let stem = filename.split('.').next().unwrap_or(filename);
    let vendor = if stem.is_empty() { filename } else { stem };

    // 100.00 ..= 999.99, derived from the filename bytes
    let seed = filename
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let total = 100.0 + f64::from(seed % 90_000) / 100.0;

    RawExtractionRecord::new(filename)
        .with_vendor(vendor)
        .with_items(vec![RawLineItem {
            description: Some("Quoted services".to_string()),
            quantity: Some(RawAmount::Number(1.0)),
            unit_price: Some(RawAmount::Number(total)),
            total: Some(RawAmount::Number(total)),
        }])
        .with_subtotal(total)
        .with_total(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> QuoteDocument {
        QuoteDocument::from_path(format!("/uploads/{}", name))
    }

    #[tokio::test]
    async fn test_scripted_record() {
        let mock = MockExtractor::new()
            .with_record(RawExtractionRecord::new("a.pdf").with_vendor("Acme").with_total(10.0));

        let record = mock.extract(&doc("a.pdf")).await.unwrap();
        assert_eq!(record.vendor.as_deref(), Some("Acme"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_raw_response() {
        let mock = MockExtractor::new().with_response(
            "b.png",
            MockResponse::Raw(r#"Result: {"vendor": "Globex", "total": "$75"}"#.into()),
        );

        let record = mock.extract(&doc("b.png")).await.unwrap();
        assert_eq!(record.filename, "b.png");
        assert_eq!(record.vendor.as_deref(), Some("Globex"));
    }

    #[tokio::test]
    async fn test_scripted_failure_and_unknown() {
        let mock = MockExtractor::new().with_failure("c.pdf", "unreadable scan");

        let err = mock.extract(&doc("c.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("unreadable scan"));

        let err = mock.extract(&doc("d.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("No scripted response"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_predictable_unscripted_record() {
        let mock = MockExtractor::predictable().with_failure("c.pdf", "unreadable scan");

        let first = mock.extract(&doc("acme.pdf")).await.unwrap();
        let again = mock.extract(&doc("acme.pdf")).await.unwrap();
        assert_eq!(first, again);
        assert_eq!(first.filename, "acme.pdf");
        assert_eq!(first.vendor.as_deref(), Some("acme"));

        let total = first.total.as_ref().and_then(RawAmount::positive).unwrap();
        assert!((100.0..1000.0).contains(&total));
        assert_eq!(first.items.as_ref().map(Vec::len), Some(1));

        // Scripted responses still win
        assert!(mock.extract(&doc("c.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn test_clone_shares_call_count() {
        let mock = MockExtractor::new();
        let cloned = mock.clone();
        let _ = cloned.extract(&doc("x.pdf")).await;
        assert_eq!(mock.call_count(), 1);
    }
}
