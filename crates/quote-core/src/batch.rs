//! Batch assembly
//!
//! Runs extraction over every document of an upload batch and hands the
//! complete record set to the comparator. Extraction failures are recorded
//! per document; only an undersized batch is rejected outright.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::compare::compare;
use crate::config::BatchConfig;
use crate::error::{Error, Result};
use crate::extract::{QuoteDocument, QuoteExtractor};
use crate::models::{ComparisonResult, RawExtractionRecord};

/// Reject batches smaller than the configured minimum
pub fn check_batch_size(count: usize, min: usize) -> Result<()> {
    if count < min {
        return Err(Error::BatchTooSmall { min, actual: count });
    }
    Ok(())
}

/// Extract every document, at most `max_concurrency` at a time
///
/// Returns exactly one record per document, in document order. A failed
/// extraction becomes a record carrying the error message, and every
/// record's filename is the document's filename.
pub async fn extract_batch<E>(
    extractor: &E,
    documents: &[QuoteDocument],
    max_concurrency: usize,
) -> Vec<RawExtractionRecord>
where
    E: QuoteExtractor + ?Sized,
{
    info!(
        documents = documents.len(),
        backend = extractor.name(),
        "Extracting quote batch"
    );

    stream::iter(documents)
        .map(move |doc| async move {
            match extractor.extract(doc).await {
                Ok(mut record) => {
                    if record.filename != doc.filename {
                        debug!(
                            reported = %record.filename,
                            filename = %doc.filename,
                            "Replacing extractor-reported filename"
                        );
                        record.filename = doc.filename.clone();
                    }
                    record
                }
                Err(e) => {
                    warn!(filename = %doc.filename, error = %e, "Extraction failed");
                    RawExtractionRecord::failed(doc.filename.clone(), e.to_string())
                }
            }
        })
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}

/// Validate, extract and compare one batch
///
/// Comparison starts only once every extraction has resolved.
pub async fn compare_batch<E>(
    extractor: &E,
    documents: &[QuoteDocument],
    config: &BatchConfig,
) -> Result<ComparisonResult>
where
    E: QuoteExtractor + ?Sized,
{
    check_batch_size(documents.len(), config.min_files)?;
    let records = extract_batch(extractor, documents, config.max_concurrency).await;
    Ok(compare(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{MockExtractor, MockResponse};
    use std::time::Duration;

    fn docs(names: &[&str]) -> Vec<QuoteDocument> {
        names
            .iter()
            .map(|n| QuoteDocument::from_path(format!("/uploads/{}", n)))
            .collect()
    }

    #[test]
    fn test_check_batch_size() {
        assert!(check_batch_size(2, 2).is_ok());
        assert!(check_batch_size(5, 2).is_ok());
        assert!(matches!(
            check_batch_size(1, 2),
            Err(Error::BatchTooSmall { min: 2, actual: 1 })
        ));
    }

    #[tokio::test]
    async fn test_extract_batch_preserves_order_under_concurrency() {
        let mock = MockExtractor::new()
            .with_record(RawExtractionRecord::new("a.pdf").with_total(1.0))
            .with_record(RawExtractionRecord::new("b.pdf").with_total(2.0))
            .with_record(RawExtractionRecord::new("c.pdf").with_total(3.0))
            .with_delay("a.pdf", Duration::from_millis(60))
            .with_delay("b.pdf", Duration::from_millis(30));

        let records = extract_batch(&mock, &docs(&["a.pdf", "b.pdf", "c.pdf"]), 3).await;

        let names: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn test_extract_batch_records_failures() {
        let mock = MockExtractor::new()
            .with_record(RawExtractionRecord::new("a.pdf").with_total(1.0))
            .with_failure("b.pdf", "unsupported format");

        let records = extract_batch(&mock, &docs(&["a.pdf", "b.pdf", "c.pdf"]), 2).await;

        assert_eq!(records.len(), 3);
        assert!(!records[0].is_failed());
        assert!(records[1].error.as_deref().unwrap().contains("unsupported format"));
        assert!(records[2].is_failed());
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_extract_batch_overrides_reported_filename() {
        let mock = MockExtractor::new().with_response(
            "scan.jpg",
            MockResponse::Raw(r#"{"filename": "page-1.png", "total": 10}"#.into()),
        );

        let records = extract_batch(&mock, &docs(&["scan.jpg"]), 1).await;
        assert_eq!(records[0].filename, "scan.jpg");
    }

    #[tokio::test]
    async fn test_extract_batch_keeps_duplicate_filenames() {
        let mock = MockExtractor::new()
            .with_record(RawExtractionRecord::new("quote.pdf").with_total(5.0));

        let records = extract_batch(&mock, &docs(&["quote.pdf", "quote.pdf"]), 2).await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.filename == "quote.pdf"));
    }

    #[tokio::test]
    async fn test_compare_batch_rejects_small_batch() {
        let mock = MockExtractor::new();
        let result = compare_batch(&mock, &docs(&["only.pdf"]), &BatchConfig::default()).await;

        assert!(matches!(result, Err(Error::BatchTooSmall { .. })));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_batch() {
        let mock = MockExtractor::new()
            .with_record(RawExtractionRecord::new("a.pdf").with_vendor("A").with_total(250.0))
            .with_record(RawExtractionRecord::new("b.pdf").with_vendor("B").with_total(300.0));

        let result = compare_batch(&mock, &docs(&["a.pdf", "b.pdf"]), &BatchConfig::default())
            .await
            .unwrap();

        assert_eq!(result.best_deal.unwrap().vendor, "A");
        assert_eq!(result.comparison.price_range, 50.0);
    }
}
