//! Extraction collaborator seam
//!
//! The document-understanding service that turns an uploaded quote into
//! pricing data lives outside this crate. This module only defines the
//! contract a batch needs from it, plus two offline backends.
//!
//! # Architecture
//!
//! - `QuoteExtractor` trait: one document in, one raw record out
//! - `ExtractorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `ReplayExtractor`, `MockExtractor`
//!
//! # Configuration
//!
//! `extraction.backend` in the config file (or `QUOTECMP_EXTRACTOR`):
//! - `replay` (default): read saved service responses from the document paths
//! - `mock`: stable made-up records per filename, for development

mod mock;
pub mod parsing;
mod replay;

pub use mock::{MockExtractor, MockResponse};
pub use replay::ReplayExtractor;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::models::RawExtractionRecord;

/// One uploaded document awaiting extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    /// Name reported back in the comparison
    pub filename: String,
    /// Where the extractor finds the document (or its saved response)
    pub path: PathBuf,
}

impl QuoteDocument {
    /// Create a document from a path, using the final path component as filename
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { filename, path }
    }
}

/// Trait implemented by every extraction backend
///
/// An `Err` means extraction failed for this document only; the batch turns
/// it into an error-marked record and carries on.
#[async_trait]
pub trait QuoteExtractor: Send + Sync {
    /// Extract structured pricing data from one document
    async fn extract(&self, document: &QuoteDocument) -> Result<RawExtractionRecord>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}

/// Concrete extractor enum
#[derive(Clone)]
pub enum ExtractorClient {
    /// Saved service responses on disk
    Replay(ReplayExtractor),
    /// Scripted responses
    Mock(MockExtractor),
}

impl ExtractorClient {
    /// Build the extractor selected in the configuration
    pub fn from_config(config: &ExtractionConfig) -> Self {
        match config.backend.to_lowercase().as_str() {
            "replay" => ExtractorClient::Replay(ReplayExtractor::new()),
            "mock" => ExtractorClient::Mock(MockExtractor::predictable()),
            other => {
                tracing::warn!(
                    backend = %other,
                    "Unknown extraction backend, falling back to replay"
                );
                ExtractorClient::Replay(ReplayExtractor::new())
            }
        }
    }
}

#[async_trait]
impl QuoteExtractor for ExtractorClient {
    async fn extract(&self, document: &QuoteDocument) -> Result<RawExtractionRecord> {
        match self {
            ExtractorClient::Replay(b) => b.extract(document).await,
            ExtractorClient::Mock(b) => b.extract(document).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            ExtractorClient::Replay(b) => b.name(),
            ExtractorClient::Mock(b) => b.name(),
        }
    }
}
