//! Replay backend
//!
//! Reads a response previously saved from the extraction service (one file
//! per uploaded document) and parses it as if it had just come back over
//! the wire. Lets a batch be re-compared without calling the service again.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawExtractionRecord;

use super::parsing::parse_extraction_response;
use super::{QuoteDocument, QuoteExtractor};

#[derive(Clone, Debug, Default)]
pub struct ReplayExtractor;

impl ReplayExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteExtractor for ReplayExtractor {
    async fn extract(&self, document: &QuoteDocument) -> Result<RawExtractionRecord> {
        let response = tokio::fs::read_to_string(&document.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    Error::NotFound(format!("Saved response {}", document.path.display()))
                }
                _ => Error::Io(e),
            })?;

        debug!(
            filename = %document.filename,
            bytes = response.len(),
            "Replaying saved extraction response"
        );

        parse_extraction_response(&response, &document.filename)
    }

    fn name(&self) -> &str {
        "replay"
    }
}
