//! Batch extraction command

use std::path::PathBuf;

use anyhow::Result;
use quote_core::{compare_batch, ExtractorClient, QuoteConfig, QuoteDocument};

use super::print_result;

/// Extract every file with the configured backend, then compare
pub async fn cmd_batch(
    files: &[PathBuf],
    json: bool,
    concurrency: Option<usize>,
    config: &QuoteConfig,
) -> Result<()> {
    let mut batch_config = config.batch.clone();
    if let Some(n) = concurrency {
        batch_config.max_concurrency = n.max(1);
    }

    let documents: Vec<QuoteDocument> = files.iter().map(QuoteDocument::from_path).collect();
    let extractor = ExtractorClient::from_config(&config.extraction);

    let result = compare_batch(&extractor, &documents, &batch_config).await?;
    print_result(&result, json)
}
