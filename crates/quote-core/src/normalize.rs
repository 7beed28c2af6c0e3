//! Extraction-result normalizer
//!
//! Turns a loosely-typed [`RawExtractionRecord`] into a [`ComparableQuote`].
//! Normalization never fails: anything unusable resolves to an invalid quote
//! so a single bad document cannot abort the rest of the batch.

use tracing::{debug, warn};

use crate::models::{ComparableQuote, RawExtractionRecord};

/// Normalize one raw extraction record
///
/// - vendor: `vendor` when non-empty, otherwise `filename`
/// - total: `total` if a finite number > 0, else `subtotal` under the same
///   rule, else 0
/// - valid: no extraction error and a resolved total above zero
pub fn normalize(raw: &RawExtractionRecord) -> ComparableQuote {
    let vendor = resolve_vendor(raw);
    let total = resolve_total(raw);
    let is_valid = raw.error.is_none() && total > 0.0;

    if let Some(ref error) = raw.error {
        warn!(filename = %raw.filename, %error, "Extraction failed, excluding from comparison");
    } else if !is_valid {
        warn!(filename = %raw.filename, "No usable total, excluding from comparison");
    } else {
        debug!(filename = %raw.filename, vendor = %vendor, total, "Normalized quote");
    }

    ComparableQuote {
        filename: raw.filename.clone(),
        vendor,
        total,
        is_valid,
    }
}

/// Display name for a record's vendor
pub fn resolve_vendor(raw: &RawExtractionRecord) -> String {
    match raw.vendor.as_deref() {
        Some(vendor) if !vendor.is_empty() => vendor.to_string(),
        _ => raw.filename.clone(),
    }
}

/// Resolved total, falling back through subtotal to 0
pub fn resolve_total(raw: &RawExtractionRecord) -> f64 {
    raw.total
        .as_ref()
        .and_then(|t| t.positive())
        .or_else(|| raw.subtotal.as_ref().and_then(|s| s.positive()))
        .unwrap_or(0.0)
}
