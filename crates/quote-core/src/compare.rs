//! Quote comparator and aggregator
//!
//! Computes price statistics over the valid quotes of a batch, picks the
//! best deal and annotates every record with its savings. Pure and
//! infallible: failed or unpriced records are carried through with zero
//! savings instead of aborting the comparison.

use tracing::info;

use crate::models::{AnnotatedQuote, ComparisonResult, PriceComparison, RawExtractionRecord};
use crate::normalize::normalize;

/// Compare a complete batch of extraction records
///
/// The output has one quote per input record, in input order. The best deal
/// is the first valid quote (in input order) whose total equals the lowest
/// valid total; exactly one quote is marked when any quote is valid.
pub fn compare(records: &[RawExtractionRecord]) -> ComparisonResult {
    let normalized: Vec<_> = records.iter().map(normalize).collect();

    let valid_totals: Vec<f64> = normalized
        .iter()
        .filter(|q| q.is_valid)
        .map(|q| q.total)
        .collect();
    let comparison = price_statistics(&valid_totals);

    let best_index = if valid_totals.is_empty() {
        None
    } else {
        // Exact equality: lowest_price is one of the stored totals
        normalized
            .iter()
            .position(|q| q.is_valid && q.total == comparison.lowest_price)
    };

    let quotes: Vec<AnnotatedQuote> = normalized
        .into_iter()
        .zip(records)
        .enumerate()
        .map(|(idx, (quote, raw))| {
            let savings = if quote.is_valid {
                comparison.highest_price - quote.total
            } else {
                0.0
            };
            AnnotatedQuote {
                filename: quote.filename,
                vendor: quote.vendor,
                total: quote.total,
                is_valid: quote.is_valid,
                is_best_deal: best_index == Some(idx),
                savings,
                extraction: raw.clone(),
            }
        })
        .collect();

    let best_deal = best_index.and_then(|idx| quotes.get(idx).cloned());

    match best_deal {
        Some(ref best) => info!(
            quotes = quotes.len(),
            valid = valid_totals.len(),
            best_vendor = %best.vendor,
            lowest = comparison.lowest_price,
            highest = comparison.highest_price,
            "Compared quotes"
        ),
        None => info!(
            quotes = quotes.len(),
            "Compared quotes, no valid quote in batch"
        ),
    }

    ComparisonResult {
        quotes,
        comparison,
        best_deal,
    }
}

/// Lowest, highest, mean and range over a set of totals (all zero if empty)
pub fn price_statistics(totals: &[f64]) -> PriceComparison {
    if totals.is_empty() {
        return PriceComparison::default();
    }

    let lowest_price = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let highest_price = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Running mean: summing first overflows for totals near f64::MAX
    let average_price = totals
        .iter()
        .enumerate()
        .fold(0.0_f64, |mean, (i, &t)| mean + (t - mean) / (i + 1) as f64);

    PriceComparison {
        lowest_price,
        highest_price,
        average_price,
        price_range: highest_price - lowest_price,
    }
}
