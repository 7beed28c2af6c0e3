//! Compare command and result rendering

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use quote_core::{check_batch_size, compare, ComparisonResult, QuoteConfig, RawExtractionRecord};

use super::truncate;

/// Compare extraction records from a JSON file (or stdin for "-")
pub fn cmd_compare(input: &Path, json: bool, config: &QuoteConfig) -> Result<()> {
    let records = load_records(input)?;
    check_batch_size(records.len(), config.batch.min_files)?;

    let result = compare(&records);
    print_result(&result, json)
}

/// Read a JSON array of raw extraction records
pub fn load_records(input: &Path) -> Result<Vec<RawExtractionRecord>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read records from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let records: Vec<RawExtractionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid records JSON in {}", input.display()))?;

    if let Some(idx) = records.iter().position(|r| r.filename.is_empty()) {
        anyhow::bail!("Record #{} has no filename", idx + 1);
    }

    Ok(records)
}

/// Print a comparison as JSON or as a table
pub fn print_result(result: &ComparisonResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render_table(result));
    }
    Ok(())
}

/// Render a comparison as a human-readable table
pub fn render_table(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nQuote Comparison ({} quotes, {} valid)\n",
        result.quotes.len(),
        result.valid_count()
    ));
    out.push_str(&format!("{}\n", "─".repeat(70)));

    for quote in &result.quotes {
        let marker = if quote.is_best_deal { "★" } else { " " };
        let vendor = truncate(&quote.vendor, 28);

        if quote.is_valid {
            let note = if quote.is_best_deal {
                "best deal".to_string()
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  {} {:<28} {:>12}  {:>12}  {}\n",
                marker,
                vendor,
                format!("${:.2}", quote.total),
                format!("saves ${:.2}", quote.savings),
                note
            ));
        } else {
            let reason = quote
                .extraction
                .error
                .as_deref()
                .map(|e| truncate(e, 30))
                .unwrap_or_else(|| "no usable total".to_string());
            out.push_str(&format!(
                "  {} {:<28} {:>12}  ⚠️  {}\n",
                marker, vendor, "N/A", reason
            ));
        }
    }

    out.push_str(&format!("{}\n", "─".repeat(70)));

    match result.best_deal {
        Some(ref best) => {
            let c = &result.comparison;
            out.push_str(&format!(
                "  Best deal: {} (${:.2})\n",
                best.vendor, best.total
            ));
            out.push_str(&format!("  Lowest:    ${:.2}\n", c.lowest_price));
            out.push_str(&format!("  Highest:   ${:.2}\n", c.highest_price));
            out.push_str(&format!("  Average:   ${:.2}\n", c.average_price));
            out.push_str(&format!("  Range:     ${:.2}\n", c.price_range));
        }
        None => {
            out.push_str("  No valid quotes to compare\n");
        }
    }

    out.push('\n');
    out
}
