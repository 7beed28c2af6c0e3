//! Parsing helpers for extraction-service responses
//!
//! Services (especially LLM-backed ones) often wrap the JSON payload in
//! prose or code fences, and report amounts as currency strings. These
//! helpers recover a [`RawExtractionRecord`] from such replies.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::RawExtractionRecord;

/// Top-level fields holding amounts
const AMOUNT_FIELDS: &[&str] = &["subtotal", "tax", "fees", "total"];

/// Line-item fields holding amounts
const ITEM_AMOUNT_FIELDS: &[&str] = &[
    "quantity",
    "unitPrice",
    "unit_price",
    "total",
    "amount",
];

/// Parse an extraction response into a raw record
///
/// `filename` fills in the record's filename when the service omitted it.
pub fn parse_extraction_response(response: &str, filename: &str) -> Result<RawExtractionRecord> {
    let json_str = find_json_object(response).ok_or_else(|| {
        Error::InvalidData(format!(
            "No JSON found in extraction response | Raw: {}",
            truncate(response.trim(), 200)
        ))
    })?;

    let mut value: Value = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid extraction JSON: {} | Raw: {}",
            e,
            truncate(json_str, 200)
        ))
    })?;

    if let Value::Object(ref mut obj) = value {
        coerce_fields(obj, AMOUNT_FIELDS);
        if let Some(Value::Array(items)) = obj.get_mut("items") {
            for item in items.iter_mut() {
                if let Value::Object(item) = item {
                    coerce_fields(item, ITEM_AMOUNT_FIELDS);
                }
            }
        }
    }

    let mut record: RawExtractionRecord = serde_json::from_value(value)
        .map_err(|e| Error::InvalidData(format!("Invalid extraction record: {}", e)))?;

    if record.filename.is_empty() {
        record.filename = filename.to_string();
    }

    Ok(record)
}

/// Locate the outermost JSON object in a response
fn find_json_object(response: &str) -> Option<&str> {
    let response = response.trim();
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if start < end {
        Some(&response[start..=end])
    } else {
        None
    }
}

/// Replace currency strings with numbers, leaving anything else untouched
fn coerce_fields(obj: &mut Map<String, Value>, fields: &[&str]) {
    for field in fields {
        let coerced = match obj.get(*field) {
            Some(Value::String(s)) => coerce_amount(s).and_then(serde_json::Number::from_f64),
            _ => None,
        };
        if let Some(n) = coerced {
            obj.insert(field.to_string(), Value::Number(n));
        }
    }
}

/// Parse a currency-formatted amount such as `"$1,250.00"` or `"250 USD"`
///
/// Returns `None` for anything that is not clearly a single amount.
pub fn coerce_amount(text: &str) -> Option<f64> {
    static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();
    let re = AMOUNT_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:[A-Z]{3}\s*)?[$€£¥]?\s*(-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)\s*(?:[A-Z]{3})?\s*$",
        )
        .expect("valid regex")
    });

    let caps = re.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse().ok()
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
