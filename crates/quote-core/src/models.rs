//! Data models for quote comparison
//!
//! Raw records arrive from the extraction collaborator with every pricing
//! field optional and loosely typed. They are normalized into
//! [`ComparableQuote`] and annotated into a [`ComparisonResult`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A numeric field as reported by the extraction service
///
/// Services usually send numbers, but strings and other JSON values show up
/// often enough that deserialization must not reject them. Only
/// [`RawAmount::Number`] can ever resolve to a usable price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawAmount {
    /// The value if it is a finite number greater than zero
    pub fn positive(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() && *n > 0.0 => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// A line item extracted from a quote document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<RawAmount>,
    #[serde(default, alias = "unit_price", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<RawAmount>,
    /// Line total (quantity x unit price as printed on the document)
    #[serde(default, alias = "amount", skip_serializing_if = "Option::is_none")]
    pub total: Option<RawAmount>,
}

/// Structured pricing data for one uploaded document
///
/// Produced by the extraction collaborator, one per file, in upload order.
/// A present `error` means extraction failed; the record still takes part in
/// the comparison output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtractionRecord {
    /// Uploaded file name (not guaranteed unique within a batch)
    #[serde(default, deserialize_with = "lenient_filename")]
    pub filename: String,
    /// Non-string vendors are dropped (the filename stands in)
    #[serde(
        default,
        alias = "vendorName",
        alias = "vendor_name",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor: Option<String>,
    /// Entries that are not line-item objects are skipped
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Vec<RawLineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<RawAmount>,
    /// Extraction failure message (non-string errors keep their JSON text)
    #[serde(
        default,
        deserialize_with = "lenient_message",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

// Record fields never reject a whole record over a wrongly-typed value.

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_filename<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_message<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_items<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<RawLineItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => Some(
            entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
        ),
        _ => None,
    })
}

impl RawExtractionRecord {
    /// Create an empty record for a file
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Create a record marking a failed extraction
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_total(mut self, total: impl Into<RawAmount>) -> Self {
        self.total = Some(total.into());
        self
    }

    pub fn with_subtotal(mut self, subtotal: impl Into<RawAmount>) -> Self {
        self.subtotal = Some(subtotal.into());
        self
    }

    pub fn with_items(mut self, items: Vec<RawLineItem>) -> Self {
        self.items = Some(items);
        self
    }

    /// Whether the extraction collaborator reported a failure
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Canonical form of one record, ready for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableQuote {
    pub filename: String,
    /// Vendor name, or the filename when none was extracted
    pub vendor: String,
    /// Resolved total (0 when no usable amount was found)
    pub total: f64,
    pub is_valid: bool,
}

/// One entry of the comparison output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedQuote {
    pub filename: String,
    pub vendor: String,
    pub total: f64,
    pub is_valid: bool,
    pub is_best_deal: bool,
    /// Highest valid total minus this total (0 for invalid quotes)
    pub savings: f64,
    /// The record as received from extraction
    pub extraction: RawExtractionRecord,
}

/// Price statistics over the valid quotes of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComparison {
    pub lowest_price: f64,
    pub highest_price: f64,
    pub average_price: f64,
    pub price_range: f64,
}

/// Result of comparing one batch of quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Every input record, in input order
    pub quotes: Vec<AnnotatedQuote>,
    pub comparison: PriceComparison,
    /// Lowest-priced valid quote; `None` when every record failed
    pub best_deal: Option<AnnotatedQuote>,
}

impl ComparisonResult {
    /// Number of quotes that took part in the price statistics
    pub fn valid_count(&self) -> usize {
        self.quotes.iter().filter(|q| q.is_valid).count()
    }

    /// Quotes excluded from the statistics (failed or without a usable total)
    pub fn invalid_quotes(&self) -> impl Iterator<Item = &AnnotatedQuote> {
        self.quotes.iter().filter(|q| !q.is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_amount_positive() {
        assert_eq!(RawAmount::Number(12.5).positive(), Some(12.5));
        assert_eq!(RawAmount::Number(0.0).positive(), None);
        assert_eq!(RawAmount::Number(-3.0).positive(), None);
        assert_eq!(RawAmount::Number(f64::NAN).positive(), None);
        assert_eq!(RawAmount::Number(f64::INFINITY).positive(), None);
        assert_eq!(RawAmount::Text("250".into()).positive(), None);
    }

    #[test]
    fn test_record_accepts_loose_amounts() {
        let json = r#"{
            "filename": "a.pdf",
            "vendor": "Acme",
            "subtotal": "n/a",
            "tax": null,
            "fees": [1, 2],
            "total": 250
        }"#;

        let record: RawExtractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.filename, "a.pdf");
        assert_eq!(record.subtotal, Some(RawAmount::Text("n/a".into())));
        assert_eq!(record.tax, None);
        assert!(matches!(record.fees, Some(RawAmount::Other(_))));
        assert_eq!(record.total, Some(RawAmount::Number(250.0)));
    }

    #[test]
    fn test_record_field_aliases() {
        let json = r#"{
            "filename": "b.png",
            "vendorName": "Globex",
            "items": [{"description": "Widget", "quantity": 2, "unit_price": 5, "amount": 10}]
        }"#;

        let record: RawExtractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.vendor.as_deref(), Some("Globex"));
        let items = record.items.unwrap();
        assert_eq!(items[0].unit_price, Some(RawAmount::Number(5.0)));
        assert_eq!(items[0].total, Some(RawAmount::Number(10.0)));
    }

    #[test]
    fn test_record_tolerates_wrongly_typed_text_fields() {
        let json = r#"{
            "filename": "a.pdf",
            "vendor": 5,
            "items": [{"description": ["x"], "total": 4}, "free shipping", 7],
            "total": 250
        }"#;

        let record: RawExtractionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.vendor, None);
        assert_eq!(record.total, Some(RawAmount::Number(250.0)));
        let items = record.items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].total, Some(RawAmount::Number(4.0)));

        let record: RawExtractionRecord =
            serde_json::from_str(r#"{"filename": 12, "items": "n/a", "error": {"code": 3}}"#)
                .unwrap();
        assert_eq!(record.filename, "");
        assert_eq!(record.items, None);
        assert_eq!(record.error.as_deref(), Some(r#"{"code":3}"#));
        assert!(record.is_failed());
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let record = RawExtractionRecord::failed("c.txt", "parse failed");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["filename"], "c.txt");
        assert_eq!(json["error"], "parse failed");
        assert!(json.get("vendor").is_none());
        assert!(json.get("total").is_none());
    }

    #[test]
    fn test_comparison_serializes_camel_case() {
        let comparison = PriceComparison {
            lowest_price: 1.0,
            highest_price: 2.0,
            average_price: 1.5,
            price_range: 1.0,
        };
        let json = serde_json::to_value(comparison).unwrap();
        assert_eq!(json["lowestPrice"], 1.0);
        assert_eq!(json["priceRange"], 1.0);
    }
}
