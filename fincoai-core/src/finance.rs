//! Transaction record types shared by ingestion and normalization

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::StandardCategory;

/// Merchant name used when a record carries no merchant details.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Display format for `NormalizedTransaction::date`.
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Amount as it arrived on the wire.
///
/// Generators and uploaded files are not consistent about numeric fields, so
/// this never rejects a record; `coerce` decides what it is worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    /// Numeric value, or 0.0 when the amount is not a finite number.
    pub fn coerce(&self) -> f64 {
        let v = match self {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => s.trim().replace(',', "").parse().unwrap_or(0.0),
            RawAmount::Other(_) => 0.0,
        };
        if v.is_finite() { v } else { 0.0 }
    }
}

impl From<f64> for RawAmount {
    fn from(v: f64) -> Self {
        RawAmount::Number(v)
    }
}

/// Merchant sub-record as sent by the generator (`merchant_details`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantDetails {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Free-text label from the source system (licence category, card network category, ...)
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    /// Spending bucket pre-assigned by the generator, when it sent one
    #[serde(default, deserialize_with = "lenient_text")]
    pub mapped_category: Option<String>,
}

/// One synthesized or uploaded financial event, before classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(
        default,
        rename = "merchant_details",
        alias = "merchant",
        deserialize_with = "lenient_merchant"
    )]
    pub merchant: Option<MerchantDetails>,
}

/// Strings as-is, numbers as their text, anything else absent.
fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A merchant that is not an object reads as no merchant at all.
fn lenient_merchant<'de, D: Deserializer<'de>>(de: D) -> Result<Option<MerchantDetails>, D::Error> {
    match Value::deserialize(de)? {
        v @ Value::Object(_) => Ok(serde_json::from_value(v).ok()),
        _ => Ok(None),
    }
}

impl RawTransaction {
    pub fn new(
        timestamp: impl Into<String>,
        amount: f64,
        merchant_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            amount: Some(RawAmount::Number(amount)),
            merchant: Some(MerchantDetails {
                name: Some(merchant_name.into()),
                category: Some(category.into()),
                mapped_category: None,
            }),
        }
    }

    pub fn with_mapped_category(mut self, mapped: impl Into<String>) -> Self {
        self.merchant.get_or_insert_with(MerchantDetails::default).mapped_category =
            Some(mapped.into());
        self
    }

    /// Merchant name, `"Unknown"` when absent
    pub fn merchant_name(&self) -> &str {
        self.merchant
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or(UNKNOWN_MERCHANT)
    }

    /// Source category label, empty when absent
    pub fn merchant_category(&self) -> &str {
        self.merchant
            .as_ref()
            .and_then(|m| m.category.as_deref())
            .unwrap_or("")
    }

    pub fn mapped_category(&self) -> Option<&str> {
        self.merchant.as_ref().and_then(|m| m.mapped_category.as_deref())
    }

    pub fn coerced_amount(&self) -> f64 {
        self.amount.as_ref().map(RawAmount::coerce).unwrap_or(0.0)
    }

    /// Parse `timestamp` with the formats generators are known to emit.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.timestamp.as_deref()?)
    }

    /// Date shown to the user: `%m/%d/%Y` when the timestamp parses,
    /// the raw text when it does not, empty when there is none.
    pub fn display_date(&self) -> String {
        match (&self.timestamp, self.parsed_timestamp()) {
            (_, Some(ts)) => ts.format(DISPLAY_DATE_FORMAT).to_string(),
            (Some(raw), None) => raw.trim().to_string(),
            (None, None) => String::new(),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        // unix seconds
        return s
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// A raw transaction projected onto the standard taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    pub category: StandardCategory,
    pub amount: f64,
    /// Display-formatted date
    pub date: String,
    pub description: String,
    /// Source label, kept for auditing the classification
    #[serde(rename = "originalCategory")]
    pub original_category: String,
}

impl NormalizedTransaction {
    /// Project `raw` onto `category`. Field defaulting never fails.
    pub fn from_raw(raw: &RawTransaction, category: StandardCategory) -> Self {
        Self {
            category,
            amount: raw.coerced_amount(),
            date: raw.display_date(),
            description: raw.merchant_name().to_string(),
            original_category: raw.merchant_category().to_string(),
        }
    }
}
