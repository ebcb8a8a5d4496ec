//! Statement upload: read transactions from a local JSON or CSV file
//! instead of a generated stream.
//!
//! JSON is either a bare array of transactions or an object with a
//! `transactions` array. CSV has a header row:
//! timestamp,amount,merchant_name,category[,mapped_category]

use std::path::Path;

use fincoai_core::{MerchantDetails, RawAmount, RawTransaction};
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::frame::parse_transactions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Json,
    Csv,
}

impl StatementFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(StatementFormat::Json),
            "csv" => Ok(StatementFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn parse_statement_file(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let format = StatementFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_statement_str(&text, format)
}

pub fn parse_statement_str(text: &str, format: StatementFormat) -> Result<Vec<RawTransaction>> {
    match format {
        StatementFormat::Json => parse_json(text),
        StatementFormat::Csv => parse_csv(text),
    }
}

fn parse_json(text: &str) -> Result<Vec<RawTransaction>> {
    let v: Value = serde_json::from_str(text)?;
    match &v {
        Value::Array(_) => Ok(parse_transactions(&v)),
        Value::Object(obj) => match obj.get("transactions") {
            Some(txns @ Value::Array(_)) => Ok(parse_transactions(txns)),
            _ => Err(IngestError::UnexpectedShape(
                "object without a transactions array".into(),
            )),
        },
        _ => Err(IngestError::UnexpectedShape(
            "expected an array or an object with transactions".into(),
        )),
    }
}

fn parse_csv(text: &str) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() < 4 {
            tracing::warn!(row = i + 1, columns = record.len(), "skipping short csv row");
            continue;
        }

        let field = |idx: usize| record.get(idx).filter(|s| !s.is_empty()).map(str::to_string);

        out.push(RawTransaction {
            timestamp: field(0),
            amount: field(1).map(RawAmount::Text),
            merchant: Some(MerchantDetails {
                name: field(2),
                category: field(3),
                mapped_category: field(4),
            }),
        });
    }

    Ok(out)
}
