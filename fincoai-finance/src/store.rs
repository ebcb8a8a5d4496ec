//! Persisted records: the normalized transaction list and the category totals,
//! each kept as its own JSON document under one directory.

use anyhow::{Context, Result};
use fincoai_core::{CategoryTotals, NormalizedTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::normalizer::Normalized;

pub const TRANSACTIONS_RECORD: &str = "transactions.json";
pub const TOTALS_RECORD: &str = "category_totals.json";

#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.dir.join(TRANSACTIONS_RECORD)
    }

    pub fn totals_path(&self) -> PathBuf {
        self.dir.join(TOTALS_RECORD)
    }

    /// Replace both records with the contents of `normalized`.
    pub fn save(&self, normalized: &Normalized) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir.display()))?;
        write_json(&self.transactions_path(), &normalized.transactions)?;
        write_json(&self.totals_path(), &normalized.totals)?;
        tracing::info!(
            transactions = normalized.transactions.len(),
            categories = normalized.totals.len(),
            dir = %self.dir.display(),
            "saved normalized records"
        );
        Ok(())
    }

    /// Empty when nothing has been saved yet.
    pub fn load_transactions(&self) -> Result<Vec<NormalizedTransaction>> {
        read_json_or_default(&self.transactions_path())
    }

    /// Empty when nothing has been saved yet.
    pub fn load_totals(&self) -> Result<CategoryTotals> {
        read_json_or_default(&self.totals_path())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize record")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}
