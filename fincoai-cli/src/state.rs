use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FINCOAI_HOME`, else `~/.fincoai`
pub fn fincoai_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINCOAI_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fincoai"))
}

pub fn ensure_fincoai_home() -> Result<PathBuf> {
    let dir = fincoai_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(fincoai_home()?.join("data"))
}
