use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use fincoai_ingest::DEFAULT_BASE_URL;

use crate::state::{default_data_dir, ensure_fincoai_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Synthetic transaction generator; `POST {base_url}/generate`
    pub base_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Where normalized records are written (default: ~/.fincoai/data)
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing-subscriber` filter directives; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_fincoai_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).context("parse config.toml")
}

fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("[server]\nbase_url = \"http://gen.internal:9000\"\n").unwrap();
        assert_eq!(cfg.server.base_url, "http://gen.internal:9000");
        assert_eq!(cfg.logging.filter, "info");
        assert!(cfg.storage.dir.is_none());
    }

    #[test]
    fn test_sections_without_keys_use_defaults() {
        let cfg = parse_config("[server]\n[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(cfg.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn test_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg = parse_config(&s).unwrap();
        assert_eq!(cfg.server.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_storage_dir_override() {
        let cfg = parse_config("[storage]\ndir = \"/srv/fincoai\"\n").unwrap();
        assert_eq!(cfg.data_dir().unwrap(), PathBuf::from("/srv/fincoai"));
    }
}
