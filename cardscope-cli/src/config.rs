use anyhow::{Context, Result};
use cardscope_market::MarketConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_cardscope_home;

/// Overrides `market.api_key` when set and non-empty.
pub const STOCK_API_KEY_ENV: &str = "CARDSCOPE_STOCK_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub market: MarketConfig,
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// IANA zone used for "now" when a command gets no --date.
    pub timezone: String,
    /// Report file written alongside stdout. `--output` wins over this.
    pub output: Option<PathBuf>,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            timezone: "Europe/Moscow".to_string(),
            output: None,
        }
    }
}

impl Config {
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.market.api_key = Some(key);
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cardscope_home()?.join("config.toml"))
}

/// `~/.cardscope/config.toml` with the environment override applied.
pub fn load_config() -> Result<Config> {
    let cfg = load_config_from(&config_path()?)?;
    Ok(cfg.with_api_key_override(std::env::var(STOCK_API_KEY_ENV).ok()))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
