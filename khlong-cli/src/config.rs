use anyhow::{Context, Result};
use khlong_finance::ColumnBindings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "khlong.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnBindings,
}

/// Column overrides given on the command line; these win over the file.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub amount: Option<String>,
    pub transfer_type: Option<String>,
    pub registry_info: Option<String>,
    pub date: Option<String>,
    pub company_name: Option<String>,
}

impl Config {
    pub fn apply(mut self, o: ColumnOverrides) -> Self {
        if let Some(v) = o.amount {
            self.columns.amount = v;
        }
        if let Some(v) = o.transfer_type {
            self.columns.transfer_type = v;
        }
        if let Some(v) = o.registry_info {
            self.columns.registry_info = v;
        }
        if o.date.is_some() {
            self.columns.date = o.date;
        }
        if o.company_name.is_some() {
            self.columns.company_name = o.company_name;
        }
        self
    }
}

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    let s = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
