use anyhow::{Context, Result};
use insights_sqlite::StoreConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = "insights.yaml";

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub store: Option<StoreConfig>,
    /// Output format: text or json.
    pub format: Option<String>,
    /// Log filter used when RUST_LOG is unset, e.g. "info" or "insights_sqlite=debug".
    pub log: Option<String>,
}

/// Load `path`, or `./insights.yaml` when no path is given and the file
/// exists. An explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    parse_config(&s).with_context(|| format!("invalid config {}", path.display())).map(Some)
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(s)?)
}
