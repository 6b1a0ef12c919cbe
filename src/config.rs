// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "shipscraper.yaml";

const DEFAULT_SOURCE_URL: &str = "https://azurlane.koumakan.jp/wiki/List_of_Ships_by_Stats";

/// Nations that keep their own label; everything else is bucketed as `Collab`.
const DEFAULT_NATIONS: &[&str] = &[
    "Royal Navy",
    "Eagle Union",
    "Sakura Empire",
    "Iron Blood",
    "Dragon Empery",
    "Northern Parliament",
    "Iris Libre",
    "Vichya Dominion",
    "Sardegna Empire",
    "META",
    "Universal",
];

/// Everything the pipeline needs that used to be a process-wide constant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page listing every ship and its stats.
    pub source_url: Url,
    /// Read as the previous dataset when present, always overwritten.
    pub dataset_path: PathBuf,
    pub sheet_name: String,
    /// Number of category tables on the page (one per hull classification).
    pub table_count: usize,
    pub nations: Vec<String>,
    pub user_agent: String,
    /// `None` leaves the request without a timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should parse"),
            dataset_path: PathBuf::from("ships.xlsx"),
            sheet_name: "Sheet1".to_string(),
            table_count: 7,
            nations: DEFAULT_NATIONS.iter().map(|n| n.to_string()).collect(),
            user_agent: concat!("shipscraper/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults, overridden field by field from `path` if that file exists.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing {:?}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // an empty document deserializes to unit, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
