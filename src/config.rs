use crate::calendar::Aggregator;
use crate::color_utils::ColorMode;
use crate::storage::Dataset;
use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week => ViewMode::Day,
            ViewMode::Day => ViewMode::Month,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(anyhow!("Unknown view '{}' (expected month, week or day)", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub user_id: String,
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Config {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            data_path: None,
            color_mode: ColorMode::default(),
            utc_offset_minutes: None,
            default_view: ViewMode::default(),
        }
    }

    pub fn get_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var("HUBCAL_CONFIG_DIR") {
            return Some(PathBuf::from(custom).join("config.toml"));
        }
        ProjectDirs::from("org", "hubcal", "hubcal").map(|p| p.config_dir().join("config.toml"))
    }

    /// `Ok(None)` only when there is no config file; a file that exists but
    /// does not parse is still an error.
    pub fn load_optional() -> Result<Option<Self>> {
        match Self::get_path() {
            Some(path) => Self::load_from_optional(&path),
            None => Ok(None),
        }
    }

    pub fn load_from_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Parsing config {}", path.display()))?;
        if config.user_id.trim().is_empty() {
            return Err(anyhow!("user_id must not be empty"));
        }
        Ok(config)
    }

    /// Pinned viewer offset. `None` leaves conversion to the system zone.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|m| FixedOffset::east_opt(m * 60))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Dataset::default_path()?),
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        let aggregator = Aggregator::new(&self.user_id).with_color_mode(self.color_mode);
        match self.offset() {
            Some(offset) => aggregator.with_offset(offset),
            None => aggregator,
        }
    }
}
