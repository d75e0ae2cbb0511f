use crate::error::DashboardError;
use crate::selection::{ChartType, Timeframe};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Snapshot,
    Mock,
}

impl FromStr for SourceKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snapshot" => Ok(SourceKind::Snapshot),
            "mock" => Ok(SourceKind::Mock),
            _ => Err(DashboardError::UnknownSource(s.to_string())),
        }
    }
}

/// Where prices come from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_source")]
    pub source: SourceKind,

    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// "Now" for lookback filtering and mock generation. Defaults to the
    /// last trading day of the bundled snapshot.
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,

    /// Seed for the mock generator; unset draws from the OS.
    #[serde(default)]
    pub mock_seed: Option<u64>,
}

/// Chart surface geometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_overview_height")]
    pub overview_height: u32,
}

/// Initial selection and watchlist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    #[serde(default)]
    pub default_timeframe: Timeframe,

    #[serde(default)]
    pub default_chart_type: ChartType,

    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,

    #[serde(default = "default_true")]
    pub range_selector: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_source() -> SourceKind {
    SourceKind::Snapshot
}
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/sample_snapshot.json")
}
fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap_or_default()
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    500
}
fn default_overview_height() -> u32 {
    80
}
fn default_symbol() -> String {
    "AAPL".to_string()
}
fn default_watchlist() -> Vec<String> {
    crate::catalog::WATCHLIST.iter().map(|s| s.to_string()).collect()
}
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            snapshot_path: default_snapshot_path(),
            reference_date: default_reference_date(),
            mock_seed: None,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            overview_height: default_overview_height(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            default_timeframe: Timeframe::default(),
            default_chart_type: ChartType::default(),
            watchlist: default_watchlist(),
            range_selector: true,
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
