//! Static snapshot loader: a JSON array of records or a CSV export with a
//! `Symbol,Date,Open,High,Low,Close,Volume` header.

use super::MarketDataSource;
use crate::error::DashboardError;
use crate::models::{RawRecord, RawValue};
use crate::normalizer::normalise_symbol;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Read every record from a `.json` or `.csv` snapshot.
pub fn load_snapshot(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let records = match ext.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => return Err(DashboardError::UnsupportedSnapshot(path.to_path_buf()).into()),
    };

    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| DashboardError::SnapshotIo {
        path: path.to_path_buf(),
        source,
    })?;
    let records = serde_json::from_str(&text).map_err(|source| DashboardError::SnapshotJson {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(records)
}

fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let csv_err = |source: csv::Error| DashboardError::SnapshotCsv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (
        Some(sym_idx),
        Some(date_idx),
        Some(open_idx),
        Some(high_idx),
        Some(low_idx),
        Some(close_idx),
    ) = (
        column("symbol"),
        column("date"),
        column("open"),
        column("high"),
        column("low"),
        column("close"),
    )
    else {
        anyhow::bail!(
            "{:?}: missing one of Symbol, Date, Open, High, Low, Close columns",
            path
        );
    };
    let vol_idx = column("volume");

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Row {} in {:?}: {}", i + 1, path, e);
                continue;
            }
        };
        let text = |idx: usize| RawValue::Text(row.get(idx).unwrap_or_default().to_string());

        records.push(RawRecord {
            symbol: row.get(sym_idx).unwrap_or_default().to_string(),
            date: row.get(date_idx).unwrap_or_default().to_string(),
            open: text(open_idx),
            high: text(high_idx),
            low: text(low_idx),
            close: text(close_idx),
            volume: vol_idx
                .and_then(|idx| row.get(idx))
                .filter(|v| !v.is_empty())
                .map(|v| RawValue::Text(v.to_string())),
        });
    }
    Ok(records)
}

// ── Snapshot source ───────────────────────────────────────────────────────────

/// Records loaded once and served unchanged on every request.
pub struct SnapshotSource {
    records: Vec<RawRecord>,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self> {
        let records =
            load_snapshot(path).with_context(|| format!("Failed to load snapshot {:?}", path))?;
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl MarketDataSource for SnapshotSource {
    fn records(&mut self, symbol: &str, _days: i64) -> Result<Vec<RawRecord>> {
        let symbol = normalise_symbol(symbol);
        Ok(self
            .records
            .iter()
            .filter(|r| normalise_symbol(&r.symbol) == symbol)
            .cloned()
            .collect())
    }

    fn symbols(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| normalise_symbol(&r.symbol))
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
