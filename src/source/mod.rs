pub mod mock;
pub mod snapshot;

use crate::models::RawRecord;
use anyhow::Result;

pub use self::mock::{MockSource, generate_mock_data};
pub use self::snapshot::{SnapshotSource, load_snapshot};

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable provider of raw daily records.
///
/// Both the bundled snapshot and the random generator hand the normalizer
/// the same `RawRecord` shape; the lookback filter is applied downstream.
pub trait MarketDataSource {
    /// Records for `symbol`, covering at least the last `days` days.
    fn records(&mut self, symbol: &str, days: i64) -> Result<Vec<RawRecord>>;

    /// Symbols this source can serve, sorted.
    fn symbols(&self) -> Vec<String>;
}
