//! Synthetic OHLCV generator: a random walk seeded from the catalog's base
//! price and volatility for each symbol.

use super::MarketDataSource;
use crate::catalog::{WATCHLIST, market_params};
use crate::config::DataConfig;
use crate::models::{RawRecord, RawValue};
use crate::normalizer::normalise_symbol;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// `days` daily bars ending the day before `today`, oldest first.
///
/// Each bar opens within half a volatility of the previous close, and its
/// close is the mean of open, high and low.
pub fn generate_mock_data<R: Rng>(
    symbol: &str,
    days: i64,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<RawRecord> {
    let params = market_params(symbol);
    let vol = params.volatility;
    let mut price = params.base_price;
    let mut data = Vec::with_capacity(days.max(0) as usize);

    for i in 0..days {
        let date = today - Duration::days(days - i);

        let open = price + (rng.random::<f64>() - 0.5) * vol;
        let high = open + rng.random::<f64>() * vol;
        let low = open - rng.random::<f64>() * vol;
        let close = (open + high + low) / 3.0;
        let volume = (rng.random::<f64>() * 1_000_000.0).floor();

        data.push(RawRecord {
            symbol: normalise_symbol(symbol),
            date: date.format("%Y-%m-%d").to_string(),
            open: RawValue::Number(open),
            high: RawValue::Number(high),
            low: RawValue::Number(low),
            close: RawValue::Number(close),
            volume: Some(RawValue::Number(volume)),
        });

        price = close;
    }

    debug!("{}: generated {} bars", symbol, data.len());
    data
}

// ── Mock source ───────────────────────────────────────────────────────────────

/// Regenerates a fresh random walk on every request.
pub struct MockSource<R = StdRng> {
    rng: R,
    today: NaiveDate,
}

impl MockSource<StdRng> {
    /// Bars ending the day before `today`, drawn from OS entropy.
    pub fn at(today: NaiveDate) -> Self {
        Self::with_rng(StdRng::from_os_rng(), today)
    }

    pub fn seeded(seed: u64, today: NaiveDate) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), today)
    }

    /// Dated from the configured reference day; seeded when `mock_seed` is set.
    pub fn from_config(config: &DataConfig) -> Self {
        match config.mock_seed {
            Some(seed) => Self::seeded(seed, config.reference_date),
            None => Self::at(config.reference_date),
        }
    }
}

impl<R: Rng> MockSource<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

impl<R: Rng> MarketDataSource for MockSource<R> {
    fn records(&mut self, symbol: &str, days: i64) -> Result<Vec<RawRecord>> {
        Ok(generate_mock_data(symbol, days, self.today, &mut self.rng))
    }

    fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = WATCHLIST.iter().map(|s| s.to_string()).collect();
        symbols.sort();
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    #[test]
    fn test_generates_requested_days() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_mock_data("AAPL", 30, today(), &mut rng);
        assert_eq!(data.len(), 30);
        assert_eq!(data.first().unwrap().date, "2024-12-11");
        assert_eq!(data.last().unwrap().date, "2025-01-09");
    }

    #[test]
    fn test_bars_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        for rec in generate_mock_data("TSLA", 60, today(), &mut rng) {
            let open = rec.open.as_f64().unwrap();
            let high = rec.high.as_f64().unwrap();
            let low = rec.low.as_f64().unwrap();
            let close = rec.close.as_f64().unwrap();
            let volume = rec.volume.and_then(|v| v.as_f64()).unwrap();
            assert!(low <= open && open <= high);
            assert!(low <= close && close <= high);
            assert!((0.0..1_000_000.0).contains(&volume));
            assert_eq!(volume.fract(), 0.0);
        }
    }

    #[test]
    fn test_walk_starts_near_base_price() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate_mock_data("TCS", 1, today(), &mut rng).remove(0);
        let open = first.open.as_f64().unwrap();
        // base 3500, volatility 40 → open within ±20
        assert!((3480.0..=3520.0).contains(&open));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = MockSource::seeded(9, today());
        let mut b = MockSource::seeded(9, today());
        assert_eq!(a.records("MSFT", 10).unwrap(), b.records("MSFT", 10).unwrap());
        assert_eq!(a.symbols().len(), WATCHLIST.len());
    }

    #[test]
    fn test_unseeded_source_follows_reference_date() {
        let config = DataConfig {
            mock_seed: None,
            reference_date: today(),
            ..DataConfig::default()
        };
        let mut source = MockSource::from_config(&config);
        assert_eq!(source.today(), today());

        let data = source.records("AAPL", 30).unwrap();
        assert_eq!(data.len(), 30);
        assert_eq!(data.last().unwrap().date, "2025-01-09");
    }

    #[test]
    fn test_seed_from_config() {
        let config = DataConfig {
            mock_seed: Some(5),
            reference_date: today(),
            ..DataConfig::default()
        };
        let mut a = MockSource::from_config(&config);
        let mut b = MockSource::seeded(5, today());
        assert_eq!(a.records("JPM", 5).unwrap(), b.records("JPM", 5).unwrap());
    }

    #[test]
    fn test_zero_days_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_mock_data("AAPL", 0, today(), &mut rng).is_empty());
    }
}
