//! Static company metadata and generator parameters, keyed by symbol.

use crate::models::{CompanyInfo, MarketParams};

/// Symbols shown in the watchlist, in display order.
pub const WATCHLIST: &[&str] = &[
    "AAPL", "MSFT", "AMZN", "TSLA", "META", "NVDA", "TCS", "INFY", "JPM", "GOOGL",
];

const UNKNOWN_SECTOR: &str = "Unknown";
const DEFAULT_BASE_PRICE: f64 = 100.0;
const DEFAULT_VOLATILITY: f64 = 2.0;

struct Entry {
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    base_price: f64,
    volatility: f64,
}

#[rustfmt::skip]
const ENTRIES: &[Entry] = &[
    Entry { symbol: "AAPL", name: "Apple Inc.", sector: "Technology", base_price: 180.0, volatility: 3.0 },
    Entry { symbol: "MSFT", name: "Microsoft Corporation", sector: "Technology", base_price: 320.0, volatility: 3.0 },
    Entry { symbol: "AMZN", name: "Amazon.com Inc.", sector: "Consumer Cyclical", base_price: 130.0, volatility: 4.0 },
    Entry { symbol: "TSLA", name: "Tesla, Inc.", sector: "Automotive", base_price: 250.0, volatility: 8.0 },
    Entry { symbol: "META", name: "Meta Platforms Inc.", sector: "Technology", base_price: 290.0, volatility: 5.0 },
    Entry { symbol: "NVDA", name: "NVIDIA Corporation", sector: "Technology", base_price: 420.0, volatility: 6.0 },
    Entry { symbol: "TCS", name: "Tata Consultancy Services", sector: "Technology", base_price: 3500.0, volatility: 40.0 },
    Entry { symbol: "INFY", name: "Infosys Limited", sector: "Technology", base_price: 1500.0, volatility: 20.0 },
    Entry { symbol: "JPM", name: "JPMorgan Chase & Co.", sector: "Financial Services", base_price: 140.0, volatility: 2.0 },
    Entry { symbol: "GOOGL", name: "Alphabet Inc.", sector: "Technology", base_price: 140.0, volatility: 3.0 },
];

fn lookup(symbol: &str) -> Option<&'static Entry> {
    let symbol = symbol.trim();
    ENTRIES.iter().find(|e| e.symbol.eq_ignore_ascii_case(symbol))
}

/// Company name and sector. Unknown symbols get `{ name: symbol, sector: "Unknown" }`.
pub fn company_info(symbol: &str) -> CompanyInfo {
    match lookup(symbol) {
        Some(e) => CompanyInfo {
            name: e.name.to_string(),
            sector: e.sector.to_string(),
        },
        None => CompanyInfo {
            name: symbol.to_string(),
            sector: UNKNOWN_SECTOR.to_string(),
        },
    }
}

pub fn market_params(symbol: &str) -> MarketParams {
    lookup(symbol)
        .map(|e| MarketParams {
            base_price: e.base_price,
            volatility: e.volatility,
        })
        .unwrap_or(MarketParams {
            base_price: DEFAULT_BASE_PRICE,
            volatility: DEFAULT_VOLATILITY,
        })
}
