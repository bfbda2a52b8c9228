//! Asset parameters and portfolio holdings
//!
//! Per-ticker daily drift and volatility are supplied from outside the engine
//! (live data with a static fallback). The engine only reads them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Daily return statistics for a single ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetParameter {
    pub ticker: String,
    pub daily_mean_return: f64,
    pub daily_volatility: f64,
    #[serde(default)]
    pub name: String,
}

impl AssetParameter {
    #[must_use]
    pub fn new(ticker: &str, daily_mean_return: f64, daily_volatility: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            daily_mean_return,
            daily_volatility,
            name: String::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// A ticker and its share of the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub weight: f64,
}

impl Holding {
    #[must_use]
    pub fn new(ticker: &str, weight: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            weight,
        }
    }
}

/// Read-only ticker lookup. Keys are stored upper-cased.
///
/// Serializes as a plain list of [`AssetParameter`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AssetParameter>", into = "Vec<AssetParameter>")]
pub struct AssetTable {
    assets: FxHashMap<String, AssetParameter>,
}

// (ticker, name, daily mean, daily volatility)
const FALLBACK_ASSETS: &[(&str, &str, f64, f64)] = &[
    ("SPY", "SPDR S&P 500 ETF", 0.0004, 0.012),
    ("VOO", "Vanguard S&P 500 ETF", 0.0004, 0.012),
    ("VTI", "Vanguard Total Stock Market ETF", 0.0004, 0.0125),
    ("IVV", "iShares Core S&P 500 ETF", 0.0004, 0.012),
    ("QQQ", "Invesco QQQ Trust", 0.0006, 0.016),
    ("AAPL", "Apple Inc.", 0.0008, 0.018),
    ("MSFT", "Microsoft Corp.", 0.0007, 0.017),
    ("GOOGL", "Alphabet Inc.", 0.0006, 0.019),
    ("AMZN", "Amazon.com Inc.", 0.0007, 0.021),
    ("NVDA", "NVIDIA Corp.", 0.0015, 0.032),
    ("META", "Meta Platforms Inc.", 0.0008, 0.025),
    ("TSLA", "Tesla Inc.", 0.0012, 0.038),
    ("BND", "Vanguard Total Bond Market ETF", 0.00012, 0.003),
    ("AGG", "iShares Core US Aggregate Bond ETF", 0.00012, 0.003),
    ("TLT", "iShares 20+ Year Treasury Bond ETF", 0.00015, 0.009),
    ("GLD", "SPDR Gold Shares", 0.0003, 0.009),
    ("VXUS", "Vanguard Total International Stock ETF", 0.0003, 0.011),
    ("IWM", "iShares Russell 2000 ETF", 0.0004, 0.015),
    ("VNQ", "Vanguard Real Estate ETF", 0.0003, 0.014),
];

impl AssetTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Static parameters used when live market data is unavailable
    #[must_use]
    pub fn fallback() -> Self {
        FALLBACK_ASSETS
            .iter()
            .map(|&(ticker, name, mean, vol)| AssetParameter::new(ticker, mean, vol).named(name))
            .collect()
    }

    /// Insert or replace an entry, returning the previous parameters if any
    pub fn insert(&mut self, asset: AssetParameter) -> Option<AssetParameter> {
        self.assets.insert(asset.ticker.to_ascii_uppercase(), asset)
    }

    /// Overlay `other` on top of this table (entries in `other` win)
    pub fn merge(&mut self, other: AssetTable) {
        for asset in other.assets.into_values() {
            self.insert(asset);
        }
    }

    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&AssetParameter> {
        self.assets.get(&ticker.to_ascii_uppercase())
    }

    #[must_use]
    pub fn contains(&self, ticker: &str) -> bool {
        self.get(ticker).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl FromIterator<AssetParameter> for AssetTable {
    fn from_iter<I: IntoIterator<Item = AssetParameter>>(iter: I) -> Self {
        let mut table = Self::new();
        for asset in iter {
            table.insert(asset);
        }
        table
    }
}

impl From<Vec<AssetParameter>> for AssetTable {
    fn from(assets: Vec<AssetParameter>) -> Self {
        assets.into_iter().collect()
    }
}

impl From<AssetTable> for Vec<AssetParameter> {
    fn from(table: AssetTable) -> Self {
        let mut assets: Vec<_> = table.assets.into_values().collect();
        assets.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        assets
    }
}
