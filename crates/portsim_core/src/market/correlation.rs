//! Heuristic pairwise correlations from ticker classes.
//!
//! Each off-diagonal entry is the value of the first rule in [`RULES`] whose
//! predicate matches the pair. The table order is the precedence.

use serde::{Deserialize, Serialize};

pub const BROAD_EQUITY: &[&str] = &["SPY", "VOO", "VTI", "IVV"];
pub const LARGE_CAP_TECH: &[&str] = &["QQQ", "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META"];
pub const BONDS: &[&str] = &["BND", "AGG", "TLT"];
pub const GOLD: &str = "GLD";
pub const HIGH_VOLATILITY: &str = "TSLA";

/// Correlation for pairs no rule matches
pub const DEFAULT_CORRELATION: f64 = 0.60;

/// Ordered (name, predicate, value) rules; the first match wins.
///
/// Identity (i == j) is handled by position before the table is consulted.
pub const RULES: &[(&str, fn(&str, &str) -> bool, f64)] = &[
    ("broad equity", both_broad_equity, 0.85),
    ("large-cap tech", both_tech, 0.75),
    ("bond vs risk asset", one_bond_without_gold, -0.30),
    ("gold", either_gold, 0.10),
    ("high-volatility stock", either_high_volatility, 0.50),
];

fn in_set(set: &[&str], ticker: &str) -> bool {
    set.iter().any(|t| t.eq_ignore_ascii_case(ticker))
}

fn both_broad_equity(a: &str, b: &str) -> bool {
    in_set(BROAD_EQUITY, a) && in_set(BROAD_EQUITY, b)
}

fn both_tech(a: &str, b: &str) -> bool {
    in_set(LARGE_CAP_TECH, a) && in_set(LARGE_CAP_TECH, b)
}

fn one_bond_without_gold(a: &str, b: &str) -> bool {
    let (a_bond, b_bond) = (in_set(BONDS, a), in_set(BONDS, b));
    (a_bond && !b_bond && !b.eq_ignore_ascii_case(GOLD))
        || (b_bond && !a_bond && !a.eq_ignore_ascii_case(GOLD))
}

fn either_gold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(GOLD) || b.eq_ignore_ascii_case(GOLD)
}

fn either_high_volatility(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(HIGH_VOLATILITY) || b.eq_ignore_ascii_case(HIGH_VOLATILITY)
}

/// Correlation between two distinct positions holding `a` and `b`
#[must_use]
pub fn pair_correlation(a: &str, b: &str) -> f64 {
    RULES
        .iter()
        .find(|(_, matches, _)| matches(a, b))
        .map_or(DEFAULT_CORRELATION, |&(_, _, value)| value)
}

/// Dense symmetric correlation matrix, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Build the matrix for an ordered ticker list (duplicates allowed)
    #[must_use]
    pub fn from_tickers<S: AsRef<str>>(tickers: &[S]) -> Self {
        let dim = tickers.len();
        let mut values = vec![0.0; dim * dim];
        for i in 0..dim {
            for j in 0..dim {
                values[i * dim + j] = if i == j {
                    1.0
                } else {
                    pair_correlation(tickers[i].as_ref(), tickers[j].as_ref())
                };
            }
        }
        Self { dim, values }
    }

    /// Wrap an existing row-major matrix
    #[must_use]
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let dim = rows.len();
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self { dim, values }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim + j]
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.dim.max(1)).map(<[f64]>::to_vec).collect()
    }
}
