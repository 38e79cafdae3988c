//! Risk-based position sizing.
//!
//! Sizes a long entry so that a stop-out loses at most `risk_pct` of capital,
//! without exceeding the capital itself. Quantities of 1,000 shares or more are
//! reported in whole lots; smaller positions are reported in single shares.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOT_SIZE: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PositionSizeInput {
    pub capital: f64,
    pub risk_pct: f64,
    pub entry: f64,
    pub stop: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderUnit {
    #[default]
    Lot,
    Share,
}

impl fmt::Display for OrderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderUnit::Lot => f.write_str("lots"),
            OrderUnit::Share => f.write_str("shares"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PositionSize {
    /// Order quantity in `unit`.
    pub quantity: u64,
    pub unit: OrderUnit,
    pub shares: u64,
    /// Loss at the stop for `shares`, rounded to whole currency units.
    pub risk_amount: f64,
    pub total_cost: f64,
    /// True when capital, not risk, limited the size.
    pub capital_bound: bool,
}

impl PositionSize {
    pub fn is_empty(&self) -> bool {
        self.shares == 0
    }
}

/// Sizes a position. Invalid inputs (non-positive capital or entry, or a stop at
/// or above the entry) yield an empty position rather than an error.
pub fn size_position(input: &PositionSizeInput) -> PositionSize {
    let PositionSizeInput {
        capital,
        risk_pct,
        entry,
        stop,
    } = *input;

    let risk_per_share = entry - stop;
    if !(capital > 0.0 && entry > 0.0 && risk_per_share > 0.0 && risk_pct >= 0.0) {
        return PositionSize::default();
    }

    let max_risk_amount = capital * risk_pct / 100.0;
    let shares_by_risk = max_risk_amount / risk_per_share;
    let shares_by_capital = capital / entry;
    let final_shares = shares_by_risk.min(shares_by_capital);

    let (quantity, unit, shares) = if final_shares >= LOT_SIZE as f64 {
        let lots = (final_shares / LOT_SIZE as f64).floor() as u64;
        (lots, OrderUnit::Lot, lots * LOT_SIZE)
    } else {
        let units = final_shares.floor() as u64;
        (units, OrderUnit::Share, units)
    };

    let risk_amount = (shares as f64 * risk_per_share).round();
    let total_cost = (shares as f64 * entry).round();

    PositionSize {
        quantity,
        unit,
        shares,
        risk_amount,
        total_cost,
        capital_bound: total_cost >= capital,
    }
}
