//! Long-term trend classification shown alongside each scan result.

use crate::domain::ohlcv::OhlcvBar;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendStatus::Bullish => f.write_str("bullish"),
            TrendStatus::Bearish => f.write_str("bearish"),
            TrendStatus::Neutral => f.write_str("neutral"),
        }
    }
}

/// price > MA50 > MA200 is bullish, price < MA50 < MA200 bearish.
pub fn trend_status(price: f64, last: &OhlcvBar) -> TrendStatus {
    let (Some(ma50), Some(ma200)) = (last.indicators.ma50, last.indicators.ma200) else {
        return TrendStatus::Neutral;
    };
    if price > ma50 && ma50 > ma200 {
        TrendStatus::Bullish
    } else if price < ma50 && ma50 < ma200 {
        TrendStatus::Bearish
    } else {
        TrendStatus::Neutral
    }
}
