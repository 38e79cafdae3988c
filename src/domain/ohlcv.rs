//! Daily bar representation.

use chrono::NaiveDate;
use serde::Serialize;

/// Trailing indicators attached to a bar once its series has been loaded.
///
/// A value is `None` until the series holds enough preceding bars for the
/// period; it is never zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarIndicators {
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub ma150: Option<f64>,
    pub ma200: Option<f64>,
    pub vol_ma50: Option<f64>,
}

/// One trading day for one symbol. Volume is in round lots (1,000 shares).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    #[serde(flatten)]
    pub indicators: BarIndicators,
}

impl OhlcvBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: i64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            indicators: BarIndicators::default(),
        }
    }
}

/// Highest high over the trailing `n` bars (or fewer, when the series is shorter).
pub fn trailing_high(bars: &[OhlcvBar], n: usize) -> Option<f64> {
    let start = bars.len().saturating_sub(n);
    bars[start..].iter().map(|b| b.high).reduce(f64::max)
}

/// Lowest low over the trailing `n` bars (or fewer, when the series is shorter).
pub fn trailing_low(bars: &[OhlcvBar], n: usize) -> Option<f64> {
    let start = bars.len().saturating_sub(n);
    bars[start..].iter().map(|b| b.low).reduce(f64::min)
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
