//! Daily bar loading.
//!
//! Fetches raw price rows, converts traded shares to lots and attaches the
//! standard indicators. Any failure yields an empty series, which callers read
//! as "insufficient data".

use crate::domain::fetch::fetch_rows;
use crate::domain::indicator_helpers::attach_indicators;
use crate::domain::ohlcv::{round_half_up, OhlcvBar};
use crate::ports::data_port::{DataPort, Dataset};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

pub const SHARES_PER_LOT: f64 = 1000.0;

#[derive(Debug, Clone, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    #[serde(rename = "max")]
    pub high: f64,
    #[serde(rename = "min")]
    pub low: f64,
    pub close: f64,
    #[serde(rename = "Trading_Volume")]
    pub trading_volume: f64,
}

pub async fn load_bars(
    port: &dyn DataPort,
    symbol: &str,
    start_date: NaiveDate,
    timeout: Duration,
) -> Vec<OhlcvBar> {
    match fetch_rows::<PriceRow>(port, Dataset::StockPrice, symbol, start_date, timeout).await {
        Ok(rows) => {
            let bars = bars_from_rows(rows);
            tracing::debug!(symbol, bars = bars.len(), "loaded price bars");
            bars
        }
        Err(e) => {
            tracing::warn!(symbol, error = %e, "price fetch failed, treating as no data");
            Vec::new()
        }
    }
}

/// Converts price rows into an ascending, indicator-enriched bar series.
pub fn bars_from_rows(rows: Vec<PriceRow>) -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = rows
        .into_iter()
        .map(|r| {
            OhlcvBar::new(
                r.date,
                r.open,
                r.high,
                r.low,
                r.close,
                round_half_up(r.trading_volume / SHARES_PER_LOT),
            )
        })
        .collect();
    bars.sort_by_key(|b| b.date);
    attach_indicators(&mut bars);
    bars
}
