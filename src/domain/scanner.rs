//! Market scan orchestration.
//!
//! For every universe entry the three fetches (bars, institutional flow,
//! fundamentals) run concurrently and are joined before evaluation. Symbols are
//! scanned concurrently too; result order follows the universe order. Each
//! loader absorbs its own failures, so one bad symbol never aborts the scan.

use crate::domain::bar_loader::load_bars;
use crate::domain::flow::{load_institutional_flow, InstitutionalFlow};
use crate::domain::fundamentals::{load_fundamentals, Fundamentals};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::strategy::{day_change_pct, evaluate, Strategy, TradeSetup};
use crate::domain::trend::{trend_status, TrendStatus};
use crate::domain::universe::UniverseEntry;
use crate::ports::data_port::DataPort;
use chrono::{Duration as ChronoDuration, NaiveDate};
use futures::future::join_all;
use serde::Serialize;
use std::time::Duration;

/// Floor on `ScanOptions::min_bars`; shorter series are never scanned.
pub const MIN_BARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub as_of: NaiveDate,
    pub strategy: Strategy,
    pub price_lookback_days: i64,
    pub flow_lookback_days: i64,
    pub flow_max_rows: usize,
    pub revenue_lookback_days: i64,
    pub min_bars: usize,
    pub gate_fundamentals: bool,
    pub fetch_timeout: Duration,
}

impl ScanOptions {
    pub fn new(as_of: NaiveDate, strategy: Strategy) -> Self {
        Self {
            as_of,
            strategy,
            price_lookback_days: 365,
            flow_lookback_days: 10,
            flow_max_rows: 15,
            revenue_lookback_days: 400,
            min_bars: MIN_BARS,
            gate_fundamentals: false,
            fetch_timeout: Duration::from_secs(15),
        }
    }

    fn start(&self, days: i64) -> NaiveDate {
        self.as_of - ChronoDuration::days(days)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub strategy: Strategy,
    pub price: f64,
    pub change_pct: f64,
    pub trend: TrendStatus,
    pub candles: Vec<OhlcvBar>,
    pub chips: InstitutionalFlow,
    pub fundamentals: Fundamentals,
    pub setup: TradeSetup,
    pub rationale: String,
}

pub async fn scan_market(
    port: &dyn DataPort,
    universe: &[UniverseEntry],
    options: &ScanOptions,
) -> Vec<ScanResult> {
    tracing::info!(
        symbols = universe.len(),
        strategy = %options.strategy,
        as_of = %options.as_of,
        "starting market scan"
    );

    let results: Vec<ScanResult> = join_all(universe.iter().map(|entry| scan_symbol(port, entry, options)))
        .await
        .into_iter()
        .flatten()
        .collect();

    tracing::info!(
        passed = results.len(),
        scanned = universe.len(),
        "market scan complete"
    );
    results
}

pub async fn scan_symbol(
    port: &dyn DataPort,
    entry: &UniverseEntry,
    options: &ScanOptions,
) -> Option<ScanResult> {
    let symbol = entry.symbol.as_str();
    let timeout = options.fetch_timeout;

    let (candles, chips, fundamentals) = tokio::join!(
        load_bars(port, symbol, options.start(options.price_lookback_days), timeout),
        load_institutional_flow(
            port,
            symbol,
            options.start(options.flow_lookback_days),
            options.flow_max_rows,
            timeout,
        ),
        load_fundamentals(port, symbol, options.start(options.revenue_lookback_days), timeout),
    );

    let min_bars = options.min_bars.max(MIN_BARS);
    if candles.len() < min_bars {
        tracing::info!(
            symbol,
            bars = candles.len(),
            minimum = min_bars,
            "skipping: insufficient bars"
        );
        return None;
    }

    let Some(evaluation) = evaluate(
        options.strategy,
        &candles,
        &chips,
        &fundamentals,
        options.gate_fundamentals,
    ) else {
        tracing::debug!(symbol, strategy = %options.strategy, "filter not passed");
        return None;
    };

    let last = candles.last()?;
    let price = last.close;
    let change_pct = day_change_pct(&candles);
    let trend = trend_status(price, last);

    tracing::info!(symbol, price, pivot = evaluation.setup.pivot_price, "setup found");

    Some(ScanResult {
        symbol: entry.display_symbol(),
        name: entry.name.clone(),
        sector: entry.sector.clone(),
        strategy: options.strategy,
        price,
        change_pct,
        trend,
        candles,
        chips,
        fundamentals,
        setup: evaluation.setup,
        rationale: evaluation.rationale,
    })
}
