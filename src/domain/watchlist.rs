//! In-memory watchlist with stop-proximity alerts.

use crate::domain::scanner::ScanResult;
use serde::Serialize;

/// Alerts fire once price is within this factor of the alert level.
pub const ALERT_PROXIMITY: f64 = 1.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistItem {
    pub symbol: String,
    pub alert_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopAlert {
    pub symbol: String,
    pub price: f64,
    pub alert_price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    items: Vec<WatchlistItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.items.iter().any(|i| i.symbol == symbol)
    }

    /// Adds the result's symbol with its stop as alert level, or removes it if
    /// already watched. Returns whether the symbol is watched afterwards.
    pub fn toggle(&mut self, result: &ScanResult) -> bool {
        if self.contains(&result.symbol) {
            self.items.retain(|i| i.symbol != result.symbol);
            false
        } else {
            self.items.push(WatchlistItem {
                symbol: result.symbol.clone(),
                alert_price: result.setup.stop_loss,
            });
            true
        }
    }

    pub fn filter<'a>(&self, results: &'a [ScanResult]) -> Vec<&'a ScanResult> {
        results.iter().filter(|r| self.contains(&r.symbol)).collect()
    }

    pub fn alerts(&self, results: &[ScanResult]) -> Vec<StopAlert> {
        results
            .iter()
            .filter_map(|r| {
                let item = self.items.iter().find(|i| i.symbol == r.symbol)?;
                (r.price <= item.alert_price * ALERT_PROXIMITY).then(|| StopAlert {
                    symbol: r.symbol.clone(),
                    price: r.price,
                    alert_price: item.alert_price,
                })
            })
            .collect()
    }
}
