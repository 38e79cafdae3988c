#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use vcphunter::domain::error::HunterError;
use vcphunter::domain::universe::UniverseEntry;
use vcphunter::ports::data_port::{DataPort, Dataset};

pub struct MockDataPort {
    pub rows: HashMap<(Dataset, String), Vec<Value>>,
    pub errors: HashMap<(Dataset, String), String>,
    pub delays: HashMap<String, Duration>,
    pub requests: Mutex<Vec<(Dataset, String, NaiveDate)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            errors: HashMap::new(),
            delays: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, dataset: Dataset, symbol: &str, rows: Vec<Value>) -> Self {
        self.rows.insert((dataset, symbol.to_string()), rows);
        self
    }

    pub fn with_prices(self, symbol: &str, closes: &[f64]) -> Self {
        self.with_rows(Dataset::StockPrice, symbol, price_rows(closes, 1_000_000.0))
    }

    pub fn with_error(mut self, dataset: Dataset, symbol: &str, reason: &str) -> Self {
        self.errors
            .insert((dataset, symbol.to_string()), reason.to_string());
        self
    }

    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    pub fn requests_for(&self, dataset: Dataset, symbol: &str) -> Vec<NaiveDate> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, s, _)| *d == dataset && s == symbol)
            .map(|(_, _, date)| *date)
            .collect()
    }
}

#[async_trait]
impl DataPort for MockDataPort {
    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        symbol: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<Value>, HunterError> {
        self.requests
            .lock()
            .unwrap()
            .push((dataset, symbol.to_string(), start_date));

        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        let key = (dataset, symbol.to_string());
        if let Some(reason) = self.errors.get(&key) {
            return Err(HunterError::Http {
                reason: reason.clone(),
            });
        }
        Ok(self.rows.get(&key).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub const AS_OF: (i32, u32, u32) = (2024, 6, 28);

pub fn as_of() -> NaiveDate {
    date(AS_OF.0, AS_OF.1, AS_OF.2)
}

/// Price rows on consecutive days ending at `as_of()`, high/low one point off close.
pub fn price_rows(closes: &[f64], shares: f64) -> Vec<Value> {
    let first = as_of() - chrono::Duration::days(closes.len() as i64 - 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            json!({
                "date": (first + chrono::Duration::days(i as i64)).format("%Y-%m-%d").to_string(),
                "stock_id": "TEST",
                "Trading_Volume": shares,
                "open": close,
                "max": close + 1.0,
                "min": close - 1.0,
                "close": close,
            })
        })
        .collect()
}

pub fn rising(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

pub fn flow_row(name: &str, buy: f64, sell: f64) -> Value {
    json!({ "date": "2024-06-27", "stock_id": "TEST", "name": name, "buy": buy, "sell": sell })
}

pub fn revenue_row(year: i32, month: u32, revenue: f64) -> Value {
    json!({
        "date": format!("{:04}-{:02}-10", year, month),
        "stock_id": "TEST",
        "country": "Taiwan",
        "revenue": revenue,
        "revenue_month": month,
        "revenue_year": year,
    })
}

pub fn entry(symbol: &str) -> UniverseEntry {
    UniverseEntry::new(symbol, &format!("Name {symbol}"), "Test")
}
