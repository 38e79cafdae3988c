//! FinMind v4 REST data source.

use crate::domain::error::HunterError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{DataPort, Dataset};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.finmindtrade.com/api/v4/data";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;

#[derive(Debug, Deserialize)]
struct FinMindResponse {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

pub struct FinMindAdapter {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FinMindAdapter {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, HunterError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, HunterError> {
        let base_url = config
            .get_trimmed("data", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let token = config.get_trimmed("data", "token");
        let timeout_secs = config.get_int("data", "timeout_secs", DEFAULT_TIMEOUT_SECS);
        if timeout_secs <= 0 {
            return Err(HunterError::invalid("data", "timeout_secs", "must be positive"));
        }
        Self::new(&base_url, token, Duration::from_secs(timeout_secs as u64))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query(dataset: Dataset, symbol: &str, start_date: NaiveDate) -> [(&'static str, String); 3] {
        [
            ("dataset", dataset.wire_name().to_string()),
            ("data_id", symbol.to_string()),
            ("start_date", start_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[async_trait]
impl DataPort for FinMindAdapter {
    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        symbol: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<Value>, HunterError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&Self::query(dataset, symbol, start_date));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%dataset, symbol, %start_date, "requesting dataset");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown API error".to_string());
            return Err(HunterError::Api {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await?;
        parse_body(dataset, &body)
    }
}

/// Extracts the `data` rows from a response body. A body without `data`
/// yields no rows.
fn parse_body(dataset: Dataset, body: &str) -> Result<Vec<Value>, HunterError> {
    let parsed: FinMindResponse =
        serde_json::from_str(body).map_err(|e| HunterError::DataParse {
            dataset: dataset.to_string(),
            reason: e.to_string(),
        })?;

    match parsed.data {
        Some(rows) => Ok(rows),
        None => {
            tracing::debug!(%dataset, msg = ?parsed.msg, "response carried no data");
            Ok(Vec::new())
        }
    }
}
