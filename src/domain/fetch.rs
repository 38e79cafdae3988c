//! Typed, time-bounded row fetching shared by the loaders.

use crate::domain::error::HunterError;
use crate::ports::data_port::{DataPort, Dataset};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Fetches `dataset` rows and deserializes every row into `T`.
///
/// A single malformed row fails the whole fetch. A fetch that outlives
/// `timeout` is reported as an HTTP error.
pub async fn fetch_rows<T: DeserializeOwned>(
    port: &dyn DataPort,
    dataset: Dataset,
    symbol: &str,
    start_date: NaiveDate,
    timeout: Duration,
) -> Result<Vec<T>, HunterError> {
    let raw = tokio::time::timeout(timeout, port.fetch_dataset(dataset, symbol, start_date))
        .await
        .map_err(|_| HunterError::Http {
            reason: format!("{dataset} fetch for {symbol} timed out after {timeout:?}"),
        })??;

    raw.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| HunterError::DataParse {
                dataset: dataset.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
