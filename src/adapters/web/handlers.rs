//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::position::{size_position, PositionSize, PositionSizeInput};
use crate::domain::scanner::{scan_market, ScanResult};
use crate::domain::strategy::Strategy;
use crate::domain::universe::UniverseEntry;

use super::{AppState, WebError};

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub strategy: Option<String>,
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub strategy: Strategy,
    pub as_of: NaiveDate,
    pub results: Vec<ScanResult>,
}

pub async fn scan(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanResponse>, WebError> {
    let mut options = state.scan_defaults.clone();
    if let Some(s) = query.strategy.as_deref() {
        options.strategy = s.parse()?;
    }
    options.as_of = query
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let results = scan_market(state.data_port.as_ref(), &state.universe, &options).await;
    Ok(Json(ScanResponse {
        strategy: options.strategy,
        as_of: options.as_of,
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SizeQuery {
    pub entry: f64,
    pub stop: f64,
    pub capital: Option<f64>,
    pub risk_pct: Option<f64>,
}

pub async fn position_size(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SizeQuery>,
) -> Result<Json<PositionSize>, WebError> {
    let input = PositionSizeInput {
        capital: query.capital.unwrap_or(state.default_capital),
        risk_pct: query.risk_pct.unwrap_or(state.default_risk_pct),
        entry: query.entry,
        stop: query.stop,
    };
    if !(0.0..=100.0).contains(&input.risk_pct) {
        return Err(WebError::bad_request("risk_pct must be between 0 and 100"));
    }
    Ok(Json(size_position(&input)))
}

pub async fn universe(State(state): State<Arc<AppState>>) -> Json<Vec<UniverseEntry>> {
    Json(state.universe.clone())
}

pub async fn not_found() -> WebError {
    WebError::not_found("no such route")
}
