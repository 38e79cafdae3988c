//! JSON HTTP API adapter.
//!
//! Serves scan results and position sizes to a browser front end. Static
//! assets under `static/` are served as-is; `/` serves `static/index.html`.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

use crate::domain::scanner::ScanOptions;
use crate::domain::universe::UniverseEntry;
use crate::ports::data_port::DataPort;

pub struct AppState {
    pub data_port: Arc<dyn DataPort>,
    pub universe: Vec<UniverseEntry>,
    /// Template for each request; `as_of` and `strategy` are set per request.
    pub scan_defaults: ScanOptions,
    pub default_capital: f64,
    pub default_risk_pct: f64,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/scan", get(handlers::scan))
        .route("/api/position-size", get(handlers::position_size))
        .route("/api/universe", get(handlers::universe))
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
