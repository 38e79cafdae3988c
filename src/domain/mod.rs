//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod indicator_helpers;
pub mod fetch;
pub mod bar_loader;
pub mod flow;
pub mod fundamentals;
pub mod strategy;
pub mod trend;
pub mod scanner;
pub mod universe;
pub mod position;
pub mod watchlist;
pub mod config_validation;
pub mod error;
