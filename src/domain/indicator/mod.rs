//! Trailing indicator types.
//!
//! - `PriceField`: which bar field an indicator averages
//! - `IndicatorType`: indicator identity + period (serves as lookup key)
//! - `IndicatorSeries`: an indicator evaluated over a bar series, one slot per bar

pub mod sma;

use crate::domain::ohlcv::OhlcvBar;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    Close,
    Volume,
}

impl PriceField {
    pub fn of(self, bar: &OhlcvBar) -> f64 {
        match self {
            PriceField::Close => bar.close,
            PriceField::Volume => bar.volume as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    VolumeSma(usize),
}

impl IndicatorType {
    pub fn period(self) -> usize {
        match self {
            IndicatorType::Sma(p) | IndicatorType::VolumeSma(p) => p,
        }
    }

    pub fn field(self) -> PriceField {
        match self {
            IndicatorType::Sma(_) => PriceField::Close,
            IndicatorType::VolumeSma(_) => PriceField::Volume,
        }
    }
}

/// The six indicators every loaded bar series carries.
pub const STANDARD_INDICATORS: [IndicatorType; 6] = [
    IndicatorType::Sma(10),
    IndicatorType::Sma(20),
    IndicatorType::Sma(50),
    IndicatorType::Sma(150),
    IndicatorType::Sma(200),
    IndicatorType::VolumeSma(50),
];

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::VolumeSma(period) => write!(f, "VOLSMA({})", period),
        }
    }
}
