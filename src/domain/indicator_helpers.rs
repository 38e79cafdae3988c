//! Attaches the standard trailing indicators to a loaded bar series.

use crate::domain::indicator::{sma, IndicatorType, STANDARD_INDICATORS};
use crate::domain::ohlcv::{BarIndicators, OhlcvBar};

pub fn attach_indicators(bars: &mut [OhlcvBar]) {
    for indicator_type in STANDARD_INDICATORS {
        let series = sma::calculate(bars, indicator_type);
        for (bar, value) in bars.iter_mut().zip(series.values) {
            *slot(&mut bar.indicators, indicator_type) = value;
        }
    }
}

fn slot(indicators: &mut BarIndicators, indicator_type: IndicatorType) -> &mut Option<f64> {
    match indicator_type {
        IndicatorType::Sma(10) => &mut indicators.ma10,
        IndicatorType::Sma(20) => &mut indicators.ma20,
        IndicatorType::Sma(50) => &mut indicators.ma50,
        IndicatorType::Sma(150) => &mut indicators.ma150,
        IndicatorType::Sma(200) => &mut indicators.ma200,
        IndicatorType::VolumeSma(50) => &mut indicators.vol_ma50,
        other => unreachable!("{other} is not a standard indicator"),
    }
}
