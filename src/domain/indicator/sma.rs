//! Simple moving average.
//!
//! SMA(n)[i] = round2(sum(F[i-j] for j in 0..n) / n)
//! Warmup: the first (n-1) slots are absent.

use crate::domain::indicator::{IndicatorSeries, IndicatorType, PriceField};
use crate::domain::ohlcv::{round2, OhlcvBar};

/// Trailing mean of `field` over `period` bars, one slot per input bar.
pub fn moving_average(bars: &[OhlcvBar], period: usize, field: PriceField) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; bars.len()];
    }
    let mut values = Vec::with_capacity(bars.len());
    let mut window_sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += field.of(bar);
        if i >= period {
            window_sum -= field.of(&bars[i - period]);
        }
        values.push((i + 1 >= period).then(|| round2(window_sum / period as f64)));
    }
    values
}

pub fn calculate(bars: &[OhlcvBar], indicator_type: IndicatorType) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type,
        values: moving_average(bars, indicator_type.period(), indicator_type.field()),
    }
}
