//! Screening strategies and trade setup construction.
//!
//! Both strategies read only the latest bar's indicators plus short trailing
//! windows. An absent indicator fails any comparison it takes part in.

use crate::domain::error::HunterError;
use crate::domain::flow::InstitutionalFlow;
use crate::domain::fundamentals::Fundamentals;
use crate::domain::ohlcv::{round2, trailing_high, trailing_low, OhlcvBar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window for the pivot high and base low.
pub const PIVOT_WINDOW: usize = 20;
/// Trailing window for the Power Play momentum low.
pub const MOMENTUM_WINDOW: usize = 40;
pub const MIN_MOMENTUM: f64 = 0.20;
/// Power Play requires the close to sit above this fraction of the pivot high.
pub const TIGHTNESS_RATIO: f64 = 0.90;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Standard,
    PowerPlay,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Standard => f.write_str("standard"),
            Strategy::PowerPlay => f.write_str("power_play"),
        }
    }
}

impl FromStr for Strategy {
    type Err = HunterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "vcp" => Ok(Strategy::Standard),
            "power_play" | "power-play" | "powerplay" => Ok(Strategy::PowerPlay),
            other => Err(HunterError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSetup {
    pub contractions: u32,
    pub pivot_price: f64,
    pub stop_loss: f64,
    pub target1: f64,
    pub dry_up_volume: bool,
    pub stage2_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub setup: TradeSetup,
    pub rationale: String,
}

/// Percent change of the latest close against the prior close, 2 decimals.
///
/// With a single bar the bar is compared against itself.
pub fn day_change_pct(bars: &[OhlcvBar]) -> f64 {
    let Some(last) = bars.last() else {
        return 0.0;
    };
    let prev = if bars.len() >= 2 { &bars[bars.len() - 2] } else { last };
    if prev.close == 0.0 {
        return 0.0;
    }
    round2((last.close - prev.close) / prev.close * 100.0)
}

/// Runs `strategy` over an indicator-enriched series.
///
/// Returns `None` when the filter fails, or when the resulting setup would not
/// satisfy `stop_loss < close < target1`.
pub fn evaluate(
    strategy: Strategy,
    bars: &[OhlcvBar],
    flow: &InstitutionalFlow,
    fundamentals: &Fundamentals,
    gate_fundamentals: bool,
) -> Option<Evaluation> {
    let last = bars.last()?;
    let evaluation = match strategy {
        Strategy::Standard => evaluate_standard(bars, flow, fundamentals, gate_fundamentals)?,
        Strategy::PowerPlay => evaluate_power_play(bars)?,
    };

    let setup = &evaluation.setup;
    if !(setup.stop_loss < last.close && last.close < setup.target1) {
        tracing::debug!(
            close = last.close,
            stop = setup.stop_loss,
            target = setup.target1,
            "discarding setup with inverted stop/target"
        );
        return None;
    }
    Some(evaluation)
}

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// Revenue growth above 15% or foreign net buying.
pub fn fundamentals_ok(flow: &InstitutionalFlow, fundamentals: &Fundamentals) -> bool {
    fundamentals.revenue_yoy > 15.0 || flow.foreign_net_buy > 0
}

fn evaluate_standard(
    bars: &[OhlcvBar],
    flow: &InstitutionalFlow,
    fundamentals: &Fundamentals,
    gate_fundamentals: bool,
) -> Option<Evaluation> {
    let last = bars.last()?;
    let ind = &last.indicators;

    let is_stage2 = gt(Some(last.close), ind.ma50) && gt(ind.ma50, ind.ma150);
    if !is_stage2 {
        return None;
    }
    if gate_fundamentals && !fundamentals_ok(flow, fundamentals) {
        return None;
    }

    let mut rationale = String::from("Stage 2 uptrend (close > MA50 > MA150); VCP base forming.");
    if flow.foreign_net_buy > 0 {
        rationale.push_str(" Foreign investors are net buyers recently.");
    }
    if fundamentals.revenue_yoy > 20.0 {
        rationale.push_str(" Strong revenue momentum.");
    }

    Some(Evaluation {
        setup: TradeSetup {
            contractions: 3,
            pivot_price: trailing_high(bars, PIVOT_WINDOW)?,
            stop_loss: round2(trailing_low(bars, PIVOT_WINDOW)? * 0.98),
            target1: round2(last.close * 1.20),
            dry_up_volume: gt(ind.vol_ma50, Some(last.volume as f64)),
            stage2_confirmed: is_stage2,
        },
        rationale,
    })
}

fn evaluate_power_play(bars: &[OhlcvBar]) -> Option<Evaluation> {
    let last = bars.last()?;
    let ind = &last.indicators;

    let strong_trend = gt(Some(last.close), ind.ma10) && gt(ind.ma10, ind.ma20);

    let low40 = trailing_low(bars, MOMENTUM_WINDOW)?;
    if low40 <= 0.0 {
        return None;
    }
    let momentum = (last.close - low40) / low40;

    let pivot = trailing_high(bars, PIVOT_WINDOW)?;
    let tight = last.close > pivot * TIGHTNESS_RATIO;

    if !(strong_trend && momentum >= MIN_MOMENTUM && tight) {
        return None;
    }

    let volume_support = gt(Some(last.volume as f64), ind.vol_ma50);

    let mut rationale = format!(
        "Strong momentum (+{:.0}% over {} days); trading tight within 10% of the {}-day high.",
        momentum * 100.0,
        MOMENTUM_WINDOW,
        PIVOT_WINDOW
    );
    if volume_support {
        rationale.push_str(" Volume expanding above its 50-day average.");
    }

    Some(Evaluation {
        setup: TradeSetup {
            contractions: 1,
            pivot_price: pivot,
            stop_loss: round2(last.close * 0.96),
            target1: round2(last.close * 1.25),
            dry_up_volume: !volume_support,
            stage2_confirmed: true,
        },
        rationale,
    })
}
