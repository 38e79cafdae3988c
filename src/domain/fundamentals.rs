//! Monthly revenue fundamentals.
//!
//! The revenue feed reports `revenue_year` as a calendar year, so year-over-year
//! growth is derived by pairing the latest month with the same month one year
//! earlier. No EPS source exists; `eps_growth` is always reported as unavailable.

use crate::domain::fetch::fetch_rows;
use crate::domain::ohlcv::round2;
use crate::ports::data_port::{DataPort, Dataset};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Fundamentals {
    /// Latest month's revenue growth versus the same month a year earlier, in percent.
    pub revenue_yoy: f64,
    pub eps_growth: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevenueRow {
    pub date: NaiveDate,
    pub revenue: f64,
    pub revenue_month: u32,
    pub revenue_year: i32,
}

pub fn fundamentals_from_rows(rows: &[RevenueRow]) -> Fundamentals {
    let Some(latest) = rows
        .iter()
        .max_by_key(|r| (r.revenue_year, r.revenue_month))
    else {
        return Fundamentals::default();
    };

    let prior = rows.iter().find(|r| {
        r.revenue_year == latest.revenue_year - 1 && r.revenue_month == latest.revenue_month
    });

    let revenue_yoy = match prior {
        Some(p) if p.revenue > 0.0 => round2((latest.revenue - p.revenue) / p.revenue * 100.0),
        _ => 0.0,
    };

    Fundamentals {
        revenue_yoy,
        eps_growth: None,
    }
}

pub async fn load_fundamentals(
    port: &dyn DataPort,
    symbol: &str,
    start_date: NaiveDate,
    timeout: Duration,
) -> Fundamentals {
    match fetch_rows::<RevenueRow>(port, Dataset::MonthRevenue, symbol, start_date, timeout).await {
        Ok(rows) => fundamentals_from_rows(&rows),
        Err(e) => {
            tracing::warn!(symbol, error = %e, "revenue fetch failed, using zeroed fundamentals");
            Fundamentals::default()
        }
    }
}
