//! Institutional flow aggregation.

use crate::domain::bar_loader::SHARES_PER_LOT;
use crate::domain::fetch::fetch_rows;
use crate::domain::ohlcv::round_half_up;
use crate::ports::data_port::{DataPort, Dataset};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const FOREIGN_INVESTOR: &str = "Foreign_Investor";
pub const INVESTMENT_TRUST: &str = "Investment_Trust";

/// Net lots bought by foreign investors and investment trusts over the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstitutionalFlow {
    pub foreign_net_buy: i64,
    pub trust_net_buy: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionalRow {
    pub date: NaiveDate,
    pub name: String,
    pub buy: f64,
    pub sell: f64,
}

/// Nets buy minus sell per class over the last `max_rows` rows, in lots.
///
/// The feed interleaves classes and days in one list; classes other than
/// foreign investors and investment trusts are ignored.
pub fn aggregate_flow(rows: &[InstitutionalRow], max_rows: usize) -> InstitutionalFlow {
    let start = rows.len().saturating_sub(max_rows);
    let (mut foreign, mut trust) = (0.0, 0.0);

    for row in &rows[start..] {
        match row.name.as_str() {
            FOREIGN_INVESTOR => foreign += row.buy - row.sell,
            INVESTMENT_TRUST => trust += row.buy - row.sell,
            _ => {}
        }
    }

    InstitutionalFlow {
        foreign_net_buy: round_half_up(foreign / SHARES_PER_LOT),
        trust_net_buy: round_half_up(trust / SHARES_PER_LOT),
    }
}

pub async fn load_institutional_flow(
    port: &dyn DataPort,
    symbol: &str,
    start_date: NaiveDate,
    max_rows: usize,
    timeout: Duration,
) -> InstitutionalFlow {
    match fetch_rows::<InstitutionalRow>(
        port,
        Dataset::InstitutionalInvestors,
        symbol,
        start_date,
        timeout,
    )
    .await
    {
        Ok(rows) => aggregate_flow(&rows, max_rows),
        Err(e) => {
            tracing::warn!(symbol, error = %e, "institutional fetch failed, using zero flow");
            InstitutionalFlow::default()
        }
    }
}
