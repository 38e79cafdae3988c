//! Market data source port.

use crate::domain::error::HunterError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// Datasets the scanner reads from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    StockPrice,
    InstitutionalInvestors,
    MonthRevenue,
}

impl Dataset {
    /// Name the REST endpoint expects in its `dataset` query parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            Dataset::StockPrice => "TaiwanStockPrice",
            Dataset::InstitutionalInvestors => "TaiwanStockInstitutionalInvestorsBuySell",
            Dataset::MonthRevenue => "TaiwanStockMonthRevenue",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Returns the raw rows of `dataset` for `symbol` from `start_date` to now.
///
/// Rows are returned in the order the source reports them. Implementations
/// report failures as errors; the loaders in `domain` decide how to degrade.
#[async_trait]
pub trait DataPort: Send + Sync {
    async fn fetch_dataset(
        &self,
        dataset: Dataset,
        symbol: &str,
        start_date: NaiveDate,
    ) -> Result<Vec<Value>, HunterError>;
}
