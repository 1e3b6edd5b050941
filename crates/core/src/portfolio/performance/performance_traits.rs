use super::performance_model::{EquityCurveMetrics, EquitySnapshot, TradePerformance};
use crate::errors::Result;

/// Read access to the recorded equity history of a portfolio.
pub trait EquityHistoryRepositoryTrait: Send + Sync {
    /// Snapshots in ascending date order.
    fn get_equity_history(&self, portfolio_id: &str) -> Result<Vec<EquitySnapshot>>;
}

pub trait PerformanceServiceTrait: Send + Sync {
    /// Closed trades and win/loss statistics of one portfolio.
    fn get_trade_performance(&self, portfolio_id: &str) -> Result<TradePerformance>;

    /// Closed trades of several portfolios merged into one set of statistics.
    /// A portfolio whose ledger cannot be read is logged and left out.
    fn aggregate_trade_performance(&self, portfolio_ids: &[String]) -> Result<TradePerformance>;

    /// Equity-curve statistics; all zero when history is missing or too short.
    fn get_equity_metrics(&self, portfolio_id: &str) -> Result<EquityCurveMetrics>;
}
