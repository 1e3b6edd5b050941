use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradeResult {
    Win,
    Loss,
}

/// A sell matched against the running average cost of its symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTrade {
    pub portfolio_id: String,
    pub transaction_id: String,
    pub symbol: String,
    pub date: NaiveDate,
    pub quantity: Decimal,
    /// Sale value net of commission.
    pub proceeds: Decimal,
    pub cost_of_sold: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub result: TradeResult,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePerformanceSummary {
    pub total_trades: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub win_rate: Decimal,
    pub gross_profit: Decimal,
    /// Absolute value of the summed losses.
    pub gross_loss: Decimal,
    pub total_pnl: Decimal,
    pub profit_factor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePerformance {
    pub summary: TradePerformanceSummary,
    /// Newest first.
    pub trades: Vec<ClosedTrade>,
}

/// End-of-day total equity recorded by the history job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquitySnapshot {
    pub date: NaiveDate,
    pub total_equity: Decimal,
}

/// Risk and return statistics of an equity curve, in percent except the Sharpe
/// ratio and the annualized return.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityCurveMetrics {
    pub volatility: Decimal,
    /// Mean daily return times trading days, as a fraction (0.12 is 12%).
    pub annualized_return: Decimal,
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
    pub total_return: Decimal,
}
