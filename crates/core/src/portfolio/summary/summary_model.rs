use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::benchmark::BenchmarkComparison;
use crate::portfolio::risk::RiskReport;
use crate::portfolio::valuation::PortfolioValuation;
use crate::portfolios::RiskProfile;

/// Valuation of one portfolio with its benchmark comparison and risk alerts,
/// all derived from a single replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(flatten)]
    pub valuation: PortfolioValuation,
    pub benchmark: BenchmarkComparison,
    pub risk: RiskReport,
}

/// One row of the multi-portfolio overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio_id: String,
    pub name: String,
    pub manager_name: Option<String>,
    pub risk_profile: RiskProfile,
    pub initial_capital: Decimal,
    pub nav: Decimal,
    pub cash_balance: Decimal,
    /// NAV minus initial capital.
    pub profit_loss: Decimal,
    pub return_pct: Decimal,
    pub alpha: Decimal,
}

/// Filters for [`screen_portfolios`](super::PortfolioAnalyticsService::screen_portfolios).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreeningCriteria {
    /// Keep only portfolios holding this symbol.
    pub symbol: Option<String>,
    /// Keep only portfolios with at least this much cash (percent of NAV).
    pub min_cash_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMatch {
    pub portfolio_id: String,
    pub name: String,
    pub cash_pct: Decimal,
    /// Quantity of the screened symbol, when a symbol was given.
    pub held_quantity: Option<Decimal>,
}
