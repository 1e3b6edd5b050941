use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;
use crate::portfolio::allocation::CategoryAllocation;
use crate::portfolio::ledger::ReplayWarning;
use crate::portfolios::RiskProfile;

/// Market valuation of one open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// Asset-class label the category was derived from.
    pub asset_label: String,
    pub category: AssetCategory,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    pub cost_basis: Decimal,
    pub market_price: Decimal,
    /// Set when no usable quote existed and the average cost stands in for the price.
    pub price_is_fallback: bool,
    pub market_value: Decimal,
    /// Share of the allocation denominator (0-100).
    pub weight_pct: Decimal,
    pub unrealized_gain: Decimal,
    pub unrealized_gain_pct: Decimal,
    pub day_change: Decimal,
}

/// Point-in-time snapshot of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub portfolio_id: String,
    pub risk_profile: RiskProfile,
    pub target_model_name: String,
    /// Ordered by market value, largest first.
    pub holdings: Vec<HoldingValuation>,
    pub cash_balance: Decimal,
    pub total_assets_value: Decimal,
    /// Total assets plus cash.
    pub nav: Decimal,
    /// Total assets plus non-negative cash; never zero.
    pub allocation_denominator: Decimal,
    pub allocation: Vec<CategoryAllocation>,
    pub alignment_score: Decimal,
    pub net_invested_capital: Decimal,
    pub profit_loss: Decimal,
    pub return_pct: Decimal,
    pub day_change: Decimal,
    /// Ledger entries skipped while replaying.
    pub warnings: Vec<ReplayWarning>,
}

impl PortfolioValuation {
    pub fn category(&self, category: AssetCategory) -> Option<&CategoryAllocation> {
        self.allocation.iter().find(|a| a.category == category)
    }

    pub fn holding(&self, symbol: &str) -> Option<&HoldingValuation> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Cash as a share of NAV (percent); zero when NAV is not positive.
    pub fn cash_share_of_nav(&self) -> Decimal {
        if self.nav > Decimal::ZERO {
            self.cash_balance / self.nav * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}
