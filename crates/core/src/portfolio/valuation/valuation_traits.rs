use super::valuation_model::PortfolioValuation;
use crate::errors::Result;
use crate::portfolios::Portfolio;

/// Trait defining the contract for on-demand portfolio valuation.
pub trait ValuationServiceTrait: Send + Sync {
    /// Replays the portfolio's ledger and values it at current quotes.
    fn get_valuation(&self, portfolio_id: &str) -> Result<PortfolioValuation>;

    /// Same as [`get_valuation`](Self::get_valuation) for an already loaded portfolio.
    fn value_portfolio(&self, portfolio: &Portfolio) -> Result<PortfolioValuation>;
}
