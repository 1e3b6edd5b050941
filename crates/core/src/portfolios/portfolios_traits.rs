use async_trait::async_trait;
use rust_decimal::Decimal;

use super::portfolios_model::Portfolio;
use crate::errors::Result;

/// Trait defining the contract for portfolio repository operations.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Retrieves a portfolio by its ID. Returns `Error::NotFound` when absent.
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    /// Lists portfolios, restricted to one owner when `owner_id` is set.
    fn list_portfolios(&self, owner_id: Option<&str>) -> Result<Vec<Portfolio>>;

    /// Overwrites the cached cash balance.
    async fn set_cash_balance(&self, portfolio_id: &str, value: Decimal) -> Result<()>;
}
