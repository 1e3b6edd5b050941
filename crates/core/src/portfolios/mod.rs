mod portfolios_model;
mod portfolios_traits;

pub use portfolios_model::{Portfolio, RiskProfile};
pub use portfolios_traits::PortfolioRepositoryTrait;
