//! Valuation and allocation of a replayed portfolio.

mod valuation_calculator;
mod valuation_model;
mod valuation_service;
mod valuation_traits;


pub use valuation_calculator::{calculate_valuation, resolve_asset_label};
pub use valuation_model::{HoldingValuation, PortfolioValuation};
pub use valuation_service::ValuationService;
pub use valuation_traits::ValuationServiceTrait;
