//! Market data module - quote model and provider traits.

mod market_data_constants;
mod market_data_model;
mod market_data_traits;

pub use market_data_constants::*;
pub use market_data_model::Quote;
pub use market_data_traits::{BenchmarkIndexProviderTrait, QuoteProviderTrait};
