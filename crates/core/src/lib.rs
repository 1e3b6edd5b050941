//! Ledgerfolio Core - ledger replay, valuation and portfolio analytics.
//!
//! This crate contains the accounting engine. It is store-agnostic and
//! defines traits that persistence and market-data crates implement.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod events;
pub mod market_data;
pub mod portfolio;
pub mod portfolios;
pub mod settings;
pub mod transactions;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use assets::AssetCategory;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
