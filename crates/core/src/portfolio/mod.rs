//! Derived portfolio views: replay, valuation, allocation and analytics.

pub mod allocation;
pub mod benchmark;
pub mod ledger;
pub mod performance;
pub mod risk;
pub mod scenario;
pub mod summary;
pub mod valuation;
