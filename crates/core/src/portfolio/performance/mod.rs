//! Realized trade performance and equity-curve risk statistics.

mod equity_curve;
mod performance_model;
mod performance_service;
mod performance_traits;
mod trade_performance;


pub use equity_curve::{calculate_equity_metrics, daily_returns};
pub use performance_model::*;
pub use performance_service::PerformanceService;
pub use performance_traits::{EquityHistoryRepositoryTrait, PerformanceServiceTrait};
pub use trade_performance::{build_trade_performance, extract_closed_trades, summarize_trades};
