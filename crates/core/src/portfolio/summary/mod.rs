//! Multi-portfolio overview, screening and per-portfolio analytics.

mod analytics_service;
mod summary_model;


pub use analytics_service::PortfolioAnalyticsService;
pub use summary_model::{PortfolioSnapshot, PortfolioSummary, ScreenMatch, ScreeningCriteria};
