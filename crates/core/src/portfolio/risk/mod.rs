//! Risk alerts and portfolio insights.

mod risk_calculator;
mod risk_model;


pub use risk_calculator::{assess_risk, portfolio_insights};
pub use risk_model::*;
