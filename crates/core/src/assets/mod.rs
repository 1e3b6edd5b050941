//! Asset classification shared by valuation, scenarios and alerts.

mod assets_model;


pub use assets_model::{is_fund_label, AssetCategory};
