//! Portfolio domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Target risk profile; selects the allocation model a portfolio is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RiskProfile {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Low => "Low",
            RiskProfile::Medium => "Medium",
            RiskProfile::High => "High",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "medium" => Ok(RiskProfile::Medium),
            "high" => Ok(RiskProfile::High),
            _ => Err(ValidationError::InvalidInput(format!("Unknown risk profile '{}'", s)).into()),
        }
    }
}

/// Domain model representing a managed portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub manager_name: Option<String>,
    pub risk_profile: RiskProfile,
    pub initial_capital: Decimal,
    /// Benchmark index level on the day the portfolio was opened.
    pub initial_index: Decimal,
    /// Cached cash balance, rewritten after every ledger mutation.
    pub current_cash: Decimal,
    pub target_date: Option<NaiveDate>,
    pub description: Option<String>,
}
