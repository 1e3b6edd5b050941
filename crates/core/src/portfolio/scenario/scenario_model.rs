use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;
use crate::errors::Result;

/// Shock per asset category, in percent (-20 = a 20% fall).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StressScenario {
    pub shocks: HashMap<AssetCategory, Decimal>,
}

impl StressScenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shock(mut self, category: AssetCategory, shock_pct: Decimal) -> Self {
        self.shocks.insert(category, shock_pct);
        self
    }

    /// Builds a scenario from user-facing keys such as `Stock`, `طلا` or `Fixed`.
    pub fn from_keys(raw: &HashMap<String, Decimal>) -> Result<Self> {
        let mut scenario = Self::new();
        for (key, shock) in raw {
            let category: AssetCategory = key.parse()?;
            scenario.shocks.insert(category, *shock);
        }
        Ok(scenario)
    }

    /// Shock for a category; unlisted categories are left unchanged.
    pub fn shock_for(&self, category: AssetCategory) -> Decimal {
        self.shocks.get(&category).copied().unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingProjection {
    pub symbol: String,
    pub category: AssetCategory,
    pub current_value: Decimal,
    pub projected_value: Decimal,
    pub shock_pct: Decimal,
    pub impact: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressTestResult {
    pub current_nav: Decimal,
    pub projected_nav: Decimal,
    pub change_amount: Decimal,
    pub change_pct: Decimal,
    pub projections: Vec<HoldingProjection>,
}
