//! Target allocation models and category breakdowns.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;
use crate::portfolios::RiskProfile;

/// One instrument a target model recommends, with its price levels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConstituent {
    pub symbol: String,
    /// Target share of the model (percent).
    pub target_weight: Decimal,
    pub stop_loss: Decimal,
    pub short_target: Decimal,
    pub mid_target: Decimal,
    pub long_target: Decimal,
    pub note: Option<String>,
}

impl TargetConstituent {
    /// Highest positive target price, if any target is set.
    pub fn highest_target(&self) -> Option<Decimal> {
        [self.short_target, self.mid_target, self.long_target]
            .into_iter()
            .filter(|t| *t > Decimal::ZERO)
            .max()
    }
}

/// Target asset mix for one risk profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocationModel {
    pub risk_profile: RiskProfile,
    pub display_name: String,
    pub equity_pct: Decimal,
    pub gold_pct: Decimal,
    pub fixed_income_pct: Decimal,
    #[serde(default)]
    pub constituents: Vec<TargetConstituent>,
}

impl TargetAllocationModel {
    /// Built-in model used when none is configured for a profile.
    pub fn default_for(risk_profile: RiskProfile) -> Self {
        let (display_name, equity, gold, fixed) = match risk_profile {
            RiskProfile::Low => ("Conservative", dec!(10), dec!(20), dec!(70)),
            RiskProfile::Medium => ("Balanced", dec!(30), dec!(30), dec!(40)),
            RiskProfile::High => ("Aggressive", dec!(70), dec!(20), dec!(10)),
        };
        Self {
            risk_profile,
            display_name: display_name.to_string(),
            equity_pct: equity,
            gold_pct: gold,
            fixed_income_pct: fixed,
            constituents: Vec::new(),
        }
    }

    /// Target percent for a modelled category; `None` for cash and other.
    pub fn target_for(&self, category: AssetCategory) -> Option<Decimal> {
        match category {
            AssetCategory::Equity => Some(self.equity_pct),
            AssetCategory::Gold => Some(self.gold_pct),
            AssetCategory::FixedIncome => Some(self.fixed_income_pct),
            AssetCategory::Cash | AssetCategory::Other => None,
        }
    }
}

/// Value and share of one category in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub category: AssetCategory,
    /// Market value; for cash the raw, possibly negative, balance.
    pub value: Decimal,
    /// Share of the allocation denominator (0-100); negative cash counts as zero.
    pub percent: Decimal,
    pub target_percent: Option<Decimal>,
}

impl CategoryAllocation {
    /// Actual minus target, for modelled categories.
    pub fn drift(&self) -> Option<Decimal> {
        self.target_percent.map(|target| self.percent - target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstituentStatus {
    TargetHit,
    StopHit,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceLevel {
    StopLoss,
    ShortTarget,
    MidTarget,
    LongTarget,
}

/// Price check of one model constituent against its levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituentSignal {
    pub symbol: String,
    pub price: Decimal,
    pub status: ConstituentStatus,
    /// First level within the proximity band of the price.
    pub near_level: Option<PriceLevel>,
    pub near_level_price: Option<Decimal>,
}
