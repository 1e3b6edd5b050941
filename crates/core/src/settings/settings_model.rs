//! Analytics configuration.

use std::path::Path;
use std::sync::{Arc, RwLock};

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ALIGNMENT_WARNING_THRESHOLD, CASH_DRAG_THRESHOLD_PCT, CONCENTRATION_THRESHOLD_PCT,
    CONSTITUENT_PROXIMITY, LOW_CASH_THRESHOLD_PCT, PROFIT_FACTOR_SENTINEL, QUANTITY_THRESHOLD,
    RISK_FREE_RATE, TRADING_DAYS_PER_YEAR,
};
use crate::errors::{Result, ValidationError};

/// Tunable thresholds used across the analytics services.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSettings {
    /// Annualization factor for equity-curve statistics.
    pub trading_days_per_year: u32,
    /// Risk-free rate as a fraction (0.25 = 25%).
    pub risk_free_rate: Decimal,
    pub concentration_threshold_pct: Decimal,
    pub cash_drag_threshold_pct: Decimal,
    pub low_cash_threshold_pct: Decimal,
    pub alignment_warning_threshold: Decimal,
    /// Holdings at or below this quantity are hidden from valuations.
    pub quantity_epsilon: Decimal,
    pub profit_factor_sentinel: Decimal,
    /// Relative distance to a model price level that counts as "near".
    pub constituent_proximity: Decimal,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            risk_free_rate: RISK_FREE_RATE,
            concentration_threshold_pct: CONCENTRATION_THRESHOLD_PCT,
            cash_drag_threshold_pct: CASH_DRAG_THRESHOLD_PCT,
            low_cash_threshold_pct: LOW_CASH_THRESHOLD_PCT,
            alignment_warning_threshold: ALIGNMENT_WARNING_THRESHOLD,
            quantity_epsilon: QUANTITY_THRESHOLD,
            profit_factor_sentinel: PROFIT_FACTOR_SENTINEL,
            constituent_proximity: CONSTITUENT_PROXIMITY,
        }
    }
}

impl AnalyticsSettings {
    /// Parses and validates settings from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: AnalyticsSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading analytics settings from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trading_days_per_year == 0 {
            return Err(ValidationError::InvalidInput(
                "tradingDaysPerYear must be greater than zero".to_string(),
            )
            .into());
        }

        let non_negative = [
            ("concentrationThresholdPct", self.concentration_threshold_pct),
            ("cashDragThresholdPct", self.cash_drag_threshold_pct),
            ("lowCashThresholdPct", self.low_cash_threshold_pct),
            ("alignmentWarningThreshold", self.alignment_warning_threshold),
            ("quantityEpsilon", self.quantity_epsilon),
            ("profitFactorSentinel", self.profit_factor_sentinel),
            ("constituentProximity", self.constituent_proximity),
        ];
        for (name, value) in non_negative {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ValidationError::InvalidInput(format!(
                    "{} must not be negative (got {})",
                    name, value
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Settings shared between services and updated at runtime.
pub type SharedSettings = Arc<RwLock<AnalyticsSettings>>;

pub fn shared_settings(settings: AnalyticsSettings) -> SharedSettings {
    Arc::new(RwLock::new(settings))
}

/// Snapshot of the current settings. A poisoned lock still yields the last
/// written value.
pub fn current_settings(settings: &RwLock<AnalyticsSettings>) -> AnalyticsSettings {
    match settings.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
