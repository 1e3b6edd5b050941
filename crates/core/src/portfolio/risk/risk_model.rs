use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    Concentration,
    CashDrag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    /// Holding the alert is about; `None` for cash alerts.
    pub symbol: Option<String>,
    /// Share of NAV (percent).
    pub share_pct: Decimal,
    pub message: String,
}

/// Share of NAV held in one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingExposure {
    pub symbol: String,
    pub share_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub alerts: Vec<RiskAlert>,
    /// Largest first; empty when NAV is not positive.
    pub exposures: Vec<HoldingExposure>,
    pub cash_share_pct: Decimal,
    pub top_holding: Option<HoldingExposure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightLevel {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    HighCash,
    LowCash,
    TopPerformer,
    ModelDrift,
    Normal,
}

/// Advisory note derived from a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInsight {
    pub kind: InsightKind,
    pub level: InsightLevel,
    pub message: String,
}
