//! Concentration and cash alerts, and advisory insights.

use rust_decimal::Decimal;

use super::risk_model::{
    AlertKind, AlertSeverity, HoldingExposure, InsightKind, InsightLevel, PortfolioInsight,
    RiskAlert, RiskReport,
};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::valuation::PortfolioValuation;
use crate::settings::AnalyticsSettings;

/// Measures every holding and the cash balance against NAV.
///
/// The largest holding raises a critical alert when it is above the
/// concentration threshold; cash above the cash-drag threshold raises a
/// warning. Nothing is measured when NAV is not positive.
pub fn assess_risk(valuation: &PortfolioValuation, settings: &AnalyticsSettings) -> RiskReport {
    let nav = valuation.nav;
    if nav <= Decimal::ZERO {
        return RiskReport::default();
    }

    let mut exposures: Vec<HoldingExposure> = valuation
        .holdings
        .iter()
        .map(|h| HoldingExposure {
            symbol: h.symbol.clone(),
            share_pct: h.market_value / nav * Decimal::ONE_HUNDRED,
        })
        .collect();
    exposures.sort_by(|a, b| {
        b.share_pct
            .cmp(&a.share_pct)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let top_holding = exposures.first().cloned();
    let mut alerts: Vec<RiskAlert> = top_holding
        .iter()
        .filter(|e| e.share_pct > settings.concentration_threshold_pct)
        .map(|e| RiskAlert {
            kind: AlertKind::Concentration,
            severity: AlertSeverity::Critical,
            symbol: Some(e.symbol.clone()),
            share_pct: e.share_pct,
            message: format!(
                "{} is {}% of the portfolio, above the {}% limit",
                e.symbol,
                e.share_pct.round_dp(DISPLAY_DECIMAL_PRECISION),
                settings.concentration_threshold_pct
            ),
        })
        .collect();

    let cash_share_pct = valuation.cash_balance / nav * Decimal::ONE_HUNDRED;
    if cash_share_pct > settings.cash_drag_threshold_pct {
        alerts.push(RiskAlert {
            kind: AlertKind::CashDrag,
            severity: AlertSeverity::Warning,
            symbol: None,
            share_pct: cash_share_pct,
            message: format!(
                "Cash is {}% of the portfolio; idle cash drags on returns",
                cash_share_pct.round_dp(DISPLAY_DECIMAL_PRECISION)
            ),
        });
    }

    RiskReport {
        alerts,
        top_holding,
        exposures,
        cash_share_pct,
    }
}

/// Advisory list for a valuation. Always returns at least one insight.
pub fn portfolio_insights(
    valuation: &PortfolioValuation,
    settings: &AnalyticsSettings,
) -> Vec<PortfolioInsight> {
    let mut insights = Vec::new();
    let cash_pct = valuation.cash_share_of_nav();

    if cash_pct > settings.cash_drag_threshold_pct {
        insights.push(PortfolioInsight {
            kind: InsightKind::HighCash,
            level: InsightLevel::Warning,
            message: format!(
                "Cash is {}% of the portfolio. Consider putting it to work.",
                cash_pct.round_dp(DISPLAY_DECIMAL_PRECISION)
            ),
        });
    } else if cash_pct < settings.low_cash_threshold_pct {
        insights.push(PortfolioInsight {
            kind: InsightKind::LowCash,
            level: InsightLevel::Danger,
            message: format!(
                "Cash is only {}% of the portfolio. Little room to act on opportunities.",
                cash_pct.round_dp(DISPLAY_DECIMAL_PRECISION)
            ),
        });
    }

    let best = valuation
        .holdings
        .iter()
        .filter(|h| h.unrealized_gain > Decimal::ZERO)
        .max_by(|a, b| {
            a.unrealized_gain
                .cmp(&b.unrealized_gain)
                .then_with(|| b.symbol.cmp(&a.symbol))
        });
    if let Some(best) = best {
        insights.push(PortfolioInsight {
            kind: InsightKind::TopPerformer,
            level: InsightLevel::Success,
            message: format!(
                "{} leads with an unrealized gain of {}",
                best.symbol,
                best.unrealized_gain.round_dp(0)
            ),
        });
    }

    if valuation.alignment_score < settings.alignment_warning_threshold {
        insights.push(PortfolioInsight {
            kind: InsightKind::ModelDrift,
            level: InsightLevel::Warning,
            message: format!(
                "Allocation has drifted from the {} model (score {})",
                valuation.target_model_name,
                valuation.alignment_score.round_dp(DISPLAY_DECIMAL_PRECISION)
            ),
        });
    }

    if insights.is_empty() {
        insights.push(PortfolioInsight {
            kind: InsightKind::Normal,
            level: InsightLevel::Success,
            message: "Portfolio is within its normal ranges".to_string(),
        });
    }

    insights
}
