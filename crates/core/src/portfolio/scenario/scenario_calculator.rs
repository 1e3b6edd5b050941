use rust_decimal::Decimal;

use super::scenario_model::{HoldingProjection, StressScenario, StressTestResult};
use crate::portfolio::valuation::PortfolioValuation;

/// Projects the portfolio under a category shock scenario. Cash is not shocked.
pub fn run_stress_test(valuation: &PortfolioValuation, scenario: &StressScenario) -> StressTestResult {
    let projections: Vec<HoldingProjection> = valuation
        .holdings
        .iter()
        .map(|h| {
            let shock_pct = scenario.shock_for(h.category);
            let projected_value =
                h.market_value * (Decimal::ONE + shock_pct / Decimal::ONE_HUNDRED);
            HoldingProjection {
                symbol: h.symbol.clone(),
                category: h.category,
                current_value: h.market_value,
                projected_value,
                shock_pct,
                impact: projected_value - h.market_value,
            }
        })
        .collect();

    let current_nav = valuation.nav;
    let projected_nav =
        projections.iter().map(|p| p.projected_value).sum::<Decimal>() + valuation.cash_balance;
    let change_amount = projected_nav - current_nav;
    let change_pct = if current_nav > Decimal::ZERO {
        change_amount / current_nav * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    StressTestResult {
        current_nav,
        projected_nav,
        change_amount,
        change_pct,
        projections,
    }
}
