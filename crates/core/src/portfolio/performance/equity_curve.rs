//! Statistics over a daily equity curve.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::performance_model::{EquityCurveMetrics, EquitySnapshot};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

// sqrt(242)
const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.556349186104045);

/// Day-over-day returns, skipping days whose previous value is not positive.
pub fn daily_returns(curve: &[Decimal]) -> Vec<Decimal> {
    curve
        .windows(2)
        .filter(|w| w[0] > Decimal::ZERO)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Sample standard deviation; zero for fewer than two observations.
fn sample_std_dev(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let count = Decimal::from(values.len());
    let mean = values.iter().sum::<Decimal>() / count;
    let sum_squared_diff: Decimal = values
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum();

    let variance = sum_squared_diff / (count - Decimal::ONE);
    if variance.is_sign_negative() {
        return Decimal::ZERO;
    }
    variance.sqrt().unwrap_or(Decimal::ZERO)
}

/// Largest peak-to-trough fall as a fraction of the peak.
fn max_drawdown(curve: &[Decimal]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut max_dd = Decimal::ZERO;
    for &value in curve {
        if value > peak {
            peak = value;
        }
        if peak > Decimal::ZERO {
            max_dd = max_dd.max((peak - value) / peak);
        }
    }
    max_dd
}

/// Volatility, annualized return, Sharpe ratio, max drawdown and total return.
///
/// Every metric is zero when the curve yields fewer than two usable returns.
/// The Sharpe ratio is zero when volatility is zero.
pub fn calculate_equity_metrics(
    history: &[EquitySnapshot],
    trading_days_per_year: u32,
    risk_free_rate: Decimal,
) -> EquityCurveMetrics {
    let curve: Vec<Decimal> = history.iter().map(|s| s.total_equity).collect();
    let returns = daily_returns(&curve);
    if returns.len() < 2 {
        return EquityCurveMetrics::default();
    }

    let days = Decimal::from(trading_days_per_year);
    let annualization = days.sqrt().unwrap_or(SQRT_TRADING_DAYS_APPROX);

    let volatility = sample_std_dev(&returns) * annualization * Decimal::ONE_HUNDRED;
    let mean = returns.iter().sum::<Decimal>() / Decimal::from(returns.len());
    let annualized_return = mean * days;

    let sharpe_ratio = if volatility > Decimal::ZERO {
        (annualized_return - risk_free_rate) / (volatility / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let first = curve[0];
    let last = curve[curve.len() - 1];
    let total_return = if first > Decimal::ZERO {
        (last - first) / first * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    EquityCurveMetrics {
        volatility: volatility.round_dp(DISPLAY_DECIMAL_PRECISION),
        annualized_return: annualized_return.round_dp(DISPLAY_DECIMAL_PRECISION + 2),
        sharpe_ratio: sharpe_ratio.round_dp(DISPLAY_DECIMAL_PRECISION),
        max_drawdown: (max_drawdown(&curve) * Decimal::ONE_HUNDRED)
            .round_dp(DISPLAY_DECIMAL_PRECISION),
        total_return: total_return.round_dp(DISPLAY_DECIMAL_PRECISION),
    }
}
