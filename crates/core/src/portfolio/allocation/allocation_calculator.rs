use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::allocation_model::{
    CategoryAllocation, ConstituentSignal, ConstituentStatus, PriceLevel, TargetAllocationModel,
    TargetConstituent,
};
use crate::assets::AssetCategory;

/// How closely actual category percentages match a target model.
///
/// 100 at an exact match, minus half the summed absolute drift of equity,
/// gold and fixed income, floored at zero. Categories missing from `actual`
/// count as 0%.
pub fn alignment_score(actual: &[CategoryAllocation], target: &TargetAllocationModel) -> Decimal {
    let total_drift: Decimal = AssetCategory::MODELLED
        .iter()
        .map(|category| {
            let actual_pct = actual
                .iter()
                .find(|a| a.category == *category)
                .map(|a| a.percent)
                .unwrap_or(Decimal::ZERO);
            let target_pct = target.target_for(*category).unwrap_or(Decimal::ZERO);
            (actual_pct - target_pct).abs()
        })
        .sum();

    (Decimal::ONE_HUNDRED - total_drift / dec!(2)).max(Decimal::ZERO)
}

/// Classifies a constituent's price against its stop and targets.
///
/// A price that is not positive yields `Neutral` with no nearby level.
pub fn constituent_signal(
    constituent: &TargetConstituent,
    price: Decimal,
    proximity: Decimal,
) -> ConstituentSignal {
    let mut signal = ConstituentSignal {
        symbol: constituent.symbol.clone(),
        price,
        status: ConstituentStatus::Neutral,
        near_level: None,
        near_level_price: None,
    };
    if price <= Decimal::ZERO {
        return signal;
    }

    signal.status = match constituent.highest_target() {
        Some(target) if price >= target => ConstituentStatus::TargetHit,
        _ if constituent.stop_loss > Decimal::ZERO && price <= constituent.stop_loss => {
            ConstituentStatus::StopHit
        }
        _ => ConstituentStatus::Neutral,
    };

    let levels = [
        (PriceLevel::StopLoss, constituent.stop_loss),
        (PriceLevel::ShortTarget, constituent.short_target),
        (PriceLevel::MidTarget, constituent.mid_target),
        (PriceLevel::LongTarget, constituent.long_target),
    ];
    if let Some((level, level_price)) = levels
        .into_iter()
        .filter(|(_, level_price)| *level_price > Decimal::ZERO)
        .find(|(_, level_price)| (price - *level_price).abs() / price <= proximity)
    {
        signal.near_level = Some(level);
        signal.near_level_price = Some(level_price);
    }

    signal
}
