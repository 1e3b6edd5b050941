//! Brokerage commission schedule.
//!
//! Rates are fractions of the gross trade value and depend on the market
//! segment and the kind of instrument.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::transactions_model::TransactionType;
use crate::assets::{is_fund_label, AssetCategory};
use crate::market_data::{Quote, MARKET_IFB};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRate {
    pub buy: Decimal,
    pub sell: Decimal,
}

/// Instrument kinds with their own commission rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommissionKind {
    /// Shares and rights listed on TSE.
    TseStock,
    /// Shares and rights listed on IFB.
    IfbStock,
    EtfEquity,
    EtfFixedIncome,
    EtfGold,
}

impl CommissionKind {
    pub fn rate(&self) -> CommissionRate {
        match self {
            CommissionKind::TseStock => CommissionRate {
                buy: dec!(0.003712),
                sell: dec!(0.0088),
            },
            CommissionKind::IfbStock => CommissionRate {
                buy: dec!(0.003632),
                sell: dec!(0.00891),
            },
            CommissionKind::EtfEquity => CommissionRate {
                buy: dec!(0.00232),
                sell: dec!(0.002375),
            },
            CommissionKind::EtfFixedIncome => CommissionRate {
                buy: dec!(0.000375),
                sell: dec!(0.000375),
            },
            CommissionKind::EtfGold => CommissionRate {
                buy: dec!(0.0012),
                sell: dec!(0.0012),
            },
        }
    }

    /// Picks the schedule row for an instrument.
    ///
    /// Fund labels are split by category (equity funds by default); other
    /// instruments go by market segment, TSE unless the quote says IFB.
    pub fn resolve(asset_type: Option<&str>, market: Option<&str>) -> Self {
        let asset_type = asset_type.unwrap_or_default();
        if is_fund_label(asset_type) {
            return match AssetCategory::from_label(asset_type) {
                AssetCategory::Gold => CommissionKind::EtfGold,
                AssetCategory::FixedIncome => CommissionKind::EtfFixedIncome,
                _ => CommissionKind::EtfEquity,
            };
        }

        match market.map(str::trim) {
            Some(m) if m.eq_ignore_ascii_case(MARKET_IFB) => CommissionKind::IfbStock,
            _ => CommissionKind::TseStock,
        }
    }

    pub fn for_quote(quote: Option<&Quote>) -> Self {
        Self::resolve(
            quote.and_then(|q| q.asset_type.as_deref()),
            quote.and_then(|q| q.market.as_deref()),
        )
    }
}

/// Estimated commission for a trade; cash events carry none.
pub fn estimate_commission(
    transaction_type: TransactionType,
    quantity: Decimal,
    price: Decimal,
    quote: Option<&Quote>,
) -> Decimal {
    let rate = CommissionKind::for_quote(quote).rate();
    let gross = quantity * price;
    match transaction_type {
        TransactionType::Buy => gross * rate.buy,
        TransactionType::Sell => gross * rate.sell,
        _ => Decimal::ZERO,
    }
}
