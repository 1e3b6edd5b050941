//! Market data domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_SECTOR;

/// Latest known market snapshot for one symbol.
///
/// Quotes are written by an external sync job; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub last_price: Decimal,
    pub previous_close: Decimal,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    /// Free-text asset type label, e.g. `Stock`, `ETF_Gold`.
    pub asset_type: Option<String>,
    /// Market segment, e.g. `TSE` or `IFB`.
    pub market: Option<String>,
}

impl Quote {
    /// A quote is only usable for valuation when it carries a positive price.
    pub fn has_price(&self) -> bool {
        self.last_price > Decimal::ZERO
    }

    /// Price move since the previous close, zero unless both prices are positive.
    pub fn day_change(&self) -> Decimal {
        if self.last_price > Decimal::ZERO && self.previous_close > Decimal::ZERO {
            self.last_price - self.previous_close
        } else {
            Decimal::ZERO
        }
    }

    pub fn display_name(&self) -> String {
        self.company_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.symbol)
            .to_string()
    }

    pub fn sector_or_unknown(&self) -> String {
        self.sector
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNKNOWN_SECTOR)
            .to_string()
    }
}
