//! Asset category canonicalization.
//!
//! Quotes and ledger rows carry free-text asset-class labels, written either in
//! English (`Stock`, `ETF_Gold`, `Fixed Income`) or in Persian. Every component
//! that needs a category (valuation buckets, stress scenarios, alerts,
//! commission estimation) goes through [`AssetCategory::from_label`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

const GOLD_TOKENS: [&str; 2] = ["Gold", "طلا"];
const FIXED_INCOME_TOKENS: [&str; 2] = ["Fixed", "ثابت"];
const CASH_TOKENS: [&str; 2] = ["Cash", "نقد"];
const OTHER_TOKENS: [&str; 2] = ["Other", "سایر"];
const FUND_TOKENS: [&str; 2] = ["ETF", "صندوق"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetCategory {
    Equity,
    Gold,
    FixedIncome,
    Cash,
    Other,
}

impl AssetCategory {
    /// Invested categories that take part in target-model alignment.
    pub const MODELLED: [AssetCategory; 3] = [
        AssetCategory::Equity,
        AssetCategory::Gold,
        AssetCategory::FixedIncome,
    ];

    /// Display order of the allocation breakdown.
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Equity,
        AssetCategory::Gold,
        AssetCategory::FixedIncome,
        AssetCategory::Other,
        AssetCategory::Cash,
    ];

    /// Maps a free-text asset-class label to its category.
    ///
    /// Case-sensitive substring match. Gold wins over fixed income, which wins
    /// over cash; a label matching nothing (including an empty one) is equity.
    pub fn from_label(label: &str) -> Self {
        let contains_any = |tokens: &[&str]| tokens.iter().any(|t| label.contains(t));

        if contains_any(&GOLD_TOKENS) {
            AssetCategory::Gold
        } else if contains_any(&FIXED_INCOME_TOKENS) {
            AssetCategory::FixedIncome
        } else if contains_any(&CASH_TOKENS) {
            AssetCategory::Cash
        } else if contains_any(&OTHER_TOKENS) {
            AssetCategory::Other
        } else {
            AssetCategory::Equity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Equity => "Equity",
            AssetCategory::Gold => "Gold",
            AssetCategory::FixedIncome => "FixedIncome",
            AssetCategory::Cash => "Cash",
            AssetCategory::Other => "Other",
        }
    }

    pub fn is_modelled(&self) -> bool {
        Self::MODELLED.contains(self)
    }
}

/// True when the label denotes an exchange-traded fund rather than a listed share.
pub fn is_fund_label(label: &str) -> bool {
    FUND_TOKENS.iter().any(|t| label.contains(t))
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses scenario and configuration keys, which are exact names rather
/// than free-text labels.
impl FromStr for AssetCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Equity" | "Stock" | "equity" | "stock" | "سهام" => Ok(AssetCategory::Equity),
            "Gold" | "gold" | "طلا" => Ok(AssetCategory::Gold),
            "FixedIncome" | "Fixed" | "fixedIncome" | "fixed" | "درآمد ثابت" => {
                Ok(AssetCategory::FixedIncome)
            }
            "Cash" | "cash" | "نقدینگی" => Ok(AssetCategory::Cash),
            "Other" | "other" | "سایر" => Ok(AssetCategory::Other),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown asset category '{}'",
                other
            )))),
        }
    }
}
