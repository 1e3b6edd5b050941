use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::positions_model::{is_quantity_significant, Position};

/// A ledger entry that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayWarning {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub message: String,
}

impl fmt::Display for ReplayWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {} (date: {}): {}",
            self.transaction_id, self.date, self.message
        )
    }
}

/// Accounting state derived from a ledger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Every symbol ever traded, including closed ones.
    pub positions: HashMap<String, Position>,
    pub cash_balance: Decimal,
    /// Deposits minus withdrawals.
    pub net_contribution: Decimal,
    /// Whether the ledger contains any deposit or withdrawal.
    pub has_capital_flows: bool,
}

impl LedgerState {
    /// Positions above the quantity epsilon, ordered by symbol.
    pub fn open_positions(&self, epsilon: &Decimal) -> Vec<&Position> {
        let mut open: Vec<&Position> = self
            .positions
            .values()
            .filter(|p| is_quantity_significant(&p.quantity, epsilon))
            .collect();
        open.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        open
    }

    pub fn quantity_of(&self, symbol: &str) -> Decimal {
        self.positions
            .get(symbol)
            .map(|p| p.quantity)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Result of a replay. The state is always returned; warnings list the
/// entries that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ReplayResult {
    pub state: LedgerState,
    pub warnings: Vec<ReplayWarning>,
}

impl ReplayResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
