use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// True when a residual quantity is large enough to be shown as a holding.
pub fn is_quantity_significant(quantity: &Decimal, epsilon: &Decimal) -> bool {
    *quantity > *epsilon
}

/// Open position in one symbol, carried at weighted-average cost.
///
/// Quantity and cost basis always move together: both are zero once the
/// position is fully sold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
    /// Total cost of the units still held, commissions included.
    pub cost_basis: Decimal,
    /// Last asset-class label seen on the ledger for this symbol.
    pub asset_class: Option<String>,
    /// Last sector label seen on the ledger for this symbol.
    pub sector: Option<String>,
}

impl Position {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Cost per unit held; zero for a closed position.
    pub fn average_cost(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.cost_basis / self.quantity
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_open(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Adds units bought for `cost`. Leaves the position untouched and
    /// returns `None` if either total would overflow.
    pub fn add(&mut self, quantity: Decimal, cost: Decimal) -> Option<()> {
        let new_quantity = self.quantity.checked_add(quantity)?;
        let new_cost = self.cost_basis.checked_add(cost)?;
        self.quantity = new_quantity;
        self.cost_basis = new_cost;
        Some(())
    }

    /// Releases `quantity` units at the current average cost.
    ///
    /// Returns the average cost the units left at, or `None` when there was
    /// no open quantity to sell from. Overselling closes the position.
    pub fn reduce(&mut self, quantity: Decimal) -> Option<Decimal> {
        if !self.is_open() {
            return None;
        }
        let avg = self.average_cost();
        if quantity >= self.quantity {
            self.quantity = Decimal::ZERO;
            self.cost_basis = Decimal::ZERO;
        } else {
            // Below the held quantity, so the released cost stays under the basis.
            self.quantity -= quantity;
            self.cost_basis -= quantity * avg;
        }
        Some(avg)
    }
}
