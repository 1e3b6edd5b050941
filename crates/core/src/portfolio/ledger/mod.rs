//! Ledger replay engine.

mod ledger_calculator;
mod ledger_model;
mod positions_model;


pub use ledger_calculator::{
    apply_entry, quantity_held_as_of, recompute_cash_balance, replay, replay_as_of,
};
pub(crate) use ledger_calculator::{
    buy_cost, ordered_entries, position_key, sell_proceeds, validate_entry,
};
pub use ledger_model::{LedgerState, ReplayResult, ReplayWarning};
pub use positions_model::{is_quantity_significant, Position};
