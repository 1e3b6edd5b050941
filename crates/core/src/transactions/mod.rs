//! Ledger entries: model, persistence contract, entry helpers and the
//! mutation service that keeps the cached cash balance in sync.

mod commission;
mod opening_ledger;
mod transactions_constants;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_model_tests;

pub use commission::{estimate_commission, CommissionKind, CommissionRate};
pub use opening_ledger::{build_opening_ledger, InitialStockInput};
pub use transactions_constants::*;
pub use transactions_model::{sort_ledger, NewTransaction, Transaction, TransactionType};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
