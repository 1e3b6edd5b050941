use async_trait::async_trait;
use chrono::NaiveDate;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Trait defining the contract for ledger persistence.
///
/// Ledgers are returned in replay order (date, then insertion sequence).
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Full ledger of one portfolio.
    fn get_ledger(&self, portfolio_id: &str) -> Result<Vec<Transaction>>;

    /// Entries dated on or before `as_of`.
    fn get_ledger_as_of(&self, portfolio_id: &str, as_of: NaiveDate) -> Result<Vec<Transaction>>;

    /// Retrieves one entry by ID. Returns `Error::NotFound` when absent.
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Appends an entry; the store assigns the ID and insertion sequence.
    async fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction>;

    /// Deletes an entry by its ID. Returns the number of deleted records.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize>;
}

/// Trait defining the contract for ledger mutations.
///
/// Every successful mutation is followed by a full cash recompute of each
/// portfolio it touched.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction>;

    /// Deletes one entry and returns it.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Deletes several entries. Returns the number deleted.
    async fn delete_transactions(&self, transaction_ids: &[String]) -> Result<usize>;

    /// Replays the full ledger and writes the resulting cash balance.
    async fn recompute_cash(&self, portfolio_id: &str) -> Result<rust_decimal::Decimal>;
}
