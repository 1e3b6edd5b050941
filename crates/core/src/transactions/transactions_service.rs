use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::opening_ledger::{build_opening_ledger, InitialStockInput};
use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::market_data::{Quote, QuoteProviderTrait};
use crate::portfolio::ledger::recompute_cash_balance;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::utils::normalize_symbol;

/// Ledger mutation service. Owns the single write path for the cached cash balance.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            portfolio_repository,
            quote_provider,
        }
    }

    fn quote_for(&self, symbol: Option<&str>) -> Option<Quote> {
        let symbol = normalize_symbol(symbol?);
        if symbol.is_empty() {
            return None;
        }
        match self.quote_provider.get_quote(&symbol) {
            Ok(quote) => quote,
            Err(e) => {
                warn!(
                    "Quote lookup for {} failed, commission uses the default schedule: {}",
                    symbol, e
                );
                None
            }
        }
    }

    /// Writes the opening deposit and buys of a new portfolio, then
    /// recomputes its cash once.
    pub async fn open_portfolio_ledger(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        initial_cash: Decimal,
        initial_stocks: &[InitialStockInput],
    ) -> Result<Vec<Transaction>> {
        let entries = build_opening_ledger(portfolio_id, date, initial_cash, initial_stocks);
        debug!(
            "Opening ledger for portfolio {} with {} entries",
            portfolio_id,
            entries.len()
        );

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            created.push(self.transaction_repository.insert_transaction(entry).await?);
        }
        self.recompute_cash(portfolio_id).await?;
        Ok(created)
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let quote = self.quote_for(new_transaction.symbol.as_deref());
        let entry = new_transaction.into_entry(quote.as_ref())?;
        let portfolio_id = entry.portfolio_id.clone();

        let created = self.transaction_repository.insert_transaction(entry).await?;
        self.recompute_cash(&portfolio_id).await?;
        Ok(created)
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        transaction.kind()?;
        if transaction.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }

        let existing = self.transaction_repository.get_transaction(&transaction.id)?;
        let updated = self
            .transaction_repository
            .update_transaction(transaction)
            .await?;

        self.recompute_cash(&updated.portfolio_id).await?;
        if existing.portfolio_id != updated.portfolio_id {
            self.recompute_cash(&existing.portfolio_id).await?;
        }
        Ok(updated)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let existing = self.transaction_repository.get_transaction(transaction_id)?;
        self.transaction_repository
            .delete_transaction(transaction_id)
            .await?;
        self.recompute_cash(&existing.portfolio_id).await?;
        Ok(existing)
    }

    async fn delete_transactions(&self, transaction_ids: &[String]) -> Result<usize> {
        let mut touched = BTreeSet::new();
        let mut deleted = 0;

        for transaction_id in transaction_ids {
            let existing = self.transaction_repository.get_transaction(transaction_id)?;
            deleted += self
                .transaction_repository
                .delete_transaction(transaction_id)
                .await?;
            touched.insert(existing.portfolio_id);
        }

        for portfolio_id in &touched {
            self.recompute_cash(portfolio_id).await?;
        }
        Ok(deleted)
    }

    async fn recompute_cash(&self, portfolio_id: &str) -> Result<Decimal> {
        let ledger = self.transaction_repository.get_ledger(portfolio_id)?;
        let cash = recompute_cash_balance(&ledger);
        debug!("Recomputed cash for portfolio {}: {}", portfolio_id, cash);
        self.portfolio_repository
            .set_cash_balance(portfolio_id, cash)
            .await?;
        Ok(cash)
    }
}
