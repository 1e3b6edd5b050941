//! In-memory fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::events::{CalendarEvent, CalendarEventRepositoryTrait, NewCalendarEvent};
use crate::market_data::{BenchmarkIndexProviderTrait, Quote, QuoteProviderTrait};
use crate::portfolio::allocation::{TargetAllocationModel, TargetAllocationRepositoryTrait};
use crate::portfolio::performance::{EquityHistoryRepositoryTrait, EquitySnapshot};
use crate::portfolios::{Portfolio, PortfolioRepositoryTrait, RiskProfile};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds a ledger entry. `seq` doubles as the id suffix.
pub fn tx(
    seq: i64,
    kind: &str,
    symbol: Option<&str>,
    quantity: Decimal,
    price: Decimal,
    commission: Decimal,
    on: NaiveDate,
) -> Transaction {
    Transaction {
        id: format!("t{}", seq),
        portfolio_id: "p1".to_string(),
        transaction_type: kind.to_string(),
        symbol: symbol.map(str::to_string),
        quantity: Some(quantity),
        price: Some(price),
        commission: Some(commission),
        amount: None,
        asset_class: None,
        sector: None,
        date: on,
        sequence: seq,
    }
}

pub fn deposit(seq: i64, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction {
        amount: Some(amount),
        ..tx(seq, "deposit", None, Decimal::ONE, amount, Decimal::ZERO, on)
    }
}

pub fn withdraw(seq: i64, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction {
        amount: Some(amount),
        ..tx(seq, "withdraw", None, Decimal::ONE, amount, Decimal::ZERO, on)
    }
}

pub fn buy(seq: i64, symbol: &str, quantity: Decimal, price: Decimal, on: NaiveDate) -> Transaction {
    tx(seq, "buy", Some(symbol), quantity, price, Decimal::ZERO, on)
}

pub fn sell(seq: i64, symbol: &str, quantity: Decimal, price: Decimal, on: NaiveDate) -> Transaction {
    tx(seq, "sell", Some(symbol), quantity, price, Decimal::ZERO, on)
}

pub fn quote(symbol: &str, last: Decimal, asset_type: &str) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        last_price: last,
        previous_close: last,
        company_name: Some(format!("{} Co.", symbol)),
        sector: Some("Industrial".to_string()),
        asset_type: Some(asset_type.to_string()),
        market: Some("TSE".to_string()),
    }
}

pub fn portfolio(id: &str, owner: &str, initial_capital: Decimal) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        name: format!("Portfolio {}", id),
        owner_id: owner.to_string(),
        manager_name: Some("Manager".to_string()),
        risk_profile: RiskProfile::Medium,
        initial_capital,
        ..Default::default()
    }
}

/// One store behind every repository and provider trait.
#[derive(Default)]
pub struct InMemoryStore {
    pub portfolios: Mutex<Vec<Portfolio>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub quotes: Mutex<HashMap<String, Quote>>,
    pub events: Mutex<Vec<CalendarEvent>>,
    pub targets: Mutex<HashMap<RiskProfile, TargetAllocationModel>>,
    pub history: Mutex<HashMap<String, Vec<EquitySnapshot>>>,
    pub cached_index: Mutex<Option<Decimal>>,
    pub live_index: Mutex<Option<Decimal>>,
    /// Portfolios whose ledger reads fail.
    pub broken_ledgers: Mutex<Vec<String>>,
    /// Portfolios whose event inserts fail.
    pub failing_event_inserts: Mutex<Vec<String>>,
    pub fail_transaction_inserts: Mutex<bool>,
    pub fail_event_updates: Mutex<bool>,
    pub fail_index_fetch: Mutex<bool>,
    next_id: Mutex<i64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_portfolio(self, portfolio: Portfolio) -> Self {
        self.portfolios.lock().unwrap().push(portfolio);
        self
    }

    pub fn with_transactions(self, ledger: Vec<Transaction>) -> Self {
        {
            let mut next = self.next_id.lock().unwrap();
            for t in &ledger {
                *next = (*next).max(t.sequence);
            }
        }
        self.transactions.lock().unwrap().extend(ledger);
        self
    }

    pub fn with_quote(self, quote: Quote) -> Self {
        self.quotes
            .lock()
            .unwrap()
            .insert(quote.symbol.clone(), quote);
        self
    }

    pub fn cash_of(&self, portfolio_id: &str) -> Decimal {
        self.portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == portfolio_id)
            .map(|p| p.current_cash)
            .unwrap()
    }

    fn next_sequence(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn ledger_for(&self, portfolio_id: &str, as_of: Option<NaiveDate>) -> Result<Vec<Transaction>> {
        if self
            .broken_ledgers
            .lock()
            .unwrap()
            .iter()
            .any(|id| id == portfolio_id)
        {
            return Err(Error::Repository(format!("ledger of {} unreadable", portfolio_id)));
        }
        let mut ledger: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.portfolio_id == portfolio_id)
            .filter(|t| as_of.map_or(true, |d| t.date <= d))
            .cloned()
            .collect();
        ledger.sort_by_key(|t| t.sort_key());
        Ok(ledger)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    fn get_ledger(&self, portfolio_id: &str) -> Result<Vec<Transaction>> {
        self.ledger_for(portfolio_id, None)
    }

    fn get_ledger_as_of(&self, portfolio_id: &str, as_of: NaiveDate) -> Result<Vec<Transaction>> {
        self.ledger_for(portfolio_id, Some(as_of))
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(transaction_id.to_string()))
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        if *self.fail_transaction_inserts.lock().unwrap() {
            return Err(Error::Repository("transaction store read-only".to_string()));
        }
        let seq = self.next_sequence();
        let created = Transaction {
            id: format!("t{}", seq),
            portfolio_id: new_transaction.portfolio_id,
            transaction_type: new_transaction.transaction_type.as_str().to_string(),
            symbol: new_transaction.symbol,
            quantity: new_transaction.quantity,
            price: new_transaction.price,
            commission: new_transaction.commission,
            amount: new_transaction.amount,
            asset_class: new_transaction.asset_class,
            sector: new_transaction.sector,
            date: new_transaction.date,
            sequence: seq,
        };
        self.transactions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.lock().unwrap();
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| Error::NotFound(transaction.id.clone()))?;
        *slot = transaction.clone();
        Ok(transaction)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        let mut transactions = self.transactions.lock().unwrap();
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        Ok(before - transactions.len())
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for InMemoryStore {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == portfolio_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(portfolio_id.to_string()))
    }

    fn list_portfolios(&self, owner_id: Option<&str>) -> Result<Vec<Portfolio>> {
        Ok(self
            .portfolios
            .lock()
            .unwrap()
            .iter()
            .filter(|p| owner_id.map_or(true, |o| p.owner_id == o))
            .cloned()
            .collect())
    }

    async fn set_cash_balance(&self, portfolio_id: &str, value: Decimal) -> Result<()> {
        let mut portfolios = self.portfolios.lock().unwrap();
        let portfolio = portfolios
            .iter_mut()
            .find(|p| p.id == portfolio_id)
            .ok_or_else(|| Error::NotFound(portfolio_id.to_string()))?;
        portfolio.current_cash = value;
        Ok(())
    }
}

impl QuoteProviderTrait for InMemoryStore {
    fn get_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        Ok(self.quotes.lock().unwrap().get(symbol).cloned())
    }
}

impl BenchmarkIndexProviderTrait for InMemoryStore {
    fn cached_index(&self) -> Result<Option<Decimal>> {
        Ok(*self.cached_index.lock().unwrap())
    }

    fn fetch_current_index(&self) -> Result<Option<Decimal>> {
        if *self.fail_index_fetch.lock().unwrap() {
            return Err(Error::MarketData("index service down".to_string()));
        }
        Ok(*self.live_index.lock().unwrap())
    }
}

impl TargetAllocationRepositoryTrait for InMemoryStore {
    fn get_target_allocation(
        &self,
        risk_profile: RiskProfile,
    ) -> Result<Option<TargetAllocationModel>> {
        Ok(self.targets.lock().unwrap().get(&risk_profile).cloned())
    }
}

impl EquityHistoryRepositoryTrait for InMemoryStore {
    fn get_equity_history(&self, portfolio_id: &str) -> Result<Vec<EquitySnapshot>> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(portfolio_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CalendarEventRepositoryTrait for InMemoryStore {
    fn get_event(&self, event_id: &str) -> Result<CalendarEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(event_id.to_string()))
    }

    async fn insert_event(&self, new_event: NewCalendarEvent) -> Result<CalendarEvent> {
        if self
            .failing_event_inserts
            .lock()
            .unwrap()
            .contains(&new_event.portfolio_id)
        {
            return Err(Error::Repository(format!(
                "events of {} unwritable",
                new_event.portfolio_id
            )));
        }
        let mut events = self.events.lock().unwrap();
        let created = CalendarEvent {
            id: format!("e{}", events.len() + 1),
            portfolio_id: new_event.portfolio_id,
            title: new_event.title,
            event_type: new_event.event_type,
            symbol: new_event.symbol,
            event_date: new_event.event_date,
            record_date: new_event.record_date,
            amount: new_event.amount,
            url: new_event.url,
            priority: new_event.priority,
            processed: false,
        };
        events.push(created.clone());
        Ok(created)
    }

    async fn set_processed(&self, event_id: &str, processed: bool) -> Result<()> {
        if *self.fail_event_updates.lock().unwrap() {
            return Err(Error::Repository("event store read-only".to_string()));
        }
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::NotFound(event_id.to_string()))?;
        event.processed = processed;
        Ok(())
    }
}
