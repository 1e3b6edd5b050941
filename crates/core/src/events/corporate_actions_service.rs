//! Fans corporate actions out to holders and books dividends.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use rust_decimal::Decimal;

use super::events_model::{CalendarEventType, CorporateActionInput, NewCalendarEvent};
use super::events_traits::{CalendarEventRepositoryTrait, CorporateActionServiceTrait};
use crate::constants::{CASH_ASSET_CLASS, CASH_SECTOR};
use crate::errors::{Result, ValidationError};
use crate::portfolio::ledger::quantity_held_as_of;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::transactions::{
    NewTransaction, TransactionRepositoryTrait, TransactionServiceTrait, TransactionType,
};
use crate::utils::normalize_symbol;

pub struct CorporateActionService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    event_repository: Arc<dyn CalendarEventRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
}

impl CorporateActionService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        event_repository: Arc<dyn CalendarEventRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            transaction_repository,
            event_repository,
            transaction_service,
        }
    }
}

#[async_trait]
impl CorporateActionServiceTrait for CorporateActionService {
    async fn distribute(&self, action: CorporateActionInput) -> Result<usize> {
        if action.event_type == CalendarEventType::Note {
            return Err(ValidationError::InvalidInput(
                "Only dividends and meetings can be distributed".to_string(),
            )
            .into());
        }
        let symbol = normalize_symbol(&action.symbol);
        if symbol.is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        let action = CorporateActionInput { symbol, ..action };
        let check_date = action.check_date();
        debug!(
            "Distributing {} for {} as of {}",
            action.event_type, action.symbol, check_date
        );

        let mut created = 0;
        for portfolio in self.portfolio_repository.list_portfolios(None)? {
            let ledger = match self
                .transaction_repository
                .get_ledger_as_of(&portfolio.id, check_date)
            {
                Ok(ledger) => ledger,
                Err(e) => {
                    error!(
                        "Skipping portfolio {} for {} event: {}",
                        portfolio.id, action.symbol, e
                    );
                    continue;
                }
            };

            let quantity = quantity_held_as_of(&ledger, &action.symbol, check_date);
            if quantity <= Decimal::ZERO {
                continue;
            }

            let amount = match action.event_type {
                CalendarEventType::Dividend => quantity * action.dividend_per_share,
                _ => Decimal::ZERO,
            };
            let inserted = self
                .event_repository
                .insert_event(NewCalendarEvent {
                    portfolio_id: portfolio.id.clone(),
                    title: action.title(),
                    event_type: action.event_type,
                    symbol: Some(action.symbol.clone()),
                    event_date: action.payment_date,
                    record_date: action.record_date,
                    amount,
                    url: action.url.clone(),
                    priority: action.priority.clone(),
                })
                .await;
            match inserted {
                Ok(_) => created += 1,
                Err(e) => error!(
                    "Failed to create {} event for portfolio {}: {}",
                    action.event_type, portfolio.id, e
                ),
            }
        }

        info!(
            "Created {} {} event(s) for {}",
            created, action.event_type, action.symbol
        );
        Ok(created)
    }

    async fn settle_dividend(&self, event_id: &str) -> Result<bool> {
        let event = self.event_repository.get_event(event_id)?;
        if !event.is_settleable_dividend() {
            debug!("Event {} is not an open dividend; nothing to settle", event_id);
            return Ok(false);
        }

        // Claim the event first so a retry after a partial failure cannot book twice.
        self.event_repository.set_processed(&event.id, true).await?;
        let booked = self
            .transaction_repository
            .insert_transaction(NewTransaction {
                portfolio_id: event.portfolio_id.clone(),
                transaction_type: TransactionType::Dividend,
                symbol: event.symbol.clone(),
                quantity: Some(Decimal::ONE),
                price: Some(event.amount),
                commission: Some(Decimal::ZERO),
                amount: Some(event.amount),
                asset_class: Some(CASH_ASSET_CLASS.to_string()),
                sector: Some(CASH_SECTOR.to_string()),
                date: event.event_date,
            })
            .await;
        if let Err(e) = booked {
            error!("Failed to book dividend event {}: {}", event.id, e);
            if let Err(reset) = self.event_repository.set_processed(&event.id, false).await {
                error!(
                    "Dividend event {} left marked processed without a booking: {}",
                    event.id, reset
                );
            }
            return Err(e);
        }
        self.transaction_service
            .recompute_cash(&event.portfolio_id)
            .await?;

        info!(
            "Settled dividend event {} for portfolio {}: {}",
            event.id, event.portfolio_id, event.amount
        );
        Ok(true)
    }
}
