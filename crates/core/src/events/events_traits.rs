use async_trait::async_trait;

use super::events_model::{CalendarEvent, CorporateActionInput, NewCalendarEvent};
use crate::errors::Result;

/// Trait defining the contract for calendar event persistence.
#[async_trait]
pub trait CalendarEventRepositoryTrait: Send + Sync {
    /// Retrieves an event by its ID. Returns `Error::NotFound` when absent.
    fn get_event(&self, event_id: &str) -> Result<CalendarEvent>;

    async fn insert_event(&self, new_event: NewCalendarEvent) -> Result<CalendarEvent>;

    async fn set_processed(&self, event_id: &str, processed: bool) -> Result<()>;
}

#[async_trait]
pub trait CorporateActionServiceTrait: Send + Sync {
    /// Creates one event per portfolio holding the symbol on the check date.
    /// Returns the number of events created; portfolios that fail are skipped.
    async fn distribute(&self, action: CorporateActionInput) -> Result<usize>;

    /// Books an unprocessed dividend event to its portfolio's ledger.
    /// Returns `false` when there was nothing to settle.
    async fn settle_dividend(&self, event_id: &str) -> Result<bool>;
}
