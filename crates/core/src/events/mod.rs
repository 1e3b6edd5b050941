//! Calendar events: corporate-action distribution and dividend settlement.

mod corporate_actions_service;
mod events_model;
mod events_traits;

#[cfg(test)]
mod corporate_actions_service_tests;

pub use corporate_actions_service::CorporateActionService;
pub use events_model::{CalendarEvent, CalendarEventType, CorporateActionInput, NewCalendarEvent};
pub use events_traits::{CalendarEventRepositoryTrait, CorporateActionServiceTrait};
