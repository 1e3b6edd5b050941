//! Calendar event domain models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarEventType {
    Dividend,
    Meeting,
    Note,
}

impl fmt::Display for CalendarEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalendarEventType::Dividend => "dividend",
            CalendarEventType::Meeting => "meeting",
            CalendarEventType::Note => "note",
        };
        f.write_str(label)
    }
}

/// A dated event on a portfolio's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub portfolio_id: String,
    pub title: String,
    pub event_type: CalendarEventType,
    pub symbol: Option<String>,
    /// Payment date for dividends, meeting date for meetings.
    pub event_date: NaiveDate,
    pub record_date: Option<NaiveDate>,
    /// Cash the portfolio is entitled to; zero for meetings and notes.
    pub amount: Decimal,
    pub url: Option<String>,
    pub priority: Option<String>,
    /// Set once a dividend has been booked to the ledger.
    pub processed: bool,
}

impl CalendarEvent {
    pub fn is_settleable_dividend(&self) -> bool {
        self.event_type == CalendarEventType::Dividend && !self.processed
    }
}

/// Input model for creating a calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    pub portfolio_id: String,
    pub title: String,
    pub event_type: CalendarEventType,
    pub symbol: Option<String>,
    pub event_date: NaiveDate,
    pub record_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub url: Option<String>,
    pub priority: Option<String>,
}

/// A corporate action announced for one symbol, to be fanned out to every
/// portfolio that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionInput {
    pub symbol: String,
    /// `Dividend` or `Meeting`.
    pub event_type: CalendarEventType,
    pub payment_date: NaiveDate,
    pub record_date: Option<NaiveDate>,
    #[serde(default)]
    pub dividend_per_share: Decimal,
    pub url: Option<String>,
    pub priority: Option<String>,
}

impl CorporateActionInput {
    /// Date on which holdings decide entitlement: the record date for
    /// dividends (payment date when none is given), the meeting date otherwise.
    pub fn check_date(&self) -> NaiveDate {
        match self.event_type {
            CalendarEventType::Dividend => self.record_date.unwrap_or(self.payment_date),
            _ => self.payment_date,
        }
    }

    pub fn title(&self) -> String {
        match self.event_type {
            CalendarEventType::Dividend => format!("Cash dividend {}", self.symbol),
            _ => format!("General meeting {}", self.symbol),
        }
    }
}
