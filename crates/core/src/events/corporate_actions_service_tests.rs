use super::*;
use crate::errors::Error;
use crate::test_support::{buy, date, deposit, portfolio, sell, InMemoryStore};
use crate::transactions::{Transaction, TransactionRepositoryTrait, TransactionService};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn in_portfolio(mut t: Transaction, portfolio_id: &str) -> Transaction {
    t.portfolio_id = portfolio_id.to_string();
    t
}

/// p1 holds 100 FOLD since January, p2 sold out in March, p3 buys in April.
fn setup() -> (Arc<InMemoryStore>, CorporateActionService) {
    let store = Arc::new(
        InMemoryStore::new()
            .with_portfolio(portfolio("p1", "u1", dec!(100000)))
            .with_portfolio(portfolio("p2", "u1", dec!(100000)))
            .with_portfolio(portfolio("p3", "u2", dec!(100000)))
            .with_transactions(vec![
                deposit(1, dec!(100000), date(2024, 1, 1)),
                buy(2, "FOLD", dec!(100), dec!(500), date(2024, 1, 5)),
                in_portfolio(deposit(3, dec!(100000), date(2024, 1, 1)), "p2"),
                in_portfolio(buy(4, "FOLD", dec!(50), dec!(500), date(2024, 1, 5)), "p2"),
                in_portfolio(sell(5, "FOLD", dec!(50), dec!(600), date(2024, 3, 1)), "p2"),
                in_portfolio(deposit(6, dec!(100000), date(2024, 1, 1)), "p3"),
                in_portfolio(buy(7, "FOLD", dec!(10), dec!(500), date(2024, 4, 1)), "p3"),
            ]),
    );
    let transactions = Arc::new(TransactionService::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let service = CorporateActionService::new(store.clone(), store.clone(), store.clone(), transactions);
    (store, service)
}

fn dividend(record_date: Option<NaiveDate>) -> CorporateActionInput {
    CorporateActionInput {
        symbol: "FOLD".to_string(),
        event_type: CalendarEventType::Dividend,
        payment_date: date(2024, 6, 1),
        record_date,
        dividend_per_share: dec!(120),
        url: None,
        priority: None,
    }
}

// ==================== Distribution ====================

#[tokio::test]
async fn test_dividend_reaches_holders_on_record_date() {
    let (store, service) = setup();

    let created = service.distribute(dividend(Some(date(2024, 2, 1)))).await.unwrap();
    assert_eq!(created, 2);

    let events = store.events.lock().unwrap();
    let p1 = events.iter().find(|e| e.portfolio_id == "p1").unwrap();
    assert_eq!(p1.amount, dec!(12000));
    assert_eq!(p1.event_date, date(2024, 6, 1));
    assert_eq!(p1.title, "Cash dividend FOLD");
    assert!(!p1.processed);
    let p2 = events.iter().find(|e| e.portfolio_id == "p2").unwrap();
    assert_eq!(p2.amount, dec!(6000));
}

#[tokio::test]
async fn test_payment_date_used_without_record_date() {
    let (store, service) = setup();
    // On June 1st p1 and p3 hold FOLD; p2 sold out.
    assert_eq!(service.distribute(dividend(None)).await.unwrap(), 2);
    let holders: Vec<String> = store
        .events
        .lock()
        .unwrap()
        .iter()
        .map(|e| e.portfolio_id.clone())
        .collect();
    assert_eq!(holders, vec!["p1", "p3"]);
}

#[tokio::test]
async fn test_meeting_carries_no_amount() {
    let (store, service) = setup();
    let meeting = CorporateActionInput {
        event_type: CalendarEventType::Meeting,
        payment_date: date(2024, 2, 1),
        ..dividend(None)
    };

    assert_eq!(service.distribute(meeting).await.unwrap(), 2);
    let events = store.events.lock().unwrap();
    assert!(events.iter().all(|e| e.amount == Decimal::ZERO));
    assert!(events.iter().all(|e| e.title == "General meeting FOLD"));
}

#[tokio::test]
async fn test_distribution_rejects_notes_and_blank_symbols() {
    let (_, service) = setup();
    let note = CorporateActionInput {
        event_type: CalendarEventType::Note,
        ..dividend(None)
    };
    assert!(matches!(service.distribute(note).await, Err(Error::Validation(_))));

    let blank = CorporateActionInput {
        symbol: "  ".to_string(),
        ..dividend(None)
    };
    assert!(matches!(service.distribute(blank).await, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_unreadable_ledger_is_skipped() {
    let (store, service) = setup();
    store.broken_ledgers.lock().unwrap().push("p1".to_string());
    assert_eq!(service.distribute(dividend(None)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_failed_event_write_is_skipped() {
    let (store, service) = setup();
    store.failing_event_inserts.lock().unwrap().push("p1".to_string());

    // p1 and p3 hold FOLD on June 1st; only p3's event can be written.
    assert_eq!(service.distribute(dividend(None)).await.unwrap(), 1);
    let holders: Vec<String> = store
        .events
        .lock()
        .unwrap()
        .iter()
        .map(|e| e.portfolio_id.clone())
        .collect();
    assert_eq!(holders, vec!["p3"]);
}

// ==================== Settlement ====================

#[tokio::test]
async fn test_settle_dividend_books_cash_once() {
    let (store, service) = setup();
    service.distribute(dividend(Some(date(2024, 2, 1)))).await.unwrap();
    let event_id = store
        .events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.portfolio_id == "p1")
        .map(|e| e.id.clone())
        .unwrap();

    assert!(service.settle_dividend(&event_id).await.unwrap());
    // 100000 - 50000 + 12000
    assert_eq!(store.cash_of("p1"), dec!(62000));

    let ledger = store.get_ledger("p1").unwrap();
    let booked = ledger.last().unwrap();
    assert_eq!(booked.transaction_type, "dividend");
    assert_eq!(booked.symbol.as_deref(), Some("FOLD"));
    assert_eq!(booked.amount, Some(dec!(12000)));
    assert_eq!(booked.date, date(2024, 6, 1));

    assert!(!service.settle_dividend(&event_id).await.unwrap());
    assert_eq!(store.cash_of("p1"), dec!(62000));
}

#[tokio::test]
async fn test_meetings_are_not_settled() {
    let (store, service) = setup();
    let meeting = CorporateActionInput {
        event_type: CalendarEventType::Meeting,
        ..dividend(None)
    };
    service.distribute(meeting).await.unwrap();
    let event_id = store.events.lock().unwrap()[0].id.clone();

    assert!(!service.settle_dividend(&event_id).await.unwrap());
    assert!(matches!(
        service.settle_dividend("missing").await,
        Err(Error::NotFound(_))
    ));
}

fn p1_event_id(store: &InMemoryStore) -> String {
    store
        .events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.portfolio_id == "p1")
        .map(|e| e.id.clone())
        .unwrap()
}

#[tokio::test]
async fn test_failed_booking_leaves_event_open() {
    let (store, service) = setup();
    service.distribute(dividend(Some(date(2024, 2, 1)))).await.unwrap();
    let event_id = p1_event_id(&store);

    *store.fail_transaction_inserts.lock().unwrap() = true;
    assert!(matches!(
        service.settle_dividend(&event_id).await,
        Err(Error::Repository(_))
    ));
    assert!(!store.get_event(&event_id).unwrap().processed);
    assert_eq!(store.get_ledger("p1").unwrap().len(), 2);

    // A retry books it exactly once.
    *store.fail_transaction_inserts.lock().unwrap() = false;
    assert!(service.settle_dividend(&event_id).await.unwrap());
    assert!(!service.settle_dividend(&event_id).await.unwrap());
    let dividends = store
        .get_ledger("p1")
        .unwrap()
        .iter()
        .filter(|t| t.transaction_type == "dividend")
        .count();
    assert_eq!(dividends, 1);
    assert_eq!(store.cash_of("p1"), dec!(62000));
}

#[tokio::test]
async fn test_unmarkable_event_books_nothing() {
    let (store, service) = setup();
    service.distribute(dividend(Some(date(2024, 2, 1)))).await.unwrap();
    let event_id = p1_event_id(&store);

    *store.fail_event_updates.lock().unwrap() = true;
    assert!(service.settle_dividend(&event_id).await.is_err());
    assert_eq!(store.get_ledger("p1").unwrap().len(), 2);
    assert!(!store.get_event(&event_id).unwrap().processed);
}
