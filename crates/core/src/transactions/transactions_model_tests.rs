use super::*;
use crate::errors::{CalculatorError, Error};
use crate::test_support::{date, quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn new_trade(kind: TransactionType, symbol: &str, qty: Decimal, price: Decimal) -> NewTransaction {
    NewTransaction {
        portfolio_id: "p1".to_string(),
        transaction_type: kind,
        symbol: Some(symbol.to_string()),
        quantity: Some(qty),
        price: Some(price),
        commission: None,
        amount: None,
        asset_class: None,
        sector: None,
        date: date(2024, 1, 10),
    }
}

fn new_cash(kind: TransactionType, amount: Option<Decimal>, price: Decimal) -> NewTransaction {
    NewTransaction {
        symbol: None,
        quantity: Some(dec!(7)),
        price: Some(price),
        commission: Some(dec!(5)),
        amount,
        ..new_trade(kind, "", Decimal::ZERO, Decimal::ZERO)
    }
}

// ==================== Transaction type ====================

#[test]
fn test_type_labels_parse() {
    assert_eq!("buy".parse::<TransactionType>().unwrap(), TransactionType::Buy);
    assert_eq!(" Sell ".parse::<TransactionType>().unwrap(), TransactionType::Sell);
    assert_eq!("WITHDRAW".parse::<TransactionType>().unwrap(), TransactionType::Withdraw);
    assert!(matches!(
        "split".parse::<TransactionType>(),
        Err(CalculatorError::UnsupportedTransactionType(_))
    ));
    assert_eq!(TransactionType::Dividend.to_string(), "dividend");
    assert!(TransactionType::Deposit.is_capital_flow());
    assert!(!TransactionType::Dividend.is_capital_flow());
}

#[test]
fn test_sort_ledger_orders_by_date_then_sequence() {
    let mut ledger = vec![
        Transaction {
            id: "b".to_string(),
            date: date(2024, 1, 2),
            sequence: 1,
            ..Default::default()
        },
        Transaction {
            id: "c".to_string(),
            date: date(2024, 1, 1),
            sequence: 9,
            ..Default::default()
        },
        Transaction {
            id: "a".to_string(),
            date: date(2024, 1, 1),
            sequence: 3,
            ..Default::default()
        },
    ];
    sort_ledger(&mut ledger);
    let ids: Vec<&str> = ledger.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
}

// ==================== Entry preparation ====================

#[test]
fn test_buy_gets_estimated_commission_and_amount() {
    let q = quote("FOLD", dec!(50000), "Stock");
    let entry = new_trade(TransactionType::Buy, " فولاد ", dec!(10), dec!(50000))
        .into_entry(Some(&q))
        .unwrap();

    assert_eq!(entry.symbol.as_deref(), Some("فولاد"));
    assert_eq!(entry.commission, Some(dec!(1856)));
    assert_eq!(entry.amount, Some(dec!(501856)));
    assert_eq!(entry.asset_class.as_deref(), Some("Stock"));
    assert_eq!(entry.sector.as_deref(), Some("Industrial"));
}

#[test]
fn test_sell_keeps_supplied_commission() {
    let mut input = new_trade(TransactionType::Sell, "X", dec!(10), dec!(100));
    input.commission = Some(dec!(3));
    input.asset_class = Some("ETF_Gold".to_string());

    let entry = input.into_entry(None).unwrap();
    assert_eq!(entry.commission, Some(dec!(3)));
    assert_eq!(entry.amount, Some(dec!(997)));
    assert_eq!(entry.asset_class.as_deref(), Some("ETF_Gold"));
}

#[test]
fn test_trade_validation_errors() {
    let no_symbol = new_trade(TransactionType::Buy, "  ", dec!(1), dec!(1));
    assert!(matches!(no_symbol.into_entry(None), Err(Error::Validation(_))));

    let zero_qty = new_trade(TransactionType::Buy, "X", Decimal::ZERO, dec!(1));
    assert!(matches!(zero_qty.into_entry(None), Err(Error::Validation(_))));

    let negative_price = new_trade(TransactionType::Sell, "X", dec!(1), dec!(-1));
    assert!(matches!(negative_price.into_entry(None), Err(Error::Validation(_))));

    let mut negative_fee = new_trade(TransactionType::Buy, "X", dec!(1), dec!(1));
    negative_fee.commission = Some(dec!(-1));
    assert!(matches!(negative_fee.into_entry(None), Err(Error::Validation(_))));

    let mut no_portfolio = new_trade(TransactionType::Buy, "X", dec!(1), dec!(1));
    no_portfolio.portfolio_id = " ".to_string();
    assert!(matches!(no_portfolio.into_entry(None), Err(Error::Validation(_))));
}

#[test]
fn test_cash_event_normalization() {
    let entry = new_cash(TransactionType::Deposit, None, dec!(250000))
        .into_entry(None)
        .unwrap();
    assert_eq!(entry.quantity, Some(Decimal::ONE));
    assert_eq!(entry.price, Some(dec!(250000)));
    assert_eq!(entry.amount, Some(dec!(250000)));
    assert_eq!(entry.commission, Some(Decimal::ZERO));
    assert_eq!(entry.asset_class.as_deref(), Some("Cash"));
    assert_eq!(entry.sector.as_deref(), Some("Bank"));

    let explicit = new_cash(TransactionType::Withdraw, Some(dec!(900)), dec!(1))
        .into_entry(None)
        .unwrap();
    assert_eq!(explicit.amount, Some(dec!(900)));
    assert_eq!(explicit.price, Some(dec!(900)));

    let negative = new_cash(TransactionType::Deposit, Some(dec!(-1)), dec!(1));
    assert!(negative.into_entry(None).is_err());
}

// ==================== Commission schedule ====================

#[test]
fn test_commission_kinds() {
    assert_eq!(CommissionKind::resolve(Some("Stock"), Some("TSE")), CommissionKind::TseStock);
    assert_eq!(CommissionKind::resolve(Some("Stock"), Some("ifb")), CommissionKind::IfbStock);
    assert_eq!(CommissionKind::resolve(None, None), CommissionKind::TseStock);
    assert_eq!(CommissionKind::resolve(Some("ETF_Gold"), Some("IFB")), CommissionKind::EtfGold);
    assert_eq!(CommissionKind::resolve(Some("ETF_Fixed"), None), CommissionKind::EtfFixedIncome);
    assert_eq!(CommissionKind::resolve(Some("ETF"), None), CommissionKind::EtfEquity);
    assert_eq!(
        CommissionKind::resolve(Some("صندوق طلا"), None),
        CommissionKind::EtfGold
    );
}

#[test]
fn test_estimate_commission() {
    let tse = quote("FOLD", dec!(50000), "Stock");
    assert_eq!(
        estimate_commission(TransactionType::Buy, dec!(10), dec!(50000), Some(&tse)),
        dec!(1856)
    );
    assert_eq!(
        estimate_commission(TransactionType::Sell, dec!(10), dec!(50000), Some(&tse)),
        dec!(4400)
    );

    let gold = quote("TALA", dec!(1000), "ETF_Gold");
    assert_eq!(
        estimate_commission(TransactionType::Sell, dec!(1000), dec!(1000), Some(&gold)),
        dec!(1200)
    );
    assert_eq!(
        estimate_commission(TransactionType::Deposit, dec!(1), dec!(1000), None),
        Decimal::ZERO
    );
}

// ==================== Opening ledger ====================

#[test]
fn test_opening_ledger_deposit_then_buys() {
    let stocks = vec![
        InitialStockInput {
            symbol: "فولاد".to_string(),
            quantity: "۱,۰۰۰".to_string(),
            price: "500".to_string(),
            ..Default::default()
        },
        InitialStockInput {
            symbol: "TALA".to_string(),
            quantity: "10".to_string(),
            price: "2000".to_string(),
            asset_class: Some("ETF_Gold".to_string()),
            sector: Some("Gold".to_string()),
        },
        InitialStockInput {
            symbol: "BAD".to_string(),
            quantity: "ten".to_string(),
            price: "1".to_string(),
            ..Default::default()
        },
        InitialStockInput {
            symbol: "".to_string(),
            quantity: "1".to_string(),
            price: "1".to_string(),
            ..Default::default()
        },
        InitialStockInput {
            symbol: "NEG".to_string(),
            quantity: "-3".to_string(),
            price: "1".to_string(),
            ..Default::default()
        },
    ];

    let ledger = build_opening_ledger("p1", date(2024, 1, 1), dec!(100000), &stocks);
    assert_eq!(ledger.len(), 3);

    let deposit = &ledger[0];
    assert_eq!(deposit.transaction_type, TransactionType::Deposit);
    assert_eq!(deposit.amount, Some(dec!(620000)));

    let first = &ledger[1];
    assert_eq!(first.transaction_type, TransactionType::Buy);
    assert_eq!(first.quantity, Some(dec!(1000)));
    assert_eq!(first.commission, Some(Decimal::ZERO));
    assert_eq!(first.asset_class.as_deref(), Some("Stock"));
    assert_eq!(first.sector.as_deref(), Some("Unknown"));

    assert_eq!(ledger[2].asset_class.as_deref(), Some("ETF_Gold"));
}

#[test]
fn test_opening_ledger_without_capital_is_empty() {
    assert!(build_opening_ledger("p1", date(2024, 1, 1), Decimal::ZERO, &[]).is_empty());

    let stocks = vec![InitialStockInput {
        symbol: "FREE".to_string(),
        quantity: "5".to_string(),
        price: "0".to_string(),
        ..Default::default()
    }];
    let ledger = build_opening_ledger("p1", date(2024, 1, 1), Decimal::ZERO, &stocks);
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].transaction_type, TransactionType::Buy);
}
