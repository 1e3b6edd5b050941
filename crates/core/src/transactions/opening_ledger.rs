//! Opening entries for a newly created portfolio.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_model::{NewTransaction, TransactionType};
use crate::constants::{CASH_ASSET_CLASS, CASH_SECTOR, UNKNOWN_SECTOR};
use crate::utils::{normalize_symbol, parse_ledger_number};

const DEFAULT_STOCK_ASSET_CLASS: &str = "Stock";

/// One row of the "stocks already held" form, as typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InitialStockInput {
    pub symbol: String,
    pub quantity: String,
    pub price: String,
    pub asset_class: Option<String>,
    pub sector: Option<String>,
}

/// Builds the entries that open a portfolio: one deposit of the total
/// starting capital (cash plus the value of the stocks brought in) followed
/// by one commission-free buy per valid stock row.
///
/// Rows with an unparseable number, a blank symbol, a non-positive quantity
/// or a negative price are skipped. No deposit is written when the total
/// capital is zero.
pub fn build_opening_ledger(
    portfolio_id: &str,
    date: NaiveDate,
    initial_cash: Decimal,
    initial_stocks: &[InitialStockInput],
) -> Vec<NewTransaction> {
    let mut buys = Vec::with_capacity(initial_stocks.len());
    let mut stocks_value = Decimal::ZERO;

    for row in initial_stocks {
        let symbol = normalize_symbol(&row.symbol);
        if symbol.is_empty() {
            warn!("Skipping opening stock row without a symbol");
            continue;
        }
        let (Some(quantity), Some(price)) = (
            parse_ledger_number(&row.quantity, "quantity"),
            parse_ledger_number(&row.price, "price"),
        ) else {
            continue;
        };
        if quantity <= Decimal::ZERO || price < Decimal::ZERO {
            warn!(
                "Skipping opening stock row {}: quantity {} price {}",
                symbol, quantity, price
            );
            continue;
        }

        let value = quantity * price;
        stocks_value += value;
        buys.push(NewTransaction {
            portfolio_id: portfolio_id.to_string(),
            transaction_type: TransactionType::Buy,
            symbol: Some(symbol),
            quantity: Some(quantity),
            price: Some(price),
            commission: Some(Decimal::ZERO),
            amount: Some(value),
            asset_class: Some(
                row.asset_class
                    .clone()
                    .unwrap_or_else(|| DEFAULT_STOCK_ASSET_CLASS.to_string()),
            ),
            sector: Some(
                row.sector
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
            ),
            date,
        });
    }

    let total_capital = initial_cash + stocks_value;
    let mut ledger = Vec::with_capacity(buys.len() + 1);
    if total_capital > Decimal::ZERO {
        ledger.push(NewTransaction {
            portfolio_id: portfolio_id.to_string(),
            transaction_type: TransactionType::Deposit,
            symbol: None,
            quantity: Some(Decimal::ONE),
            price: Some(total_capital),
            commission: Some(Decimal::ZERO),
            amount: Some(total_capital),
            asset_class: Some(CASH_ASSET_CLASS.to_string()),
            sector: Some(CASH_SECTOR.to_string()),
            date,
        });
    }
    ledger.extend(buys);
    ledger
}
