//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commission::estimate_commission;
use super::transactions_constants::*;
use crate::constants::{CASH_ASSET_CLASS, CASH_SECTOR};
use crate::errors::{CalculatorError, ValidationError};
use crate::market_data::Quote;
use crate::utils::normalize_symbol;
use crate::Result;

/// Closed set of ledger entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
    Deposit,
    Withdraw,
    Dividend,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
            TransactionType::Deposit => TRANSACTION_TYPE_DEPOSIT,
            TransactionType::Withdraw => TRANSACTION_TYPE_WITHDRAW,
            TransactionType::Dividend => TRANSACTION_TYPE_DIVIDEND,
        }
    }

    /// Buys and sells move positions; everything else is a pure cash event.
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sell)
    }

    /// Deposits and withdrawals are the only entries that count as capital flows.
    pub fn is_capital_flow(&self) -> bool {
        matches!(self, TransactionType::Deposit | TransactionType::Withdraw)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            TRANSACTION_TYPE_DEPOSIT => Ok(TransactionType::Deposit),
            TRANSACTION_TYPE_WITHDRAW => Ok(TransactionType::Withdraw),
            TRANSACTION_TYPE_DIVIDEND => Ok(TransactionType::Dividend),
            _ => Err(CalculatorError::UnsupportedTransactionType(s.to_string())),
        }
    }
}

/// An immutable ledger entry as stored.
///
/// Numeric fields are optional because historical rows were often entered
/// with only part of the information; `None` means "not recorded".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub portfolio_id: String,
    /// Stored label; parse with [`Transaction::kind`].
    pub transaction_type: String,
    pub symbol: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub commission: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub asset_class: Option<String>,
    pub sector: Option<String>,
    pub date: NaiveDate,
    /// Insertion order; breaks ties between entries on the same date.
    pub sequence: i64,
}

impl Transaction {
    pub fn kind(&self) -> std::result::Result<TransactionType, CalculatorError> {
        self.transaction_type.parse()
    }

    /// Get quantity, defaulting to zero if not set
    pub fn qty(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Get unit price, defaulting to zero if not set
    pub fn unit_price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Get commission, defaulting to zero if not set
    pub fn fee(&self) -> Decimal {
        self.commission.unwrap_or(Decimal::ZERO)
    }

    /// Quantity × price; `None` if the product does not fit a `Decimal`.
    pub fn gross_value(&self) -> Option<Decimal> {
        self.qty().checked_mul(self.unit_price())
    }

    /// Cash moved by a deposit, withdrawal or dividend.
    ///
    /// The recorded amount wins when it is non-zero; otherwise the entry was
    /// keyed in as price × quantity (quantity at least one). `None` on overflow.
    pub fn cash_amount(&self) -> Option<Decimal> {
        match self.amount {
            Some(amount) if !amount.is_zero() => Some(amount),
            _ => self.unit_price().checked_mul(self.qty().max(Decimal::ONE)),
        }
    }

    /// Symbol with surrounding whitespace removed; `None` if blank.
    pub fn trimmed_symbol(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Ledger ordering key.
    pub fn sort_key(&self) -> (NaiveDate, i64) {
        (self.date, self.sequence)
    }
}

/// Sorts a ledger into replay order: date, then insertion sequence.
pub fn sort_ledger(ledger: &mut [Transaction]) {
    ledger.sort_by_key(Transaction::sort_key);
}

/// Input model for creating a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub portfolio_id: String,
    pub transaction_type: TransactionType,
    pub symbol: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub commission: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub asset_class: Option<String>,
    pub sector: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Validates the entry and fills in the derived fields.
    ///
    /// Trades get a normalized symbol, a commission estimated from the quote
    /// when none was supplied, and an amount of q×p + c (buy) or q×p − c
    /// (sell). Cash events get quantity one, no commission, the "Cash" asset
    /// class and an amount equal to the price unless one was supplied.
    pub fn into_entry(self, quote: Option<&Quote>) -> Result<NewTransaction> {
        if self.portfolio_id.trim().is_empty() {
            return Err(ValidationError::MissingField("portfolioId".to_string()).into());
        }

        let price = self.price.unwrap_or(Decimal::ZERO);
        if price < Decimal::ZERO {
            return Err(ValidationError::InvalidInput("Price cannot be negative".to_string()).into());
        }

        if self.transaction_type.is_trade() {
            let symbol = self
                .symbol
                .as_deref()
                .map(normalize_symbol)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ValidationError::MissingField("symbol".to_string()))?;

            let quantity = self.quantity.unwrap_or(Decimal::ZERO);
            if quantity <= Decimal::ZERO {
                return Err(ValidationError::InvalidInput(
                    "Trade quantity must be positive".to_string(),
                )
                .into());
            }

            let commission = match self.commission {
                Some(c) if c < Decimal::ZERO => {
                    return Err(ValidationError::InvalidInput(
                        "Commission cannot be negative".to_string(),
                    )
                    .into());
                }
                Some(c) => c,
                None => estimate_commission(self.transaction_type, quantity, price, quote),
            };

            let gross = quantity * price;
            let amount = if self.transaction_type == TransactionType::Buy {
                gross + commission
            } else {
                gross - commission
            };

            let asset_class = self
                .asset_class
                .or_else(|| quote.and_then(|q| q.asset_type.clone()));
            let sector = self.sector.or_else(|| quote.and_then(|q| q.sector.clone()));

            Ok(NewTransaction {
                symbol: Some(symbol),
                quantity: Some(quantity),
                price: Some(price),
                commission: Some(commission),
                amount: Some(amount),
                asset_class,
                sector,
                ..self
            })
        } else {
            let amount = match self.amount {
                Some(a) if a < Decimal::ZERO => {
                    return Err(
                        ValidationError::InvalidInput("Amount cannot be negative".to_string()).into(),
                    );
                }
                Some(a) if !a.is_zero() => a,
                _ => price,
            };

            Ok(NewTransaction {
                symbol: self
                    .symbol
                    .as_deref()
                    .map(normalize_symbol)
                    .filter(|s| !s.is_empty()),
                quantity: Some(Decimal::ONE),
                price: Some(amount),
                commission: Some(Decimal::ZERO),
                amount: Some(amount),
                asset_class: Some(CASH_ASSET_CLASS.to_string()),
                sector: Some(CASH_SECTOR.to_string()),
                ..self
            })
        }
    }
}
