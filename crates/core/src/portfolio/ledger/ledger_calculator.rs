//! Ledger replay: folds an ordered transaction log into positions, cash and
//! net contribution.
//!
//! The fold is pure. Entries that cannot be applied are skipped and reported
//! as [`ReplayWarning`]s; they never abort the replay.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use super::ledger_model::{LedgerState, ReplayResult, ReplayWarning};
use super::positions_model::Position;
use crate::errors::CalculatorError;
use crate::transactions::{Transaction, TransactionType};
use crate::utils::normalize_symbol;

/// Replays the full ledger.
pub fn replay(ledger: &[Transaction]) -> ReplayResult {
    replay_filtered(ledger, |_| true)
}

/// Replays only the entries dated on or before `as_of`.
pub fn replay_as_of(ledger: &[Transaction], as_of: NaiveDate) -> ReplayResult {
    replay_filtered(ledger, |tx| tx.date <= as_of)
}

/// Open quantity of `symbol` at the end of `as_of`.
pub fn quantity_held_as_of(ledger: &[Transaction], symbol: &str, as_of: NaiveDate) -> Decimal {
    replay_as_of(ledger, as_of)
        .state
        .quantity_of(&normalize_symbol(symbol))
}

/// Cash balance implied by the ledger. The cached balance on a portfolio is
/// always overwritten with this value, never adjusted incrementally.
pub fn recompute_cash_balance(ledger: &[Transaction]) -> Decimal {
    replay(ledger).state.cash_balance
}

/// Entries in replay order: date, then insertion sequence. The sort is
/// stable, so equal keys keep their input order.
pub(crate) fn ordered_entries<'a>(
    ledger: &'a [Transaction],
    include: impl Fn(&Transaction) -> bool,
) -> Vec<&'a Transaction> {
    let mut ordered: Vec<&Transaction> = ledger.iter().filter(|tx| include(tx)).collect();
    ordered.sort_by_key(|tx| tx.sort_key());
    ordered
}

fn replay_filtered(ledger: &[Transaction], include: impl Fn(&Transaction) -> bool) -> ReplayResult {
    let mut result = ReplayResult::default();

    for tx in ordered_entries(ledger, include) {
        if let Err(e) = apply_entry(&mut result.state, tx) {
            let warning = ReplayWarning {
                transaction_id: tx.id.clone(),
                date: tx.date,
                message: format!("Skipped: {}", e),
            };
            warn!("{}", warning);
            result.warnings.push(warning);
        }
    }

    result
}

/// Checks an entry before it touches any state and returns its parsed type.
pub(crate) fn validate_entry(tx: &Transaction) -> Result<TransactionType, CalculatorError> {
    let kind = tx.kind()?;

    let numeric_fields = [
        ("quantity", tx.quantity),
        ("price", tx.price),
        ("commission", tx.commission),
        ("amount", tx.amount),
    ];
    for (field, value) in numeric_fields {
        if let Some(v) = value {
            if v < Decimal::ZERO {
                return Err(CalculatorError::NegativeValue {
                    transaction_id: tx.id.clone(),
                    field,
                    value: v.to_string(),
                });
            }
        }
    }

    if kind.is_trade() && tx.trimmed_symbol().is_none() {
        return Err(CalculatorError::MissingSymbol {
            transaction_id: tx.id.clone(),
            date: tx.date,
        });
    }

    Ok(kind)
}

/// Canonical position key for a trade entry.
pub(crate) fn position_key(tx: &Transaction) -> String {
    normalize_symbol(tx.trimmed_symbol().unwrap_or_default())
}

fn overflow(tx: &Transaction) -> CalculatorError {
    CalculatorError::Overflow {
        transaction_id: tx.id.clone(),
    }
}

/// Cost of a buy, commission included.
pub(crate) fn buy_cost(tx: &Transaction) -> Result<Decimal, CalculatorError> {
    tx.gross_value()
        .and_then(|gross| gross.checked_add(tx.fee()))
        .ok_or_else(|| overflow(tx))
}

/// Proceeds of a sell, net of commission.
pub(crate) fn sell_proceeds(tx: &Transaction) -> Result<Decimal, CalculatorError> {
    tx.gross_value()
        .and_then(|gross| gross.checked_sub(tx.fee()))
        .ok_or_else(|| overflow(tx))
}

/// Applies one entry to the state. On error the state is left unchanged.
pub fn apply_entry(state: &mut LedgerState, tx: &Transaction) -> Result<(), CalculatorError> {
    match validate_entry(tx)? {
        TransactionType::Buy => handle_buy(state, tx)?,
        TransactionType::Sell => handle_sell(state, tx)?,
        kind => handle_cash_event(state, tx, kind)?,
    }
    Ok(())
}

fn handle_cash_event(
    state: &mut LedgerState,
    tx: &Transaction,
    kind: TransactionType,
) -> Result<(), CalculatorError> {
    let amount = tx.cash_amount().ok_or_else(|| overflow(tx))?;
    let (cash, contribution) = match kind {
        TransactionType::Deposit => (
            state.cash_balance.checked_add(amount),
            state.net_contribution.checked_add(amount),
        ),
        TransactionType::Withdraw => (
            state.cash_balance.checked_sub(amount),
            state.net_contribution.checked_sub(amount),
        ),
        _ => (state.cash_balance.checked_add(amount), Some(state.net_contribution)),
    };
    let (Some(cash), Some(contribution)) = (cash, contribution) else {
        return Err(overflow(tx));
    };

    state.cash_balance = cash;
    state.net_contribution = contribution;
    if kind.is_capital_flow() {
        state.has_capital_flows = true;
    }
    Ok(())
}

fn handle_buy(state: &mut LedgerState, tx: &Transaction) -> Result<(), CalculatorError> {
    let cost = buy_cost(tx)?;
    let cash = state
        .cash_balance
        .checked_sub(cost)
        .ok_or_else(|| overflow(tx))?;

    let symbol = position_key(tx);
    let mut position = state
        .positions
        .get(&symbol)
        .cloned()
        .unwrap_or_else(|| Position::new(symbol.clone()));
    position.add(tx.qty(), cost).ok_or_else(|| overflow(tx))?;
    remember_labels(&mut position, tx);

    state.cash_balance = cash;
    state.positions.insert(symbol, position);
    Ok(())
}

fn handle_sell(state: &mut LedgerState, tx: &Transaction) -> Result<(), CalculatorError> {
    let revenue = sell_proceeds(tx)?;
    state.cash_balance = state
        .cash_balance
        .checked_add(revenue)
        .ok_or_else(|| overflow(tx))?;

    let symbol = position_key(tx);
    let sold_from_position = state
        .positions
        .get_mut(&symbol)
        .and_then(|position| {
            remember_labels(position, tx);
            position.reduce(tx.qty())
        })
        .is_some();

    if !sold_from_position {
        warn!(
            "Sell of {} via transaction {} has no open position. Applying cash effect only.",
            symbol, tx.id
        );
    }
    Ok(())
}

fn remember_labels(position: &mut Position, tx: &Transaction) {
    if let Some(label) = tx.asset_class.as_deref().filter(|l| !l.trim().is_empty()) {
        position.asset_class = Some(label.to_string());
    }
    if let Some(sector) = tx.sector.as_deref().filter(|s| !s.trim().is_empty()) {
        position.sector = Some(sector.to_string());
    }
}
