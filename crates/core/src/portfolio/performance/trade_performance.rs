//! Realized trade statistics from the ledger.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use super::performance_model::{ClosedTrade, TradePerformance, TradePerformanceSummary, TradeResult};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::ledger::{
    buy_cost, ordered_entries, position_key, sell_proceeds, validate_entry, Position,
};
use crate::transactions::{Transaction, TransactionType};

/// Walks the ledger with the same average-cost rules as the replay engine
/// and emits one closed trade per sell from an open position.
///
/// Trades are returned in ledger order.
pub fn extract_closed_trades(ledger: &[Transaction]) -> Vec<ClosedTrade> {
    let mut positions: HashMap<String, Position> = HashMap::new();
    let mut trades = Vec::new();

    for tx in ordered_entries(ledger, |_| true) {
        let kind = match validate_entry(tx) {
            Ok(kind) => kind,
            Err(e) => {
                debug!("Trade tracker skipping transaction {}: {}", tx.id, e);
                continue;
            }
        };

        match kind {
            TransactionType::Buy => {
                let Ok(cost) = buy_cost(tx) else {
                    debug!("Trade tracker skipping oversized buy {}", tx.id);
                    continue;
                };
                let symbol = position_key(tx);
                let mut position = positions
                    .get(&symbol)
                    .cloned()
                    .unwrap_or_else(|| Position::new(symbol.clone()));
                if position.add(tx.qty(), cost).is_some() {
                    positions.insert(symbol, position);
                }
            }
            TransactionType::Sell => {
                let Ok(proceeds) = sell_proceeds(tx) else {
                    debug!("Trade tracker skipping oversized sell {}", tx.id);
                    continue;
                };
                let symbol = position_key(tx);
                let Some(avg) = positions.get_mut(&symbol).and_then(|p| p.reduce(tx.qty())) else {
                    continue;
                };

                let Some(cost_of_sold) = tx.qty().checked_mul(avg) else {
                    continue;
                };
                let pnl = proceeds - cost_of_sold;
                let pnl_percent = if cost_of_sold > Decimal::ZERO {
                    pnl / cost_of_sold * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                };

                trades.push(ClosedTrade {
                    portfolio_id: tx.portfolio_id.clone(),
                    transaction_id: tx.id.clone(),
                    symbol,
                    date: tx.date,
                    quantity: tx.qty(),
                    proceeds,
                    cost_of_sold,
                    pnl,
                    pnl_percent,
                    result: if pnl > Decimal::ZERO {
                        TradeResult::Win
                    } else {
                        TradeResult::Loss
                    },
                });
            }
            _ => {}
        }
    }

    trades
}

/// Win/loss statistics over a set of closed trades.
///
/// The profit factor is gross profit over gross loss; `sentinel` when there
/// are gains but no losses, zero when there are neither.
pub fn summarize_trades(trades: &[ClosedTrade], sentinel: Decimal) -> TradePerformanceSummary {
    let total_trades = trades.len();
    let win_count = trades
        .iter()
        .filter(|t| t.result == TradeResult::Win)
        .count();
    let loss_count = total_trades - win_count;

    let gross_profit: Decimal = trades
        .iter()
        .filter(|t| t.result == TradeResult::Win)
        .map(|t| t.pnl)
        .sum();
    let gross_loss: Decimal = trades
        .iter()
        .filter(|t| t.result == TradeResult::Loss)
        .map(|t| t.pnl)
        .sum::<Decimal>()
        .abs();

    let win_rate = if total_trades > 0 {
        Decimal::from(win_count) / Decimal::from(total_trades) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let profit_factor = if gross_loss > Decimal::ZERO {
        gross_profit / gross_loss
    } else if gross_profit > Decimal::ZERO {
        sentinel
    } else {
        Decimal::ZERO
    };

    TradePerformanceSummary {
        total_trades,
        win_count,
        loss_count,
        win_rate: win_rate.round_dp(DISPLAY_DECIMAL_PRECISION),
        gross_profit,
        gross_loss,
        total_pnl: gross_profit - gross_loss,
        profit_factor: profit_factor.round_dp(DISPLAY_DECIMAL_PRECISION),
    }
}

/// Summary plus history, newest trade first.
pub fn build_trade_performance(mut trades: Vec<ClosedTrade>, sentinel: Decimal) -> TradePerformance {
    let summary = summarize_trades(&trades, sentinel);
    trades.reverse();
    TradePerformance { summary, trades }
}
