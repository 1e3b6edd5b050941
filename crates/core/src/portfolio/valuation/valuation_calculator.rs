//! Turns replayed positions and quotes into a portfolio valuation.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use super::valuation_model::{HoldingValuation, PortfolioValuation};
use crate::assets::AssetCategory;
use crate::market_data::Quote;
use crate::portfolio::allocation::{alignment_score, CategoryAllocation, TargetAllocationModel};
use crate::portfolio::ledger::{Position, ReplayResult};
use crate::portfolios::Portfolio;

/// Asset-class label for a holding: the quote's asset type, else the last
/// label on the ledger, else empty (which classifies as equity).
pub fn resolve_asset_label(quote: Option<&Quote>, position: &Position) -> String {
    quote
        .and_then(|q| q.asset_type.as_deref())
        .filter(|l| !l.trim().is_empty())
        .or_else(|| position.asset_class.as_deref().filter(|l| !l.trim().is_empty()))
        .unwrap_or_default()
        .to_string()
}

fn pct_of(value: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        value / denominator * Decimal::ONE_HUNDRED
    }
}

fn value_holding(position: &Position, quote: Option<&Quote>) -> HoldingValuation {
    let usable_quote = quote.filter(|q| q.has_price());
    let average_cost = position.average_cost();
    let (market_price, price_is_fallback) = match usable_quote {
        Some(q) => (q.last_price, false),
        None => (average_cost, true),
    };
    let market_value = position.quantity * market_price;
    let unrealized_gain = market_value - position.cost_basis;
    let asset_label = resolve_asset_label(quote, position);

    HoldingValuation {
        symbol: position.symbol.clone(),
        name: quote
            .map(Quote::display_name)
            .unwrap_or_else(|| position.symbol.clone()),
        sector: quote
            .map(Quote::sector_or_unknown)
            .or_else(|| position.sector.clone())
            .unwrap_or_else(|| crate::constants::UNKNOWN_SECTOR.to_string()),
        category: AssetCategory::from_label(&asset_label),
        asset_label,
        quantity: position.quantity,
        average_cost,
        cost_basis: position.cost_basis,
        market_price,
        price_is_fallback,
        market_value,
        weight_pct: Decimal::ZERO,
        unrealized_gain,
        unrealized_gain_pct: pct_of(unrealized_gain, position.cost_basis),
        day_change: usable_quote
            .map(|q| position.quantity * q.day_change())
            .unwrap_or(Decimal::ZERO),
    }
}

/// Values a replayed ledger.
///
/// Positions at or below `quantity_epsilon` are left out. Cash is the
/// replayed balance. Net invested capital is deposits minus withdrawals, or
/// the portfolio's initial capital when the ledger has no capital flows.
pub fn calculate_valuation(
    portfolio: &Portfolio,
    replay: &ReplayResult,
    quotes: &HashMap<String, Quote>,
    target: &TargetAllocationModel,
    quantity_epsilon: Decimal,
) -> PortfolioValuation {
    let state = &replay.state;

    let mut holdings: Vec<HoldingValuation> = state
        .open_positions(&quantity_epsilon)
        .into_iter()
        .map(|position| value_holding(position, quotes.get(&position.symbol)))
        .collect();

    let fallbacks = holdings.iter().filter(|h| h.price_is_fallback).count();
    if fallbacks > 0 {
        debug!(
            "Portfolio {}: {} holding(s) valued at average cost for lack of a quote",
            portfolio.id, fallbacks
        );
    }

    let cash_balance = state.cash_balance;
    let total_assets_value: Decimal = holdings.iter().map(|h| h.market_value).sum();
    let nav = total_assets_value + cash_balance;

    let raw_denominator = total_assets_value + cash_balance.max(Decimal::ZERO);
    let allocation_denominator = if raw_denominator.is_zero() {
        Decimal::ONE
    } else {
        raw_denominator
    };

    for holding in holdings.iter_mut() {
        holding.weight_pct = pct_of(holding.market_value, allocation_denominator);
    }
    holdings.sort_by(|a, b| {
        b.market_value
            .cmp(&a.market_value)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let allocation: Vec<CategoryAllocation> = AssetCategory::ALL
        .iter()
        .map(|category| {
            let value = if *category == AssetCategory::Cash {
                cash_balance
                    + holdings
                        .iter()
                        .filter(|h| h.category == AssetCategory::Cash)
                        .map(|h| h.market_value)
                        .sum::<Decimal>()
            } else {
                holdings
                    .iter()
                    .filter(|h| h.category == *category)
                    .map(|h| h.market_value)
                    .sum()
            };
            CategoryAllocation {
                category: *category,
                value,
                percent: pct_of(value.max(Decimal::ZERO), allocation_denominator),
                target_percent: target.target_for(*category),
            }
        })
        .collect();

    let net_invested_capital = if state.has_capital_flows {
        state.net_contribution
    } else {
        portfolio.initial_capital
    };
    let return_pct = if net_invested_capital > Decimal::ZERO {
        (nav - net_invested_capital) / net_invested_capital * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    PortfolioValuation {
        portfolio_id: portfolio.id.clone(),
        risk_profile: portfolio.risk_profile,
        target_model_name: target.display_name.clone(),
        alignment_score: alignment_score(&allocation, target),
        day_change: holdings.iter().map(|h| h.day_change).sum(),
        holdings,
        cash_balance,
        total_assets_value,
        nav,
        allocation_denominator,
        allocation,
        net_invested_capital,
        profit_loss: nav - net_invested_capital,
        return_pct,
        warnings: replay.warnings.clone(),
    }
}
