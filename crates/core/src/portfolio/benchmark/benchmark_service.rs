use std::sync::Arc;

use log::{error, warn};
use rust_decimal::Decimal;

use super::benchmark_model::BenchmarkComparison;
use crate::market_data::BenchmarkIndexProviderTrait;

/// Index return since `initial`, in percent; zero unless both levels are positive.
pub fn index_return_pct(initial: Decimal, current: Decimal) -> Decimal {
    if initial > Decimal::ZERO && current > Decimal::ZERO {
        (current - initial) / initial * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

pub fn compare_to_benchmark(
    portfolio_return_pct: Decimal,
    initial_index: Decimal,
    current_index: Decimal,
) -> BenchmarkComparison {
    let index_return = index_return_pct(initial_index, current_index);
    BenchmarkComparison {
        initial_index,
        current_index,
        index_return_pct: index_return,
        portfolio_return_pct,
        alpha: portfolio_return_pct - index_return,
    }
}

#[derive(Clone)]
pub struct BenchmarkService {
    index_provider: Arc<dyn BenchmarkIndexProviderTrait>,
}

impl BenchmarkService {
    pub fn new(index_provider: Arc<dyn BenchmarkIndexProviderTrait>) -> Self {
        Self { index_provider }
    }

    /// Current index level: the cached value, else a live fetch, else zero.
    pub fn current_index(&self) -> Decimal {
        match self.index_provider.cached_index() {
            Ok(Some(level)) if level > Decimal::ZERO => return level,
            Ok(_) => {}
            Err(e) => warn!("Cached benchmark index unavailable: {}", e),
        }

        match self.index_provider.fetch_current_index() {
            Ok(Some(level)) if level > Decimal::ZERO => level,
            Ok(_) => {
                warn!("Benchmark index fetch returned no value; using zero");
                Decimal::ZERO
            }
            Err(e) => {
                error!("Failed to fetch benchmark index: {}", e);
                Decimal::ZERO
            }
        }
    }

    pub fn compare(&self, portfolio_return_pct: Decimal, initial_index: Decimal) -> BenchmarkComparison {
        compare_to_benchmark(portfolio_return_pct, initial_index, self.current_index())
    }
}
