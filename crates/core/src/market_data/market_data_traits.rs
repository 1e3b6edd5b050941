use std::collections::HashMap;

use rust_decimal::Decimal;

use super::market_data_model::Quote;
use crate::errors::Result;

/// Read access to the quote store.
pub trait QuoteProviderTrait: Send + Sync {
    /// Returns the latest quote, or `None` when the symbol has never been synced.
    fn get_quote(&self, symbol: &str) -> Result<Option<Quote>>;

    /// Looks up several symbols at once. Symbols without a quote are absent
    /// from the map; a lookup failure for one symbol is logged and skipped.
    fn get_quotes(&self, symbols: &[String]) -> HashMap<String, Quote> {
        let mut quotes = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            match self.get_quote(symbol) {
                Ok(Some(quote)) => {
                    quotes.insert(symbol.clone(), quote);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Quote lookup failed for {}: {}", symbol, e);
                }
            }
        }
        quotes
    }
}

/// Source of the benchmark index level (e.g. the TEDPIX total index).
pub trait BenchmarkIndexProviderTrait: Send + Sync {
    /// Last value saved by the background sync, if any.
    fn cached_index(&self) -> Result<Option<Decimal>>;

    /// Asks the upstream market for the current value.
    fn fetch_current_index(&self) -> Result<Option<Decimal>>;
}
