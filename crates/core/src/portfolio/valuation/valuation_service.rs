use std::sync::Arc;

use log::{debug, warn};

use super::valuation_calculator::calculate_valuation;
use super::valuation_model::PortfolioValuation;
use super::valuation_traits::ValuationServiceTrait;
use crate::errors::Result;
use crate::market_data::QuoteProviderTrait;
use crate::portfolio::allocation::AllocationService;
use crate::portfolio::ledger::replay;
use crate::portfolios::{Portfolio, PortfolioRepositoryTrait};
use crate::settings::{current_settings, SharedSettings};
use crate::transactions::TransactionRepositoryTrait;

#[derive(Clone)]
pub struct ValuationService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
    allocation_service: Arc<AllocationService>,
    settings: SharedSettings,
}

impl ValuationService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
        allocation_service: Arc<AllocationService>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            transaction_repository,
            portfolio_repository,
            quote_provider,
            allocation_service,
            settings,
        }
    }
}

impl ValuationServiceTrait for ValuationService {
    fn get_valuation(&self, portfolio_id: &str) -> Result<PortfolioValuation> {
        let portfolio = self.portfolio_repository.get_portfolio(portfolio_id)?;
        self.value_portfolio(&portfolio)
    }

    fn value_portfolio(&self, portfolio: &Portfolio) -> Result<PortfolioValuation> {
        debug!("Valuing portfolio {}", portfolio.id);
        let settings = current_settings(&self.settings);

        let ledger = self.transaction_repository.get_ledger(&portfolio.id)?;
        let replayed = replay(&ledger);
        if replayed.has_warnings() {
            warn!(
                "Portfolio {}: {} ledger entries skipped during replay",
                portfolio.id,
                replayed.warnings.len()
            );
        }

        let symbols: Vec<String> = replayed
            .state
            .open_positions(&settings.quantity_epsilon)
            .into_iter()
            .map(|p| p.symbol.clone())
            .collect();
        let quotes = self.quote_provider.get_quotes(&symbols);
        let target = self
            .allocation_service
            .get_target_model(portfolio.risk_profile);

        Ok(calculate_valuation(
            portfolio,
            &replayed,
            &quotes,
            &target,
            settings.quantity_epsilon,
        ))
    }
}
