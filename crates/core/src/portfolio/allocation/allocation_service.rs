//! Resolves target models and checks model constituents against quotes.

use std::sync::Arc;

use log::{debug, warn};

use super::allocation_calculator::constituent_signal;
use super::allocation_model::{ConstituentSignal, TargetAllocationModel};
use super::allocation_traits::TargetAllocationRepositoryTrait;
use crate::errors::Result;
use crate::market_data::QuoteProviderTrait;
use crate::portfolios::RiskProfile;
use crate::settings::{current_settings, SharedSettings};

pub struct AllocationService {
    target_repository: Arc<dyn TargetAllocationRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
    settings: SharedSettings,
}

impl AllocationService {
    pub fn new(
        target_repository: Arc<dyn TargetAllocationRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            target_repository,
            quote_provider,
            settings,
        }
    }

    /// Configured model for the profile, falling back to the built-in one
    /// when none is stored or the lookup fails.
    pub fn get_target_model(&self, risk_profile: RiskProfile) -> TargetAllocationModel {
        match self.target_repository.get_target_allocation(risk_profile) {
            Ok(Some(model)) => model,
            Ok(None) => {
                debug!("No target model for {}, using default", risk_profile);
                TargetAllocationModel::default_for(risk_profile)
            }
            Err(e) => {
                warn!(
                    "Failed to load target model for {}: {}. Using default.",
                    risk_profile, e
                );
                TargetAllocationModel::default_for(risk_profile)
            }
        }
    }

    /// Status of every constituent of the profile's model that has a quote.
    pub fn get_constituent_signals(&self, risk_profile: RiskProfile) -> Result<Vec<ConstituentSignal>> {
        let model = self.get_target_model(risk_profile);
        let proximity = current_settings(&self.settings).constituent_proximity;

        let mut signals = Vec::with_capacity(model.constituents.len());
        for constituent in &model.constituents {
            if let Some(quote) = self.quote_provider.get_quote(&constituent.symbol)? {
                signals.push(constituent_signal(constituent, quote.last_price, proximity));
            }
        }
        Ok(signals)
    }
}
