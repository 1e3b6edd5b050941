//! Cross-portfolio views and per-portfolio analytics built on valuations.

use std::sync::Arc;

use log::{debug, error};
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::summary_model::{PortfolioSnapshot, PortfolioSummary, ScreenMatch, ScreeningCriteria};
use crate::errors::Result;
use crate::portfolio::benchmark::{compare_to_benchmark, BenchmarkComparison, BenchmarkService};
use crate::portfolio::performance::{PerformanceServiceTrait, TradePerformance};
use crate::portfolio::risk::{assess_risk, portfolio_insights, PortfolioInsight, RiskReport};
use crate::portfolio::scenario::{run_stress_test, StressScenario, StressTestResult};
use crate::portfolio::valuation::{PortfolioValuation, ValuationServiceTrait};
use crate::portfolios::{Portfolio, PortfolioRepositoryTrait};
use crate::settings::{current_settings, SharedSettings};
use crate::utils::normalize_symbol;

pub struct PortfolioAnalyticsService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    valuation_service: Arc<dyn ValuationServiceTrait>,
    performance_service: Arc<dyn PerformanceServiceTrait>,
    benchmark_service: Arc<BenchmarkService>,
    settings: SharedSettings,
}

impl PortfolioAnalyticsService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        valuation_service: Arc<dyn ValuationServiceTrait>,
        performance_service: Arc<dyn PerformanceServiceTrait>,
        benchmark_service: Arc<BenchmarkService>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            portfolio_repository,
            valuation_service,
            performance_service,
            benchmark_service,
            settings,
        }
    }

    /// Values every portfolio in parallel. A portfolio that fails to value is
    /// logged and left out; the others are unaffected.
    fn value_all(&self, owner_id: Option<&str>) -> Result<Vec<(Portfolio, PortfolioValuation)>> {
        let portfolios = self.portfolio_repository.list_portfolios(owner_id)?;
        debug!("Valuing {} portfolios", portfolios.len());

        Ok(portfolios
            .into_par_iter()
            .filter_map(|portfolio| match self.valuation_service.value_portfolio(&portfolio) {
                Ok(valuation) => Some((portfolio, valuation)),
                Err(e) => {
                    error!("Skipping portfolio {} in overview: {}", portfolio.id, e);
                    None
                }
            })
            .collect())
    }

    /// Overview rows for all portfolios, optionally restricted to one owner.
    pub fn portfolio_summaries(&self, owner_id: Option<&str>) -> Result<Vec<PortfolioSummary>> {
        let valued = self.value_all(owner_id)?;
        // One index lookup for the whole overview.
        let current_index = self.benchmark_service.current_index();

        Ok(valued
            .into_iter()
            .map(|(portfolio, valuation)| {
                let benchmark = compare_to_benchmark(
                    valuation.return_pct,
                    portfolio.initial_index,
                    current_index,
                );
                PortfolioSummary {
                    portfolio_id: portfolio.id,
                    name: portfolio.name,
                    manager_name: portfolio.manager_name,
                    risk_profile: portfolio.risk_profile,
                    initial_capital: portfolio.initial_capital,
                    nav: valuation.nav,
                    cash_balance: valuation.cash_balance,
                    profit_loss: valuation.nav - portfolio.initial_capital,
                    return_pct: valuation.return_pct,
                    alpha: benchmark.alpha,
                }
            })
            .collect())
    }

    /// Portfolios matching all given criteria.
    pub fn screen_portfolios(
        &self,
        owner_id: Option<&str>,
        criteria: &ScreeningCriteria,
    ) -> Result<Vec<ScreenMatch>> {
        let symbol = criteria
            .symbol
            .as_deref()
            .map(normalize_symbol)
            .filter(|s| !s.is_empty());

        Ok(self
            .value_all(owner_id)?
            .into_iter()
            .filter_map(|(portfolio, valuation)| {
                let total = valuation.total_assets_value + valuation.cash_balance;
                let cash_pct = if total > Decimal::ZERO {
                    valuation.cash_balance / total * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                };
                if let Some(min_cash) = criteria.min_cash_pct {
                    if cash_pct < min_cash {
                        return None;
                    }
                }

                let held_quantity = match &symbol {
                    Some(symbol) => Some(valuation.holding(symbol)?.quantity),
                    None => None,
                };

                Some(ScreenMatch {
                    portfolio_id: portfolio.id,
                    name: portfolio.name,
                    cash_pct,
                    held_quantity,
                })
            })
            .collect())
    }

    /// Closed-trade statistics across all portfolios of an owner (or all portfolios).
    pub fn aggregate_trade_performance(&self, owner_id: Option<&str>) -> Result<TradePerformance> {
        let ids: Vec<String> = self
            .portfolio_repository
            .list_portfolios(owner_id)?
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.performance_service.aggregate_trade_performance(&ids)
    }

    /// Valuation, benchmark comparison and risk report of one portfolio.
    pub fn get_snapshot(&self, portfolio_id: &str) -> Result<PortfolioSnapshot> {
        let portfolio = self.portfolio_repository.get_portfolio(portfolio_id)?;
        let valuation = self.valuation_service.value_portfolio(&portfolio)?;
        let benchmark = self
            .benchmark_service
            .compare(valuation.return_pct, portfolio.initial_index);
        let risk = assess_risk(&valuation, &current_settings(&self.settings));
        Ok(PortfolioSnapshot {
            valuation,
            benchmark,
            risk,
        })
    }

    pub fn get_risk_report(&self, portfolio_id: &str) -> Result<RiskReport> {
        let valuation = self.valuation_service.get_valuation(portfolio_id)?;
        Ok(assess_risk(&valuation, &current_settings(&self.settings)))
    }

    pub fn get_insights(&self, portfolio_id: &str) -> Result<Vec<PortfolioInsight>> {
        let valuation = self.valuation_service.get_valuation(portfolio_id)?;
        Ok(portfolio_insights(&valuation, &current_settings(&self.settings)))
    }

    pub fn stress_test(&self, portfolio_id: &str, scenario: &StressScenario) -> Result<StressTestResult> {
        let valuation = self.valuation_service.get_valuation(portfolio_id)?;
        Ok(run_stress_test(&valuation, scenario))
    }

    pub fn get_benchmark(&self, portfolio_id: &str) -> Result<BenchmarkComparison> {
        let portfolio = self.portfolio_repository.get_portfolio(portfolio_id)?;
        let valuation = self.valuation_service.value_portfolio(&portfolio)?;
        Ok(self
            .benchmark_service
            .compare(valuation.return_pct, portfolio.initial_index))
    }
}
