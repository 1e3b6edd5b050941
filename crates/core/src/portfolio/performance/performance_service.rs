use std::sync::Arc;

use log::{debug, error};

use super::equity_curve::calculate_equity_metrics;
use super::performance_model::{EquityCurveMetrics, TradePerformance};
use super::performance_traits::{EquityHistoryRepositoryTrait, PerformanceServiceTrait};
use super::trade_performance::{build_trade_performance, extract_closed_trades};
use crate::errors::Result;
use crate::settings::{current_settings, SharedSettings};
use crate::transactions::TransactionRepositoryTrait;

pub struct PerformanceService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    equity_history_repository: Arc<dyn EquityHistoryRepositoryTrait>,
    settings: SharedSettings,
}

impl PerformanceService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        equity_history_repository: Arc<dyn EquityHistoryRepositoryTrait>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            transaction_repository,
            equity_history_repository,
            settings,
        }
    }
}

impl PerformanceServiceTrait for PerformanceService {
    fn get_trade_performance(&self, portfolio_id: &str) -> Result<TradePerformance> {
        debug!("Calculating trade performance for portfolio {}", portfolio_id);
        let ledger = self.transaction_repository.get_ledger(portfolio_id)?;
        let sentinel = current_settings(&self.settings).profit_factor_sentinel;
        Ok(build_trade_performance(extract_closed_trades(&ledger), sentinel))
    }

    fn aggregate_trade_performance(&self, portfolio_ids: &[String]) -> Result<TradePerformance> {
        let mut trades = Vec::new();
        for portfolio_id in portfolio_ids {
            match self.transaction_repository.get_ledger(portfolio_id) {
                Ok(ledger) => trades.extend(extract_closed_trades(&ledger)),
                Err(e) => error!(
                    "Skipping portfolio {} in trade aggregate: {}",
                    portfolio_id, e
                ),
            }
        }
        // Stable: same-day trades keep portfolio then ledger order.
        trades.sort_by_key(|t| t.date);

        let sentinel = current_settings(&self.settings).profit_factor_sentinel;
        Ok(build_trade_performance(trades, sentinel))
    }

    fn get_equity_metrics(&self, portfolio_id: &str) -> Result<EquityCurveMetrics> {
        let settings = current_settings(&self.settings);
        let history = match self.equity_history_repository.get_equity_history(portfolio_id) {
            Ok(history) => history,
            Err(e) => {
                error!(
                    "Failed to load equity history for portfolio {}: {}",
                    portfolio_id, e
                );
                return Ok(EquityCurveMetrics::default());
            }
        };

        Ok(calculate_equity_metrics(
            &history,
            settings.trading_days_per_year,
            settings.risk_free_rate,
        ))
    }
}
