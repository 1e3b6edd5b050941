use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio return against the benchmark index since inception.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub initial_index: Decimal,
    pub current_index: Decimal,
    pub index_return_pct: Decimal,
    pub portfolio_return_pct: Decimal,
    /// Portfolio return minus index return, in percentage points.
    pub alpha: Decimal,
}
