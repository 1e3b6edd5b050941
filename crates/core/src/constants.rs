use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Residual quantity at or below which a position is treated as closed.
pub const QUANTITY_THRESHOLD: Decimal = dec!(0.001);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Trading sessions per year on the home exchange.
pub const TRADING_DAYS_PER_YEAR: u32 = 242;

/// Annual risk-free rate used by the Sharpe ratio (as a fraction).
pub const RISK_FREE_RATE: Decimal = dec!(0.25);

/// Reported profit factor when there are gains but no losses.
pub const PROFIT_FACTOR_SENTINEL: Decimal = dec!(999);

/// Single-holding share of NAV (percent) above which a concentration alert fires.
pub const CONCENTRATION_THRESHOLD_PCT: Decimal = dec!(25);

/// Cash share of NAV (percent) above which a cash-drag alert fires.
pub const CASH_DRAG_THRESHOLD_PCT: Decimal = dec!(30);

/// Cash share of NAV (percent) below which the low-cash insight fires.
pub const LOW_CASH_THRESHOLD_PCT: Decimal = dec!(2);

/// Alignment score below which the model-drift insight fires.
pub const ALIGNMENT_WARNING_THRESHOLD: Decimal = dec!(50);

/// Relative distance to a price level that counts as "near" (2%).
pub const CONSTITUENT_PROXIMITY: Decimal = dec!(0.02);

/// Label used for cash-only ledger entries.
pub const CASH_ASSET_CLASS: &str = "Cash";

/// Sector label used for cash-only ledger entries.
pub const CASH_SECTOR: &str = "Bank";

/// Sector label when the quote carries none.
pub const UNKNOWN_SECTOR: &str = "Unknown";
