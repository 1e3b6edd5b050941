//! Transaction type labels as stored in the ledger.

/// Purchase of a security. Decreases cash, increases quantity and cost basis.
pub const TRANSACTION_TYPE_BUY: &str = "buy";

/// Disposal of a security. Increases cash, releases cost at the average cost.
pub const TRANSACTION_TYPE_SELL: &str = "sell";

/// External funds paid in. Increases cash and net contribution.
pub const TRANSACTION_TYPE_DEPOSIT: &str = "deposit";

/// Funds paid out. Decreases cash and net contribution.
pub const TRANSACTION_TYPE_WITHDRAW: &str = "withdraw";

/// Cash dividend. Increases cash only.
pub const TRANSACTION_TYPE_DIVIDEND: &str = "dividend";
