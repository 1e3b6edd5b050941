/// Tehran Stock Exchange market segment label.
pub const MARKET_TSE: &str = "TSE";

/// Iran Fara Bourse market segment label.
pub const MARKET_IFB: &str = "IFB";
