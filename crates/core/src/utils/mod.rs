pub mod input_utils;

pub use input_utils::{normalize_symbol, parse_ledger_number};
