//! Helpers for turning user-entered text into ledger values.

use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a user-entered number, tolerating thousands separators, Persian and
/// Arabic-Indic digits and scientific notation.
///
/// Returns `None` when the text is empty or not a number; callers skip the
/// offending row instead of substituting zero.
pub fn parse_ledger_number(value_str: &str, field_name: &str) -> Option<Decimal> {
    let cleaned: String = value_str
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '٬' && !c.is_whitespace())
        .map(latin_digit)
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    match Decimal::from_str(&cleaned) {
        Ok(d) => Some(d),
        Err(e_decimal) => match Decimal::from_scientific(&cleaned) {
            Ok(d) => Some(d),
            Err(e_scientific) => {
                warn!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}). Row skipped.",
                    field_name, value_str, e_decimal, e_scientific
                );
                None
            }
        },
    }
}

fn latin_digit(c: char) -> char {
    match c {
        '۰'..='۹' => char::from_digit(c as u32 - '۰' as u32, 10).unwrap_or(c),
        '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10).unwrap_or(c),
        '٫' => '.',
        _ => c,
    }
}

/// Canonical form of a ticker symbol: Arabic kaf/yeh folded to their Persian
/// forms and surrounding whitespace removed, so one instrument never appears
/// under two spellings in a ledger.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .map(|c| match c {
            'ك' => 'ک',
            'ي' | 'ى' => 'ی',
            _ => c,
        })
        .collect()
}
