//! Human-readable balance strings.

use govtally_types::{Balance, Network};
use num_bigint::BigUint;
use rust_decimal::Decimal;
use std::str::FromStr;

const SUFFIXES: [(u32, &str); 3] = [(9, "B"), (6, "M"), (3, "K")];

/// Format a raw balance in whole tokens of `network`.
///
/// The fractional part is truncated to `fraction_digits` with trailing zeros
/// dropped. Amounts of a thousand tokens or more are abbreviated with
/// `K`/`M`/`B`. With `with_unit`, the token symbol is appended.
pub fn format_balance(
    amount: &Balance,
    network: Network,
    fraction_digits: u32,
    with_unit: bool,
) -> String {
    let decimals = u32::from(network.token_decimals());
    let ten = BigUint::from(10u32);
    let raw = amount.raw();

    let whole = raw / ten.pow(decimals);
    let (shift, suffix) = SUFFIXES
        .iter()
        .find(|(exp, _)| whole >= ten.pow(*exp))
        .copied()
        .unwrap_or((0, ""));

    let divisor = ten.pow(decimals + shift);
    let int_part = raw / &divisor;
    let frac = (raw % &divisor) * ten.pow(fraction_digits) / &divisor;

    let mut out = int_part.to_string();
    if fraction_digits > 0 {
        let digits = format!("{:0>width$}", frac.to_string(), width = fraction_digits as usize);
        let digits = digits.trim_end_matches('0');
        if !digits.is_empty() {
            out.push('.');
            out.push_str(digits);
        }
    }
    out.push_str(suffix);
    if with_unit {
        out.push(' ');
        out.push_str(network.token_symbol());
    }
    out
}

/// First run of digits (with at most one decimal point) in `text`.
///
/// Any abbreviation suffix after the number is ignored.
pub fn first_number(text: &str) -> Option<Decimal> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let mut seen_dot = false;
    let end = text[start..]
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| start + i)
        .unwrap_or(text.len());
    Decimal::from_str(text[start..end].trim_end_matches('.')).ok()
}
