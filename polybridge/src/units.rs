//! Exact conversion between human amounts and raw token units.
//!
//! Both directions stay in integer arithmetic on [`U256`], so `0.1` with
//! 18 decimals is `100000000000000000` and converts back to `0.1`.

use alloy::primitives::U256;
use alloy::primitives::utils::parse_units;
use thiserror::Error;

/// Largest decimals value whose scale `10^d` still fits a `U256`.
pub const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount `{0}` is negative")]
    Negative(String),

    #[error("amount `{amount}` has more than {decimals} fractional digits")]
    TooPrecise { amount: String, decimals: u8 },

    #[error("token decimals {0} exceed 77")]
    Decimals(u8),

    #[error("amount `{amount}` is not a decimal number: {reason}")]
    Malformed { amount: String, reason: String },
}

/// `amount * 10^decimals` as an integer, rejecting anything that would
/// need rounding.
pub fn to_raw(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let s = amount.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    if s.starts_with('-') {
        return Err(AmountError::Negative(s.to_string()));
    }
    if decimals > MAX_DECIMALS {
        return Err(AmountError::Decimals(decimals));
    }
    // trailing fractional zeros never need rounding
    let exact = match s.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.len() > decimals as usize {
                return Err(AmountError::TooPrecise {
                    amount: s.to_string(),
                    decimals,
                });
            }
            match (whole.is_empty(), frac.is_empty()) {
                (true, true) => "0".to_string(),
                (_, true) => whole.to_string(),
                _ => format!("{whole}.{frac}"),
            }
        }
        None => s.to_string(),
    };
    let parsed = parse_units(&exact, decimals).map_err(|e| AmountError::Malformed {
        amount: s.to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed.into())
}

/// `raw / 10^decimals` rendered without trailing fractional zeros.
pub fn to_display(raw: U256, decimals: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = raw / base;
    let frac = raw % base;
    if frac.is_zero() {
        return format!("{whole}");
    }
    let digits = frac.to_string();
    let mut frac_str = "0".repeat(decimals as usize - digits.len());
    frac_str.push_str(&digits);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}
