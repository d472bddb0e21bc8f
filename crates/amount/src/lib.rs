//! Conversion between smallest-unit token amounts and human decimal strings.
//!
//! Token amounts live on the ledger as integers scaled by `10^decimals`.
//! Everything here is exact: values are carried as [`U256`] or as digit
//! strings, never as floating point.

mod decimal;

pub use decimal::Decimal;

use alloy_primitives::{utils::format_units, U256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input is not a well-formed non-negative decimal for the token.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },
}

impl AmountError {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidAmount {
            input: input.to_string(),
            reason,
        }
    }
}

/// `10^exp`, or `None` if it does not fit in 256 bits.
pub fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// Render a smallest-unit amount as a decimal string.
///
/// Trailing fractional zeros are dropped and whole values carry no `.`:
/// `to_display(U256::from(1_500_000), 6) == "1.5"`.
pub fn to_display(raw: U256, decimals: u8) -> String {
    match format_units(raw, decimals) {
        Ok(text) => trim_fraction(&text),
        // exponent beyond what alloy's units support
        Err(_) => Decimal::from_raw(raw, decimals).to_string(),
    }
}

fn trim_fraction(text: &str) -> String {
    let Some((integer, fraction)) = text.split_once('.') else {
        return text.to_string();
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Parse a decimal string into its smallest-unit integer.
///
/// Fails when the text is malformed, carries more significant fractional
/// digits than `decimals`, or overflows 256 bits.
pub fn to_raw(text: &str, decimals: u8) -> Result<U256, AmountError> {
    let value: Decimal = text.parse()?;
    value.to_raw(decimals).ok_or_else(|| {
        if value.scale() > usize::from(decimals) {
            AmountError::invalid(text, "more fractional digits than the token supports")
        } else {
            AmountError::invalid(text, "amount does not fit in 256 bits")
        }
    })
}

/// Whether `amount` is strictly greater than the smallest-unit `raw` value.
///
/// The comparison is exact and independent of the token's precision.
/// Unparseable input never exceeds anything.
pub fn exceeds(amount: &str, raw: U256, decimals: u8) -> bool {
    amount
        .parse::<Decimal>()
        .is_ok_and(|value| value > Decimal::from_raw(raw, decimals))
}

/// Render `raw` with exactly `places` fractional digits, rounding half up.
pub fn to_fixed(raw: U256, decimals: u8, places: u8) -> String {
    let scaled = if decimals > places {
        match pow10(u32::from(decimals - places)) {
            Some(divisor) => {
                let quotient = raw / divisor;
                let remainder = raw % divisor;
                if remainder >= divisor - remainder {
                    quotient + U256::from(1u8)
                } else {
                    quotient
                }
            }
            None => U256::ZERO,
        }
    } else {
        pow10(u32::from(places - decimals))
            .map_or(U256::MAX, |factor| raw.saturating_mul(factor))
    };

    let places = usize::from(places);
    let digits = scaled.to_string();
    let digits = format!("{digits:0>width$}", width = places + 1);
    if places == 0 {
        return digits;
    }
    let (integer, fraction) = digits.split_at(digits.len() - places);
    format!("{integer}.{fraction}")
}

/// Re-express `raw` (scaled by `from` decimals) at a wider `to` exponent.
///
/// Returns `None` when `to < from` or the result overflows.
pub fn rescale(raw: U256, from: u8, to: u8) -> Option<U256> {
    let shift = to.checked_sub(from)?;
    raw.checked_mul(pow10(u32::from(shift))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_to_display() {
        assert_eq!(to_display(U256::ZERO, 18), "0");
        assert_eq!(to_display(units(100_000_000), 6), "100");
        assert_eq!(to_display(units(1_500_000), 6), "1.5");
        assert_eq!(to_display(units(1), 6), "0.000001");
        assert_eq!(to_display(units(42), 0), "42");
        assert_eq!(to_display(units(10_000_000), 6), "10");
        assert_eq!(
            to_display(units(123_456_789_000_000_000_000), 18),
            "123.456789"
        );
    }

    #[test]
    fn test_to_display_beyond_unit_range() {
        assert_eq!(to_display(units(5), 80), format!("0.{}5", "0".repeat(79)));
    }

    #[test]
    fn test_to_display_exceeds_float_precision() {
        let raw = U256::MAX;
        assert_eq!(
            to_display(raw, 18),
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
    }

    #[test]
    fn test_to_raw() {
        assert_eq!(to_raw("100", 18).unwrap(), units(100_000_000_000_000_000_000));
        assert_eq!(to_raw("1.5", 6).unwrap(), units(1_500_000));
        assert_eq!(to_raw(".5", 6).unwrap(), units(500_000));
        assert_eq!(to_raw("5.", 6).unwrap(), units(5_000_000));
        assert_eq!(to_raw(" 2 ", 0).unwrap(), units(2));
        assert_eq!(to_raw("0.100000000", 6).unwrap(), units(100_000));
    }

    #[test]
    fn test_to_raw_rejects_malformed() {
        for input in ["", " ", ".", "-1", "+1", "1e3", "1,000", "1.2.3", "abc", "0x10"] {
            let err = to_raw(input, 6).unwrap_err();
            assert!(
                matches!(err, AmountError::InvalidAmount { .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_raw_rejects_excess_precision() {
        let err = to_raw("0.0000001", 6).unwrap_err();
        assert_eq!(
            err,
            AmountError::InvalidAmount {
                input: "0.0000001".to_string(),
                reason: "more fractional digits than the token supports",
            }
        );
    }

    #[test]
    fn test_to_raw_rejects_overflow() {
        let huge = "1".repeat(80);
        assert!(to_raw(&huge, 0).is_err());
    }

    #[test]
    fn test_round_trip_normalizes() {
        let cases = [
            ("1.50", 6, "1.5"),
            ("007", 18, "7"),
            ("0.000", 2, "0"),
            ("123456789.123456789", 18, "123456789.123456789"),
        ];
        for (input, decimals, expected) in cases {
            let raw = to_raw(input, decimals).unwrap();
            assert_eq!(to_display(raw, decimals), expected, "{input}");
        }
    }

    #[test]
    fn test_exceeds_boundaries() {
        let balance = to_raw("100", 18).unwrap();
        assert!(!exceeds("10", balance, 18));
        assert!(!exceeds("100", balance, 18));
        assert!(!exceeds("100.000", balance, 18));
        assert!(exceeds("100.000000000000000001", balance, 18));
        assert!(exceeds("150", balance, 18));
        // finer than the token's precision still compares exactly
        assert!(exceeds("100.0000000000000000001", balance, 18));
    }

    #[test]
    fn test_exceeds_ignores_invalid_input() {
        assert!(!exceeds("", U256::ZERO, 6));
        assert!(!exceeds("abc", U256::ZERO, 6));
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(U256::ZERO, 18, 2), "0.00");
        assert_eq!(to_fixed(units(1_234_999), 6, 2), "1.23");
        assert_eq!(to_fixed(units(1_235_000), 6, 2), "1.24");
        assert_eq!(to_fixed(units(5), 0, 2), "5.00");
        assert_eq!(to_fixed(units(5), 1, 0), "1");
        assert_eq!(to_fixed(units(4), 1, 0), "0");
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(units(15), 1, 3), Some(units(1500)));
        assert_eq!(rescale(units(15), 3, 1), None);
        assert_eq!(rescale(U256::MAX, 0, 1), None);
    }
}
