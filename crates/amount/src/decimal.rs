use crate::{pow10, AmountError};
use alloy_primitives::U256;
use std::{cmp::Ordering, fmt, str::FromStr};

/// Exact non-negative decimal kept as normalized digit strings.
///
/// The integer part has no leading zeros (zero is `"0"`) and the fraction
/// has no trailing zeros, so equal values have equal representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    integer: String,
    fraction: String,
}

impl Decimal {
    /// Build the decimal value of a smallest-unit amount.
    pub fn from_raw(raw: U256, decimals: u8) -> Self {
        let digits = raw.to_string();
        let decimals = usize::from(decimals);
        let (integer, fraction) = if digits.len() > decimals {
            let (integer, fraction) = digits.split_at(digits.len() - decimals);
            (integer.to_string(), fraction.to_string())
        } else {
            ("0".to_string(), format!("{digits:0>decimals$}"))
        };
        Self::normalized(&integer, &fraction)
    }

    /// Number of significant fractional digits.
    pub fn scale(&self) -> usize {
        self.fraction.len()
    }

    /// Smallest-unit integer at `decimals`, or `None` if the value carries
    /// more precision than that or does not fit in 256 bits.
    pub fn to_raw(&self, decimals: u8) -> Option<U256> {
        let decimals = usize::from(decimals);
        if self.scale() > decimals {
            return None;
        }
        let integer = U256::from_str_radix(&self.integer, 10).ok()?;
        let fraction = if self.fraction.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(&self.fraction, 10).ok()?
        };
        let unit = pow10(u32::try_from(decimals).ok()?)?;
        let frac_unit = pow10(u32::try_from(decimals - self.scale()).ok()?)?;
        integer
            .checked_mul(unit)?
            .checked_add(fraction.checked_mul(frac_unit)?)
    }

    fn normalized(integer: &str, fraction: &str) -> Self {
        let integer = integer.trim_start_matches('0');
        Self {
            integer: if integer.is_empty() { "0" } else { integer }.to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
        }
    }
}

impl FromStr for Decimal {
    type Err = AmountError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));

        if integer.is_empty() && fraction.is_empty() {
            return Err(AmountError::invalid(input, "no digits"));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return Err(AmountError::invalid(input, "expected digits with an optional '.'"));
        }

        Ok(Self::normalized(integer, fraction))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(&other.integer))
            // normalized fractions order lexicographically
            .then_with(|| self.fraction.cmp(&other.fraction))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_empty() {
            write!(f, "{}", self.integer)
        } else {
            write!(f, "{}.{}", self.integer, self.fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_normalization() {
        assert_eq!(dec("000.500"), dec(".5"));
        assert_eq!(dec("10").to_string(), "10");
        assert_eq!(dec("0").to_string(), "0");
        assert_eq!(dec("3.").to_string(), "3");
    }

    #[test]
    fn test_ordering() {
        assert!(dec("10") > dec("9.999"));
        assert!(dec("0.5") > dec("0.49"));
        assert!(dec("0.51") > dec("0.5"));
        assert!(dec("1") > dec("0.9"));
        assert_eq!(dec("2.50").cmp(&dec("2.5")), Ordering::Equal);
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(Decimal::from_raw(U256::from(5u8), 3).to_string(), "0.005");
        assert_eq!(Decimal::from_raw(U256::from(5000u16), 3).to_string(), "5");
    }
}
