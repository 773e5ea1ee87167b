//! # Money Module
//!
//! Provides the `Money` type for shelf prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" ──parse──► 999 cents ──store──► 999 ──display──► "$9.99"     │
//! │                                                                         │
//! │  A price never passes through f64 on its way in or out.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//! assert_eq!(price.to_string(), "$9.99");
//! assert_eq!(price.to_decimal_string(), "9.99");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A shelf price held as whole cents.
///
/// Signed so that parsing can report negative input as a validation error
/// instead of failing to represent it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Sign, whole units and the two-digit remainder.
    fn parts(&self) -> (&'static str, u64, u64) {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        (sign, abs / 100, abs % 100)
    }

    /// Plain two-place decimal without the currency symbol.
    ///
    /// Used where the operator is expected to type the value back in
    /// (e.g. "current price" prompts).
    pub fn to_decimal_string(&self) -> String {
        let (sign, whole, frac) = self.parts();
        format!("{sign}{whole}.{frac:02}")
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal price as typed by an operator.
///
/// ## Accepted Forms
/// ```text
/// "10"      → 1000
/// "9.99"    → 999
/// "9,99"    → 999   (comma decimal separator)
/// "$10.5"   → 1050  (leading currency symbol)
/// "-1.25"   → -125  (sign is kept; rejecting it is validation's job)
/// "1.999"   → error (more than two decimals)
/// "abc"     → error
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::invalid_number("price", input.trim());

        let mut text = input.trim();
        let negative = match text.strip_prefix('-') {
            Some(rest) => {
                text = rest;
                true
            }
            None => false,
        };
        text = text.strip_prefix('$').unwrap_or(text).trim_start();

        let normalized = text.replace(',', ".");
        let (major_str, minor_str) = match normalized.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (normalized.as_str(), ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid());
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if minor_str.len() > 2 {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "at most two decimal places".to_string(),
            });
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_str.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Display
// =============================================================================

/// Shows money as `$12.34`, the format used in listings and exports.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, whole, frac) = self.parts();
        write!(f, "{sign}${whole}.{frac:02}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(999).to_decimal_string(), "9.99");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(i64::MIN).to_decimal_string(), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("9,99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("$10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!(" 0.07 ".parse::<Money>().unwrap().cents(), 7);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "abc", "1.2.3", "1e3", ".", "$", "99999999999999999999"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?}");
        }
        assert!(matches!(
            "1.999".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_sign_checks() {
        assert!(!Money::ZERO.is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::ZERO);
    }
}
