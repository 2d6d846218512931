//! # Money Module
//!
//! Provides the `Money` type for listing prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Fen (1 yuan = 100 fen)                           │
//! │    ¥25.50 is stored as 2550, exactly                                    │
//! │    The schema column is DECIMAL(10,2), so two places are all we need    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use unitrade_core::money::Money;
//!
//! let price = Money::from_yuan(600);
//! assert_eq!(price.fen(), 60_000);
//! assert_eq!(price.to_string(), "¥600");
//!
//! let parsed = Money::parse("price", "25.5").unwrap();
//! assert_eq!(parsed.to_string(), "¥25.50");
//! assert_eq!(parsed.to_decimal_string(), "25.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in fen (the smallest CNY unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (savings) can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from fen.
    #[inline]
    pub const fn from_fen(fen: i64) -> Self {
        Money(fen)
    }

    /// Creates a Money value from whole yuan.
    ///
    /// ## Example
    /// ```rust
    /// use unitrade_core::money::Money;
    ///
    /// assert_eq!(Money::from_yuan(3200).fen(), 320_000);
    /// ```
    #[inline]
    pub const fn from_yuan(yuan: i64) -> Self {
        Money(yuan * 100)
    }

    /// Returns the value in fen.
    #[inline]
    pub const fn fen(&self) -> i64 {
        self.0
    }

    /// Returns the whole-yuan portion (truncated toward zero).
    #[inline]
    pub const fn yuan(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fen portion (always 0-99).
    #[inline]
    pub const fn fen_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// How much a buyer saves against the original price, if anything.
    ///
    /// ## Example
    /// ```rust
    /// use unitrade_core::money::Money;
    ///
    /// let price = Money::from_yuan(600);
    /// assert_eq!(price.savings_from(Money::from_yuan(1200)), Some(Money::from_yuan(600)));
    /// assert_eq!(price.savings_from(Money::zero()), None);
    /// ```
    pub fn savings_from(&self, original: Money) -> Option<Money> {
        (original.0 > self.0).then(|| Money(original.0 - self.0))
    }

    /// Renders the amount the way a `DECIMAL(10,2)` literal is written.
    ///
    /// ```rust
    /// use unitrade_core::money::Money;
    ///
    /// assert_eq!(Money::from_yuan(3200).to_decimal_string(), "3200.00");
    /// assert_eq!(Money::from_fen(-550).to_decimal_string(), "-5.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.yuan().abs(), self.fen_part())
    }

    /// Parses user input such as `600`, `25.5`, `¥25.50`.
    ///
    /// ## Rules
    /// - An optional `¥`/`￥` prefix is accepted
    /// - At most two decimal places
    /// - `field` names the input in the returned error
    ///
    /// Blank input is reported as `InvalidFormat`; callers that treat a
    /// blank field as "absent" check for that before parsing.
    pub fn parse(field: &str, input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        let text = text
            .strip_prefix('¥')
            .or_else(|| text.strip_prefix('￥'))
            .unwrap_or(text)
            .trim();

        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number such as 600 or 25.50"));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let too_large = || invalid("amount is too large");
        let yuan: i64 = whole.parse().map_err(|_| too_large())?;
        let fen: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => frac.parse().map_err(|_| too_large())?,
        };

        let total = yuan
            .checked_mul(100)
            .and_then(|v| v.checked_add(fen))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows whole yuan without decimals (`¥3200`), otherwise two places.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.fen_part() == 0 {
            write!(f, "{}¥{}", sign, self.yuan().abs())
        } else {
            write!(f, "{}¥{}.{:02}", sign, self.yuan().abs(), self.fen_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
