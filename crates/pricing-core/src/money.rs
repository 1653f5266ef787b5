//! # Money Module
//!
//! Provides the `Money` type used for every price, fee and discount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing twelve months of €14.99 in f64 does not give exactly €179.88. │
//! │  A yearly total that is off by a fraction of a cent breaks equality    │
//! │  checks between the timeline and the summary.                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1499 cents × 12 = 17988 cents, always                               │
//! │    Percentages are basis points, rounded once per discount             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//!
//! let internet = Money::from_cents(5900); // €59.00
//! let mobile = Money::from_cents(2200);   // €22.00
//! let base = internet + mobile;
//! assert_eq!(base.cents(), 8100);
//!
//! // 10% of the bundle base price
//! assert_eq!(base.percentage_bps(1000).cents(), 810);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use ts_rs::TS;

/// Basis points in one hundred percent.
pub const BPS_PER_UNIT: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: a stack of discounts may exceed the base price, and
///   the resulting negative monthly total must stay representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"base_price": 8100}`
///
/// ## Where Money Flows
/// ```text
/// Product.monthly_price_cents ──► base price ──► discount amounts
///                                      │                │
///                                      ▼                ▼
///                               MonthlyBreakdown ◄──────┘
///                                      │
///                                      ▼
///                               PricingSummary
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let fee = Money::from_cents(3900); // €39.00
    /// assert_eq!(fee.cents(), 3900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Computes a share of this amount expressed in basis points.
    ///
    /// ## Rounding
    /// Integer math with an i128 intermediate, rounded half away from zero
    /// to the cent: `(cents × bps ± 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let base = Money::from_cents(9599); // €95.99
    /// // 15% = €14.3985 → €14.40
    /// assert_eq!(base.percentage_bps(1500).cents(), 1440);
    /// ```
    pub fn percentage_bps(&self, bps: i64) -> Money {
        let product = self.0 as i128 * bps as i128;
        let half = (BPS_PER_UNIT / 2) as i128;
        let rounded = if product >= 0 {
            (product + half) / BPS_PER_UNIT as i128
        } else {
            (product - half) / BPS_PER_UNIT as i128
        };
        // Saturate rather than wrap on absurd catalog values.
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128);
        Money(clamped as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders euro amounts for logs and the text report.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
