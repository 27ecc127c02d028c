//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing ingredient costs as floats:                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ CMV drifts per ingredient        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    10 + 20 = 30 centavos, exactly, every time                           │
//! │                                                                         │
//! │  Floats only appear where the result is a ratio (margin %, average     │
//! │  contribution margin) and never feed back into a stored amount.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! let price = Money::from_cents(2590); // R$ 25,90
//! let cmv = Money::from_cents(980);
//!
//! let profit = price - cmv;
//! assert_eq!(profit.cents(), 1610);
//!
//! // Price sensitivity: +10%
//! assert_eq!(price.scale(1.1).cents(), 2849);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for losses and negative margins
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: serialises as the bare centavo count
///
/// ## Where Money is Used
/// ```text
/// Ingredient.cost ──► Σ ──► Product.cmv ──┐
///                                         ├──► unit profit ──► break-even
/// Product.price ─────────────────────────┘
///
/// GlobalFixedCost.amount ──► Σ active ──► fixed costs ──► break-even
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // R$ 10,99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let loss = Money::from_major_minor(-5, 50); // -R$ 5,50
    /// assert_eq!(loss.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in centavos as `f64`, for ratio math.
    #[inline]
    pub fn cents_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_margin = Money::from_cents(1200);
    /// // 50 burgers a day for 30 days
    /// assert_eq!(unit_margin.multiply_quantity(50 * 30).cents(), 1_800_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Scales the amount by a factor, rounding to the nearest centavo
    /// (half away from zero).
    ///
    /// A non-finite factor yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(2000);
    /// assert_eq!(price.scale(1.25).cents(), 2500);
    /// assert_eq!(price.scale(0.7).cents(), 1400);
    /// assert_eq!(Money::from_cents(5).scale(0.5).cents(), 3);
    /// ```
    pub fn scale(&self, factor: f64) -> Money {
        let scaled = self.0 as f64 * factor;
        if !scaled.is_finite() {
            return Money::zero();
        }
        // `as` saturates on overflow
        Money(scaled.round() as i64)
    }

    /// Expresses `self` as a percentage of `whole`.
    ///
    /// Returns 0 when `whole` is zero or negative, so a product priced at
    /// zero has a 0% margin instead of `NaN`.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let profit = Money::from_cents(1200);
    /// assert_eq!(profit.percent_of(Money::from_cents(2000)), 60.0);
    /// assert_eq!(profit.percent_of(Money::zero()), 0.0);
    /// ```
    pub fn percent_of(&self, whole: Money) -> f64 {
        if !whole.is_positive() {
            return 0.0;
        }
        crate::finite_or_zero(self.0 as f64 * 100.0 / whole.0 as f64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
// Arithmetic saturates at the i64 bounds, like `multiply_quantity`.

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The frontend formats with `pt-BR`
/// locale rules (comma decimal separator).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {}.{:02}",
            sign,
            self.reais().abs(),
            self.cents_part()
        )
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by i64 (volumes, days).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Summing an iterator of Money (ingredient lists, cost lists).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
