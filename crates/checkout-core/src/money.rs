//! # Money Module
//!
//! Provides the `Money` type and the `UnitAmount` value object used by the
//! discount allocator.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1000 cents / 3 = 333 cents (×3 = 999 cents)                         │
//! │    We KNOW we lost 1 cent, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Sellable price ──► UnitAmount.base ──► UnitAmount.discounted_amount   │
/// │                                                                         │
/// │  Discount.amount ──► per-item delta ──► UnitAmount discount accumulator│
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Returns the given percentage of this amount, truncating fractional
    /// cents toward zero.
    ///
    /// ## Truncation, Not Rounding
    /// Discount math never rounds up: 333 cents at 50% is 166 cents, not 167.
    /// Downstream totals depend on this exact behavior.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(2500);
    /// assert_eq!(price.percent(10).cents(), 250);
    ///
    /// let odd = Money::from_cents(333);
    /// assert_eq!(odd.percent(50).cents(), 166); // truncated
    /// ```
    pub fn percent(&self, pct: u32) -> Money {
        // Use i128 to prevent overflow on large amounts
        let cents = self.0 as i128 * pct as i128 / 100;
        Money::from_cents(cents as i64)
    }

    /// Splits an order-level amount evenly across `quantity` units,
    /// truncating fractional cents.
    ///
    /// When `quantity` does not divide the amount evenly, the remainder
    /// cents are dropped rather than redistributed. Callers that need
    /// exact totals must account for the shortfall themselves.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let amount = Money::from_cents(1000);
    /// assert_eq!(amount.per_unit(1).cents(), 1000);
    /// assert_eq!(amount.per_unit(3).cents(), 333); // 1 cent dropped overall
    /// ```
    ///
    /// ## Panics
    /// Panics in debug builds if `quantity` is zero; the cart contract
    /// guarantees every line item has quantity >= 1.
    pub fn per_unit(&self, quantity: i64) -> Money {
        debug_assert!(quantity >= 1, "line item quantity must be at least 1");
        Money(self.0 / quantity)
    }
}

// =============================================================================
// UnitAmount
// =============================================================================

/// The discountable per-unit price of a line item.
///
/// ## Structure
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  UnitAmount                                                             │
/// │                                                                         │
/// │  base ──────────── pre-discount unit price, frozen at item creation    │
/// │  raw accumulator ── every applied delta is added here; MAY exceed base │
/// │                                                                         │
/// │  discounts()         = min(raw, base)     exposed discount total       │
/// │  discounted_amount() = max(base - raw, 0) exposed price, never < 0     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Invariants
/// - The raw accumulator is monotonically non-decreasing during a single
///   allocation pass.
/// - `discounted_amount()` never goes below zero; the clamp lives in the
///   accessor, not in `add_discount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitAmount {
    /// Pre-discount unit price, frozen when the line item is created.
    base: Money,
    /// Accumulated raw discount. Can exceed `base`; accessors clamp.
    discounts: Money,
}

impl UnitAmount {
    /// Creates a unit amount with no discounts applied.
    #[inline]
    pub const fn new(base: Money) -> Self {
        UnitAmount {
            base,
            discounts: Money::zero(),
        }
    }

    /// The pre-discount unit price.
    #[inline]
    pub const fn base(&self) -> Money {
        self.base
    }

    /// The exposed discount total, capped at the base price.
    ///
    /// A 2500-cent item hit by 4000 cents of nominal discounts reports
    /// 2500 here, not 4000.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Money, UnitAmount};
    ///
    /// let mut amount = UnitAmount::new(Money::from_cents(2500));
    /// amount.add_discount(Money::from_cents(2000));
    /// amount.add_discount(Money::from_cents(2000));
    ///
    /// assert_eq!(amount.discounts().cents(), 2500);
    /// assert_eq!(amount.discounted_amount().cents(), 0);
    /// ```
    #[inline]
    pub fn discounts(&self) -> Money {
        self.base.min(self.discounts)
    }

    /// The post-discount unit price, floored at zero.
    ///
    /// This is the value the allocator both sorts on and computes
    /// percentage deltas against.
    #[inline]
    pub fn discounted_amount(&self) -> Money {
        (self.base - self.discounts).max(Money::zero())
    }

    /// Adds a discount delta to the raw accumulator.
    ///
    /// The accumulator is allowed to exceed `base`; the exposed values
    /// clamp instead. Deltas are never negative within an allocation pass.
    #[inline]
    pub fn add_discount(&mut self, delta: Money) {
        debug_assert!(!delta.is_negative(), "discount delta must not be negative");
        self.discounts += delta;
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity and participant scaling).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(Money::from_cents(2500).percent(10).cents(), 250);
        assert_eq!(Money::from_cents(2000).percent(50).cents(), 1000);
        // 333 × 50% = 166.5 → truncated to 166, never rounded up
        assert_eq!(Money::from_cents(333).percent(50).cents(), 166);
        assert_eq!(Money::from_cents(0).percent(50).cents(), 0);
        assert_eq!(Money::from_cents(100).percent(0).cents(), 0);
    }

    #[test]
    fn test_per_unit_truncates() {
        assert_eq!(Money::from_cents(1000).per_unit(1).cents(), 1000);
        assert_eq!(Money::from_cents(1000).per_unit(4).cents(), 250);
        // 1000 / 3 = 333.33 → 333 per unit; 1 cent silently under-distributed
        assert_eq!(Money::from_cents(1000).per_unit(3).cents(), 333);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_unit_amount_starts_undiscounted() {
        let amount = UnitAmount::new(Money::from_cents(2500));
        assert_eq!(amount.base().cents(), 2500);
        assert_eq!(amount.discounts().cents(), 0);
        assert_eq!(amount.discounted_amount().cents(), 2500);
    }

    #[test]
    fn test_unit_amount_accumulates() {
        let mut amount = UnitAmount::new(Money::from_cents(2500));
        amount.add_discount(Money::from_cents(1000));

        assert_eq!(amount.discounts().cents(), 1000);
        assert_eq!(amount.discounted_amount().cents(), 1500);

        amount.add_discount(Money::from_cents(500));
        assert_eq!(amount.discounts().cents(), 1500);
        assert_eq!(amount.discounted_amount().cents(), 1000);
    }

    #[test]
    fn test_unit_amount_never_goes_negative() {
        // Raw accumulator exceeds base: exposed values clamp
        let mut amount = UnitAmount::new(Money::from_cents(2500));
        amount.add_discount(Money::from_cents(2000));
        amount.add_discount(Money::from_cents(2000));

        assert_eq!(amount.discounts().cents(), 2500);
        assert_eq!(amount.discounted_amount().cents(), 0);
    }

    /// Critical test: Verify that splitting $10.00 across 3 units loses
    /// 1 cent. This documents the intentional precision loss
    #[test]
    fn test_per_unit_precision_loss_documented() {
        let ten_dollars = Money::from_cents(1000);
        let share = ten_dollars.per_unit(3); // 333 cents
        let reconstructed: Money = share * 3; // 999 cents

        assert_eq!(reconstructed.cents(), 999);
        assert_ne!(reconstructed.cents(), ten_dollars.cents());

        // Document: 1 cent was lost
        let lost = ten_dollars - reconstructed;
        assert_eq!(lost.cents(), 1);
    }
}
