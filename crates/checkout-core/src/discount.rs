//! # Discount Types
//!
//! Discount records and the provider contract that supplies them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Discount Types                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │  DiscountKind   │   │   AppliesTo     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  AmountOff($)   │   │  Order          │       │
//! │  │  code (business)│   │  PercentOff(%)  │   │  Participant    │       │
//! │  │  kind           │   └─────────────────┘   └─────────────────┘       │
//! │  │  applies_to     │                                                   │
//! │  │  max_usage      │   ┌─────────────────┐                             │
//! │  │  expires_at     │   │ DiscountSource  │  provider contract          │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every discount has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `code`: business key - human-readable, what the shopper types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_discount_amount, validate_percent};

// =============================================================================
// Applies To
// =============================================================================

/// The unit basis of a fixed-amount discount.
///
/// Only meaningful for `DiscountKind::AmountOff`; percentage discounts are
/// computed against the unit price and ignore this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AppliesTo {
    /// The amount applies once per order line, split across its units.
    Order,
    /// The amount applies once per participant of the booked sellable.
    Participant,
}

// =============================================================================
// Discount Kind
// =============================================================================

/// A discount is either a fixed amount off or a percentage off.
///
/// ## Why a Tagged Variant?
/// Storage keeps two columns (`amount_cents`, `percent`) that are mutually
/// exclusive by construction. Converting to this enum at the loading
/// boundary means the allocator never branches on "is percent zero".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Fixed amount off, in cents. Scoped by [`AppliesTo`].
    AmountOff(Money),
    /// Percentage off the current discounted unit price (0-100).
    PercentOff(u32),
}

impl DiscountKind {
    /// Converts the stored `(amount_cents, percent)` column pair into a
    /// tagged variant.
    ///
    /// ## Rules
    /// - Exactly one of the two must be set; both or neither is rejected
    /// - A set amount must be positive
    /// - A set percent must be between 1 and 100
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::discount::DiscountKind;
    ///
    /// assert!(DiscountKind::from_parts(1000, 0).is_ok());
    /// assert!(DiscountKind::from_parts(0, 25).is_ok());
    /// assert!(DiscountKind::from_parts(1000, 25).is_err()); // both set
    /// assert!(DiscountKind::from_parts(0, 0).is_err());     // neither set
    /// ```
    pub fn from_parts(amount_cents: i64, percent: u32) -> Result<Self, ValidationError> {
        match (amount_cents != 0, percent != 0) {
            (true, true) => Err(ValidationError::MutuallyExclusive {
                first: "amount".to_string(),
                second: "percent".to_string(),
            }),
            (false, false) => Err(ValidationError::Required {
                field: "discount value".to_string(),
            }),
            (true, false) => {
                validate_discount_amount(amount_cents)?;
                Ok(DiscountKind::AmountOff(Money::from_cents(amount_cents)))
            }
            (false, true) => {
                validate_percent(percent)?;
                Ok(DiscountKind::PercentOff(percent))
            }
        }
    }

    /// Checks if this is a fixed amount-off discount.
    ///
    /// Amount-off discounts sort ahead of percent-off discounts during
    /// allocation.
    #[inline]
    pub const fn is_amount_off(&self) -> bool {
        matches!(self, DiscountKind::AmountOff(_))
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount record attached to a cart.
///
/// The allocator treats these as read-only input: it reads `kind`,
/// `applies_to` and `max_usage` and never touches the lifecycle fields.
/// Expiry and attachment filtering happen in the [`DiscountSource`]
/// collaborator before records reach the allocator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business code the shopper types ("SPRING20").
    pub code: String,

    /// Amount off or percent off.
    pub kind: DiscountKind,

    /// Unit basis for a fixed amount (once per order line vs. per participant).
    pub applies_to: AppliesTo,

    /// Cap on how many distinct line items this record may affect.
    pub max_usage: i64,

    /// Whether the discount attaches to carts without a code being entered.
    pub auto_apply: bool,

    /// When the discount stops being applicable. `None` means no expiry.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Discount {
    /// Creates a fixed amount-off discount with defaults for the
    /// lifecycle fields (max_usage 1, no expiry, not auto-applied).
    pub fn amount_off(code: impl Into<String>, amount: Money, applies_to: AppliesTo) -> Self {
        Discount {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.into(),
            kind: DiscountKind::AmountOff(amount),
            applies_to,
            max_usage: 1,
            auto_apply: false,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a percent-off discount with the same defaults.
    ///
    /// Percent discounts are scoped to the order line; the scope field is
    /// carried for storage parity but never read for them.
    pub fn percent_off(code: impl Into<String>, percent: u32) -> Self {
        Discount {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.into(),
            kind: DiscountKind::PercentOff(percent),
            applies_to: AppliesTo::Order,
            max_usage: 1,
            auto_apply: false,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the discount is applicable at `now`.
    ///
    /// Used by providers when filtering a cart's attached discounts; the
    /// allocator itself never consults the clock.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }
}

// =============================================================================
// Discount Source
// =============================================================================

/// Supplies the discounts currently active and attached to a cart.
///
/// ## Contract
/// Implementations filter for expiry and attachment; the allocator applies
/// whatever it is handed. The persistence layer implements this against the
/// database; tests implement it in memory.
pub trait DiscountSource {
    /// Returns the active discounts attached to the given cart, in
    /// attachment order.
    fn discounts_for_cart(&self, cart_id: &str) -> Vec<Discount>;
}

// =============================================================================
// Unit Tests
// =============================================================================
