//! # checkout-core: Pure Business Logic for the Checkout Platform
//!
//! This crate is the **heart** of the Checkout Platform. It contains all
//! discount and cart business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Platform Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront / Admin Surface                     │   │
//! │  │    Cart UI ──► Discount code entry ──► Checkout UI             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ discount  │  │adjustments│  │   │
//! │  │   │   Money   │  │   Cart    │  │ Discount  │  │ allocator │  │   │
//! │  │   │UnitAmount │  │ CartItem  │  │   Kind    │  │   pass    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 checkout-db (future crate)                      │   │
//! │  │       Discount lookup, cart persistence, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type and the discountable unit amount (no floating point!)
//! - [`cart`] - Cart, line items and the item contract the allocator consumes
//! - [`discount`] - Discount records and the provider contract
//! - [`adjustments`] - The discount allocation pass
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::adjustments::calculate_adjustments;
//! use checkout_core::cart::{Cart, CartItem, Sellable};
//! use checkout_core::discount::{AppliesTo, Discount};
//! use checkout_core::money::Money;
//!
//! let sellable = Sellable {
//!     id: "s-1".to_string(),
//!     sku: "ROOM-A".to_string(),
//!     name: "Escape Room A".to_string(),
//!     participants: None,
//! };
//!
//! let mut cart = Cart::new("cart-1");
//! cart.upsert_item(CartItem::new(sellable, "item-0", Money::from_cents(2500), 1).unwrap())
//!     .unwrap();
//!
//! // $10.00 off the order, applied to the line's unit amount
//! let discount = Discount::amount_off("TESTCODE", Money::from_cents(1000), AppliesTo::Order);
//! calculate_adjustments(&mut cart.items, &[discount]);
//!
//! assert_eq!(cart.discounted_total().cents(), 1500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustments;
pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Money` instead of
// `use checkout_core::money::Money`

pub use adjustments::{apply_cart_discounts, calculate_adjustments};
pub use cart::{Cart, CartItem, CartTotals, DiscountableItem, Sellable};
pub use discount::{AppliesTo, Discount, DiscountKind, DiscountSource};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, UnitAmount};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-tenant in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
/// Configurable per-tenant in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum discount percentage
///
/// ## Business Reason
/// A percent-off discount is a share of the unit price; anything above
/// 100 would drive the discounted amount negative.
pub const MAX_PERCENT: u32 = 100;
