//! # Cart Types
//!
//! Line items, the cart they live in, and the item contract the discount
//! allocator consumes.
//!
//! ## Cart Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Cart Operation          State Change          │
//! │  ─────────────            ──────────────          ────────────          │
//! │                                                                         │
//! │  Add booking ────────────► upsert_item() ───────► items.push(item)     │
//! │                                                                         │
//! │  Re-add same slot ───────► upsert_item() ───────► items[i] = item      │
//! │                                                                         │
//! │  Apply discounts ────────► calculate_adjustments ► unit_amount mutated  │
//! │                                                                         │
//! │  Read totals ────────────► discounts_total() ───► (read only)          │
//! │                                                                         │
//! │  NOTE: the allocator mutates unit amounts in place and never adds,     │
//! │        removes or reorders items.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, UnitAmount};
use crate::validation::validate_quantity;
use crate::MAX_CART_ITEMS;

// =============================================================================
// Sellable
// =============================================================================

/// Frozen snapshot of the thing being purchased.
///
/// ## Participant Capability
/// A booking-style sellable exposes how many participants it covers; retail
/// sellables do not. The capability is an explicit `Option`, not a runtime
/// type check: participant-scoped discounts read it and no-op when absent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sellable {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier for the sellable.
    pub sku: String,

    /// Display name shown in the cart and on receipts.
    pub name: String,

    /// Participant count for booking-style sellables, `None` otherwise.
    pub participants: Option<i64>,
}

// =============================================================================
// Discountable Item Contract
// =============================================================================

/// The line-item contract the discount allocator consumes.
///
/// ## Contract
/// - `quantity()` is at least 1; the cart enforces this on insert
/// - `unit_amount_mut()` is the only mutation the allocator performs
/// - `participants()` reports the sellable's participant capability
///
/// The concrete [`CartItem`] implements this; tests may substitute an
/// in-memory double.
pub trait DiscountableItem {
    /// Number of units represented by this line item (>= 1).
    fn quantity(&self) -> i64;

    /// The per-unit amount (base price plus accumulated discounts).
    fn unit_amount(&self) -> &UnitAmount;

    /// Mutable access for the allocator to add discount deltas.
    fn unit_amount_mut(&mut self) -> &mut UnitAmount;

    /// Participant count when the sellable exposes one.
    fn participants(&self) -> Option<i64>;
}

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the cart.
///
/// ## Design Notes
/// - `sellable`: frozen copy of sellable data at time of adding.
///   This ensures the cart displays consistent data even if the sellable
///   is updated after being added to cart.
/// - `item_id`: slot key within the cart ("item-0"). Upserting with an
///   existing key replaces that line.
/// - `unit_amount`: per-unit price; line totals scale it by `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Sellable snapshot at time of adding (frozen).
    pub sellable: Sellable,

    /// Slot key within the cart.
    pub item_id: String,

    /// Quantity in cart (>= 1).
    pub quantity: i64,

    /// Per-unit amount the allocator mutates.
    pub unit_amount: UnitAmount,

    /// When this item was added to cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item at the given per-unit base price.
    ///
    /// ## Price Freezing
    /// The base price is captured at this moment. If the sellable's price
    /// changes later, this line retains the original price.
    pub fn new(
        sellable: Sellable,
        item_id: impl Into<String>,
        base: Money,
        quantity: i64,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;

        Ok(CartItem {
            sellable,
            item_id: item_id.into(),
            quantity,
            unit_amount: UnitAmount::new(base),
            added_at: Utc::now(),
        })
    }

    /// Line base total (per-unit base × quantity).
    pub fn line_base(&self) -> Money {
        self.unit_amount.base() * self.quantity
    }

    /// Line discount total (capped per-unit discounts × quantity).
    pub fn line_discounts(&self) -> Money {
        self.unit_amount.discounts() * self.quantity
    }

    /// Line total after discounts (discounted unit price × quantity).
    pub fn line_discounted(&self) -> Money {
        self.unit_amount.discounted_amount() * self.quantity
    }
}

impl DiscountableItem for CartItem {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn unit_amount(&self) -> &UnitAmount {
        &self.unit_amount
    }

    fn unit_amount_mut(&mut self) -> &mut UnitAmount {
        &mut self.unit_amount
    }

    fn participants(&self) -> Option<i64> {
        self.sellable.participants
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `item_id` (upserting the same key replaces the line)
/// - Quantity of every line is >= 1, enforced at [`CartItem::new`]
/// - Maximum items: 100 (configured at crate level)
/// - Item order is insertion order; the allocator never reorders it
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Cart identifier used by discount providers for attachment lookup.
    pub id: String,

    /// Items in the cart, in insertion order.
    pub items: Vec<CartItem>,

    /// When the cart was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new(id: impl Into<String>) -> Self {
        Cart {
            id: id.into(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Inserts an item, replacing any existing line with the same `item_id`.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(CoreError::CartTooLarge)` when a new line would exceed the cap
    pub fn upsert_item(&mut self, item: CartItem) -> CoreResult<()> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.item_id == item.item_id) {
            *existing = item;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Finds an item by its slot key.
    pub fn find_item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart base total before any discounts.
    pub fn base_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_base())
    }

    /// Cart discount total (per-line capped discounts, summed).
    pub fn discounts_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_discounts())
    }

    /// Cart total after discounts.
    pub fn discounted_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_discounted())
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub base_cents: i64,
    pub discounts_cents: i64,
    pub discounted_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            base_cents: cart.base_total().cents(),
            discounts_cents: cart.discounts_total().cents(),
            discounted_cents: cart.discounted_total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sellable(id: &str) -> Sellable {
        Sellable {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Sellable {}", id),
            participants: None,
        }
    }

    fn item(id: &str, item_id: &str, base_cents: i64, quantity: i64) -> CartItem {
        CartItem::new(
            test_sellable(id),
            item_id,
            Money::from_cents(base_cents),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_cart_upsert_item() {
        let mut cart = Cart::new("cart-1");
        cart.upsert_item(item("1", "item-0", 999, 2)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.base_total().cents(), 1998);
    }

    #[test]
    fn test_cart_upsert_replaces_same_slot() {
        let mut cart = Cart::new("cart-1");
        cart.upsert_item(item("1", "item-0", 999, 2)).unwrap();
        cart.upsert_item(item("1", "item-0", 999, 5)).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_cart_rejects_zero_quantity() {
        assert!(CartItem::new(test_sellable("1"), "item-0", Money::from_cents(999), 0).is_err());
    }

    #[test]
    fn test_cart_find_item() {
        let mut cart = Cart::new("cart-1");
        cart.upsert_item(item("1", "item-0", 2500, 1)).unwrap();
        cart.upsert_item(item("1", "item-1", 3500, 1)).unwrap();

        assert!(cart.find_item("item-1").is_some());
        assert!(cart.find_item("item-9").is_none());
    }

    #[test]
    fn test_cart_size_cap() {
        let mut cart = Cart::new("cart-1");
        for idx in 0..MAX_CART_ITEMS {
            cart.upsert_item(item("1", &format!("item-{}", idx), 100, 1))
                .unwrap();
        }

        let overflow = item("1", "item-overflow", 100, 1);
        assert!(cart.upsert_item(overflow).is_err());
    }

    #[test]
    fn test_cart_totals_follow_unit_amounts() {
        let mut cart = Cart::new("cart-1");
        cart.upsert_item(item("1", "item-0", 2500, 1)).unwrap();
        cart.upsert_item(item("1", "item-1", 3500, 2)).unwrap();

        cart.items[0]
            .unit_amount
            .add_discount(Money::from_cents(500));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.base_cents, 9500);
        assert_eq!(totals.discounts_cents, 500);
        assert_eq!(totals.discounted_cents, 9000);
    }

    #[test]
    fn test_participant_capability() {
        let booking = Sellable {
            id: "b-1".to_string(),
            sku: "ROOM-A".to_string(),
            name: "Escape Room A".to_string(),
            participants: Some(4),
        };
        let with = CartItem::new(booking, "item-0", Money::from_cents(5500), 1).unwrap();
        let without = item("1", "item-1", 2500, 1);

        assert_eq!(with.participants(), Some(4));
        assert_eq!(without.participants(), None);
    }
}
