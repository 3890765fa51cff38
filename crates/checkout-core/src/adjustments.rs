//! # Discount Adjustments
//!
//! Allocates a cart's discounts across its line items, mutating each
//! line's per-unit amount in place.
//!
//! ## Allocation Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Allocation Pass                                │
//! │                                                                         │
//! │  discounts ──► Step 1: stable partition                                │
//! │                amount-off first, percent-off after, ties keep order    │
//! │                     │                                                   │
//! │                     ▼  for each discount                                │
//! │                Step 2: select items                                     │
//! │                sort by current discounted price (desc, re-evaluated)   │
//! │                take the first max_usage items                          │
//! │                     │                                                   │
//! │                     ▼  for each selected item                           │
//! │                Step 3: compute delta                                    │
//! │                percent: % of current discounted unit price            │
//! │                amount/order: amount ÷ quantity                         │
//! │                amount/participant: amount × participants              │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │                unit_amount.add_discount(delta)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Amount-Off First?
//! Percentage discounts are computed against the amount remaining after
//! fixed deductions. Applying them in the other order would inflate the
//! percentage's effective value.
//!
//! ## Caller Responsibilities
//! - Run the pass exactly once per pricing; re-running on an already
//!   discounted cart double-applies
//! - Serialize concurrent access to the same cart (in-place mutation,
//!   no internal locking)
//! - Hand in only active, attached discounts (see [`DiscountSource`])

use tracing::debug;

use crate::cart::{Cart, DiscountableItem};
use crate::discount::{AppliesTo, Discount, DiscountKind, DiscountSource};
use crate::money::Money;

// =============================================================================
// Entry Points
// =============================================================================

/// Allocates `discounts` across `items`, adding discount deltas to each
/// selected item's per-unit amount.
///
/// Items are never added, removed or reordered; only their unit amounts
/// change. The pass raises no errors: an amount-scope combination the
/// item cannot support contributes a zero delta, and a usage cap larger
/// than the item count selects every item.
///
/// Runs in `O(discounts × items × log items)` because the item ranking is
/// re-evaluated for every discount.
///
/// ## Example
/// ```rust
/// use checkout_core::adjustments::calculate_adjustments;
/// use checkout_core::cart::{Cart, CartItem, Sellable};
/// use checkout_core::discount::{AppliesTo, Discount};
/// use checkout_core::money::Money;
///
/// let sellable = Sellable {
///     id: "s-1".to_string(),
///     sku: "ROOM-A".to_string(),
///     name: "Escape Room A".to_string(),
///     participants: None,
/// };
/// let mut cart = Cart::new("cart-1");
/// cart.upsert_item(CartItem::new(sellable, "item-0", Money::from_cents(2500), 1).unwrap())
///     .unwrap();
///
/// let discount = Discount::amount_off("TESTCODE", Money::from_cents(1000), AppliesTo::Order);
/// calculate_adjustments(&mut cart.items, &[discount]);
///
/// assert_eq!(cart.discounts_total().cents(), 1000);
/// assert_eq!(cart.discounted_total().cents(), 1500);
/// ```
pub fn calculate_adjustments<T: DiscountableItem>(items: &mut [T], discounts: &[Discount]) {
    debug!(
        items = items.len(),
        discounts = discounts.len(),
        "calculating discount adjustments"
    );

    // Step 1: amount-off before percent-off. sort_by_key is stable, so
    // discounts of the same kind keep their attachment order.
    let mut ordered: Vec<&Discount> = discounts.iter().collect();
    ordered.sort_by_key(|d| if d.kind.is_amount_off() { 0 } else { 1 });

    for discount in ordered {
        apply_discount(items, discount);
    }
}

/// Fetches the cart's active discounts from the provider and allocates
/// them across the cart's items.
pub fn apply_cart_discounts(cart: &mut Cart, source: &impl DiscountSource) {
    let discounts = source.discounts_for_cart(&cart.id);
    calculate_adjustments(&mut cart.items, &discounts);
}

// =============================================================================
// Per-Discount Application
// =============================================================================

/// Applies one discount to the items it selects.
///
/// The ranking sorts on the CURRENT discounted unit price, so deductions
/// made by earlier discounts in the pass shift which items a limited-use
/// discount lands on.
fn apply_discount<T: DiscountableItem>(items: &mut [T], discount: &Discount) {
    let mut ranked: Vec<usize> = (0..items.len()).collect();
    ranked.sort_by(|&a, &b| {
        let a_amount = items[a].unit_amount().discounted_amount();
        let b_amount = items[b].unit_amount().discounted_amount();
        b_amount.cmp(&a_amount)
    });

    // Enforce usage limitations
    let selected = usize::try_from(discount.max_usage)
        .unwrap_or(0)
        .min(items.len());

    for &idx in ranked.iter().take(selected) {
        let item = &mut items[idx];
        let delta = item_discount(item, discount);
        item.unit_amount_mut().add_discount(delta);

        debug!(
            code = %discount.code,
            item = idx,
            delta = delta.cents(),
            remaining = item.unit_amount().discounted_amount().cents(),
            "applied discount to item"
        );
    }
}

/// Computes the per-unit delta one discount contributes to one item.
///
/// - Percent: share of the item's current discounted unit price, so a
///   later percent discount compounds on an earlier one's result
/// - Fixed amount, order scope: split evenly across the line's units,
///   truncating fractional cents
/// - Fixed amount, participant scope: scaled UP by the participant count
/// - Participant scope without the capability: zero, silently
fn item_discount<T: DiscountableItem>(item: &T, discount: &Discount) -> Money {
    match discount.kind {
        DiscountKind::PercentOff(pct) => item.unit_amount().discounted_amount().percent(pct),
        DiscountKind::AmountOff(amount) => match discount.applies_to {
            AppliesTo::Order => amount.per_unit(item.quantity()),
            AppliesTo::Participant => match item.participants() {
                Some(participants) => amount * participants,
                None => Money::zero(),
            },
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
