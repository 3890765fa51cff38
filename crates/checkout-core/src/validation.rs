//! # Validation Module
//!
//! Input validation for discount records and cart input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Loading boundary                                             │
//! │  ├── DiscountKind::from_parts (amount xor percent)                     │
//! │  └── THIS MODULE: field-level record validation                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart mutation                                                │
//! │  ├── quantity and cart-size checks on insert                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Allocation                                                   │
//! │  └── NO validation: the pass assumes its inputs were checked above     │
//! │                                                                         │
//! │  Defense in depth: the allocator never sees an invalid record          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use checkout_core::validation::{validate_discount_code, validate_quantity};
//!
//! // Validate a code before lookup
//! validate_discount_code("SPRING20").unwrap();
//!
//! // Validate quantity before a cart insert
//! validate_quantity(5).unwrap();
//! ```

use crate::discount::{Discount, DiscountKind};
use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a discount code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 32 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_discount_code;
///
/// assert!(validate_discount_code("SPRING20").is_ok());
/// assert!(validate_discount_code("").is_err());
/// assert!(validate_discount_code("HAS SPACE").is_err());
/// ```
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a fixed discount amount in cents.
///
/// ## Rules
/// - Must be positive (> 0); a zero amount means the record is
///   percentage-based and carries no amount
pub fn validate_discount_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be positive (> 0); a zero percent means the record is
///   amount-based and carries no percentage
/// - Must not exceed 100
pub fn validate_percent(percent: u32) -> ValidationResult<()> {
    if percent == 0 {
        return Err(ValidationError::MustBePositive {
            field: "percent".to_string(),
        });
    }

    if percent > MAX_PERCENT {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 1,
            max: MAX_PERCENT as i64,
        });
    }

    Ok(())
}

/// Validates a discount's usage cap.
///
/// ## Rules
/// - Must be at least 1; a discount that can apply to zero items is a
///   data error, not a disabled discount
pub fn validate_max_usage(max_usage: i64) -> ValidationResult<()> {
    if max_usage < 1 {
        return Err(ValidationError::MustBePositive {
            field: "max_usage".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Caller supplies quantity: 5                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with upsert_item                                │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of lines).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    // Try to parse as UUID
    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a complete discount record at the loading boundary.
///
/// Composes the field-level checks. Records built through
/// [`DiscountKind::from_parts`] already satisfy the kind-specific rules;
/// this re-checks them for records deserialized from elsewhere.
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    validate_uuid(&discount.id)?;
    validate_discount_code(&discount.code)?;
    validate_max_usage(discount.max_usage)?;

    match discount.kind {
        DiscountKind::AmountOff(amount) => validate_discount_amount(amount.cents()),
        DiscountKind::PercentOff(percent) => validate_percent(percent),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::AppliesTo;
    use crate::money::Money;

    #[test]
    fn test_validate_discount_code() {
        // Valid codes
        assert!(validate_discount_code("SPRING20").is_ok());
        assert!(validate_discount_code("LAUNCH-1").is_ok());
        assert!(validate_discount_code("staff_comp").is_ok());

        // Invalid codes
        assert!(validate_discount_code("").is_err());
        assert!(validate_discount_code("   ").is_err());
        assert!(validate_discount_code("HAS SPACE").is_err());
        assert!(validate_discount_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_discount_amount() {
        assert!(validate_discount_amount(1000).is_ok());
        assert!(validate_discount_amount(0).is_err());
        assert!(validate_discount_amount(-100).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent(1).is_ok());
        assert!(validate_percent(50).is_ok());
        assert!(validate_percent(100).is_ok());

        assert!(validate_percent(0).is_err());
        assert!(validate_percent(101).is_err());
    }

    #[test]
    fn test_validate_max_usage() {
        assert!(validate_max_usage(1).is_ok());
        assert!(validate_max_usage(10).is_ok());

        assert!(validate_max_usage(0).is_err());
        assert!(validate_max_usage(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_discount_record() {
        let discount = Discount::amount_off("TESTCODE", Money::from_cents(1000), AppliesTo::Order);
        assert!(validate_discount(&discount).is_ok());

        let mut bad_code = discount.clone();
        bad_code.code = "".to_string();
        assert!(validate_discount(&bad_code).is_err());

        let mut bad_usage = discount.clone();
        bad_usage.max_usage = 0;
        assert!(validate_discount(&bad_usage).is_err());

        let mut bad_percent = discount;
        bad_percent.kind = DiscountKind::PercentOff(250);
        assert!(validate_discount(&bad_percent).is_err());
    }
}
