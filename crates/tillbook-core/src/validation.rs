//! # Validation Module
//!
//! Input validation rules for Tillbook.
//!
//! ## Validation Strategy
//! Validation runs in the controllers before any write reaches the store: a
//! failed rule discards the attempted mutation, surfaces a notification, and
//! leaves persisted state untouched. The store itself enforces nothing.
//!
//! ## Usage
//! ```rust
//! use tillbook_core::validation::{validate_category_name, validate_product_input};
//!
//! assert!(validate_category_name("Grocery", None, &[]).is_ok());
//! assert!(validate_product_input("Milk", "c1", 3.99, 50).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{Category, Customer};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Category Rules
// =============================================================================

/// Validates a category name against the existing collection.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be unique case-insensitively among all categories other than the
///   one being edited (`editing_id`)
pub fn validate_category_name(
    name: &str,
    editing_id: Option<&str>,
    existing: &[Category],
) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let lowered = name.to_lowercase();
    let duplicate = existing.iter().any(|c| {
        c.name.to_lowercase() == lowered && editing_id.map_or(true, |id| c.id != id)
    });

    if duplicate {
        return Err(ValidationError::Duplicate {
            field: "category".to_string(),
            value: name.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Rules
// =============================================================================

/// Validates the user-editable fields of a product.
///
/// ## Rules
/// - Name must not be empty
/// - A category must be selected
/// - Price must be a finite, strictly positive number
/// - Quantity must be non-negative
pub fn validate_product_input(
    name: &str,
    category_id: &str,
    price: f64,
    quantity: i64,
) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if category_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Billing Rules
// =============================================================================

/// Validates customer details at checkout.
///
/// A phone number is required whenever a customer name was captured; fully
/// anonymous walk-in sales stay valid.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    if customer.has_name() && !customer.has_phone() {
        return Err(ValidationError::Required {
            field: "customer phone".to_string(),
        });
    }

    if let Some(phone) = customer.phone.as_deref() {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
                reason: "must contain 7 to 15 digits".to_string(),
            });
        }
    }

    if let Some(email) = customer.email.as_deref() {
        if !email.trim().is_empty() && !is_valid_email(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
                reason: "must look like name@example.com".to_string(),
            });
        }
    }

    Ok(())
}

/// Loose phone check: 7-15 digits, ignoring common separators.
pub fn is_valid_phone(phone: &str) -> bool {
    let mut digits = 0usize;
    for c in phone.trim().chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | '-' | '.' | ' ' | '(' | ')' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

/// Loose email check: one `@`, non-empty local part, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
}

// =============================================================================
// Unit Tests
// =============================================================================
