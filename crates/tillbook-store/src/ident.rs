//! # Identifier Generation
//!
//! Entity ids, SKUs, and invoice numbers.
//!
//! Entity ids are opaque UUID v4 strings. SKUs and invoice numbers are
//! human-readable codes built from the clock plus a random component; they
//! are display identifiers, not keys, and collisions are accepted at this
//! scale.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

/// Generates an opaque entity id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a SKU for products created without one:
/// `SKU-<4-digit-random>-<last-4-digits-of-epoch-millis>`.
pub fn generate_sku() -> String {
    let random: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("SKU-{:04}-{}", random, last_digits(Utc::now().timestamp_millis(), 4))
}

/// Generates an invoice number:
/// `INV-<last-6-digits-of-epoch-millis>-<3-digit-random>`.
pub fn generate_invoice_number() -> String {
    let random: u32 = rand::thread_rng().gen_range(0..1_000);
    format!("INV-{}-{:03}", last_digits(Utc::now().timestamp_millis(), 6), random)
}

fn last_digits(value: i64, n: usize) -> String {
    let digits = value.to_string();
    let start = digits.len().saturating_sub(n);
    digits[start..].to_string()
}
