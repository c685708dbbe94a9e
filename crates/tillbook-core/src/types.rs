//! # Domain Types
//!
//! Core entity types used throughout Tillbook.
//!
//! ## Persisted Layout
//! All types serialize with camelCase field names because they mirror the
//! on-disk collection documents (`categories`, `products`, `sales`), which
//! keep the original storage layout: `categoryId`, `invoiceNumber`,
//! `createdAt`, and sale line items carrying the product id under `id`.
//!
//! ## Snapshot Pattern
//! A [`CartItem`] freezes the product's name, price, SKU, and category at
//! the moment it enters the cart. Sale records embed those frozen items, so
//! later edits to a product never rewrite sales history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Names are unique among categories, compared case-insensitively. The id is
/// an opaque string; nothing outside the store layer may assume a format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,

    /// Display name, required and unique (case-insensitive).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Set on the first edit, absent on freshly created records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown in the catalog and on invoices.
    pub name: String,

    /// Stock Keeping Unit. Auto-generated when left blank on creation;
    /// uniqueness is by convention only, collisions are not checked.
    pub sku: String,

    /// Referenced category. Presence is required at creation; existence is
    /// only enforced when a category deletion is attempted.
    pub category_id: String,

    /// Unit price. Monetary values are plain floating point, rounded to
    /// cents only where displayed or where a total is recorded.
    pub price: f64,

    /// Current stock count.
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the billing cart: a frozen snapshot of a product plus the
/// requested quantity.
///
/// Serialized inside sale records with the product id under the `id` key,
/// matching the persisted sales layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Id of the product this line was created from.
    #[serde(rename = "id")]
    pub product_id: String,

    /// Product name at the time of adding (frozen).
    pub name: String,

    /// Unit price at the time of adding (frozen).
    pub price: f64,

    /// Requested units. Never exceeds the product's stock at the moment of
    /// adding or updating.
    pub quantity: i64,

    /// Category at the time of adding (frozen).
    pub category_id: String,

    /// SKU at the time of adding (frozen).
    pub sku: String,
}

impl CartItem {
    /// Creates a cart line from a product with the given quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            category_id: product.category_id.clone(),
            sku: product.sku.clone(),
        }
    }

    /// Line total before tax (`price × quantity`).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Customer details captured at checkout. Every field is optional; a sale
/// without a name is a walk-in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    /// Name to print on the invoice; walk-ins get a placeholder.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Walk-in Customer",
        }
    }

    /// True when a non-blank name was captured.
    pub fn has_name(&self) -> bool {
        self.name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false)
    }

    /// True when a non-blank phone number was captured.
    pub fn has_phone(&self) -> bool {
        self.phone
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Created only by checkout and append-only afterwards:
/// there is no edit or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    /// Human-readable invoice number (`INV-...`). Not guaranteed unique.
    pub invoice_number: String,

    pub date: DateTime<Utc>,

    #[serde(default)]
    pub customer: Customer,

    /// Frozen copies of the cart lines at checkout time.
    pub items: Vec<CartItem>,

    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Milk".to_string(),
            sku: "GRO-1001".to_string(),
            category_id: "c1".to_string(),
            price: 3.99,
            quantity: 50,
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn cart_item_freezes_product_fields() {
        let mut p = product();
        let item = CartItem::from_product(&p, 2);

        p.name = "Oat Milk".to_string();
        p.price = 5.49;

        assert_eq!(item.name, "Milk");
        assert_eq!(item.price, 3.99);
        assert_eq!(item.line_total(), 7.98);
    }

    #[test]
    fn cart_item_serializes_product_id_as_id() {
        let item = CartItem::from_product(&product(), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["categoryId"], "c1");
        assert!(json.get("productId").is_none());
    }

    #[test]
    fn customer_display_name_falls_back_to_walk_in() {
        let walk_in = Customer::default();
        assert_eq!(walk_in.display_name(), "Walk-in Customer");

        let blank = Customer {
            name: Some("   ".to_string()),
            ..Customer::default()
        };
        assert_eq!(blank.display_name(), "Walk-in Customer");

        let named = Customer {
            name: Some("Ada".to_string()),
            ..Customer::default()
        };
        assert_eq!(named.display_name(), "Ada");
    }

    #[test]
    fn sale_round_trips_through_json() {
        let sale = Sale {
            id: "s1".to_string(),
            invoice_number: "INV-123456-001".to_string(),
            date: "2024-01-01T12:00:00Z".parse().unwrap(),
            customer: Customer::default(),
            items: vec![CartItem::from_product(&product(), 3)],
            subtotal: 11.97,
            tax: 0.84,
            total: 12.81,
        };

        let json = serde_json::to_string(&sale).unwrap();
        let back: Sale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sale);
    }
}
