//! # Cart
//!
//! The billing cart: stock-aware add/update/remove plus total computation.
//!
//! ## Stock Checks
//! ```text
//! add_product(p)
//!      │
//!      ├── p.quantity <= 0?            → OutOfStock
//!      ├── line qty + 1 > p.quantity?  → InsufficientStock
//!      └── OK → increase line / push new snapshot line
//!
//! set_quantity(p, qty)
//!      │
//!      ├── qty <= 0                    → remove line
//!      ├── qty > p.quantity            → InsufficientStock (line unchanged)
//!      └── OK → line qty = qty
//! ```
//! Checks compare against the product's *current* stock, not a reserved
//! pool: two carts over the same store can both pass the check. Accepted
//! single-operator limitation, documented at the workspace level.

use serde::{Deserialize, Serialize};

use crate::currency;
use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, Product};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product again bumps
///   the line quantity)
/// - A line's quantity never exceeds the product's stock at the moment the
///   line was added or last updated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product, or bumps its existing line by one.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if product.quantity <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            if item.quantity >= product.quantity {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: item.quantity + 1,
                });
            }
            item.quantity += 1;
            return Ok(());
        }

        self.items.push(CartItem::from_product(product, 1));
        Ok(())
    }

    /// Sets a line's quantity.
    ///
    /// Zero or negative removes the line; a quantity above the product's
    /// stock is rejected and the line keeps its previous quantity.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(&product.id);
            return Ok(());
        }

        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line by product id. Removing an absent line is a no-op.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The cart lines, in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` across all lines.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Tax on the subtotal, rounded to cents.
    pub fn tax(&self) -> f64 {
        currency::calculate_tax(self.subtotal())
    }

    /// Grand total (`subtotal + tax`).
    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Totals snapshot for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.len(),
            total_quantity: self.items.iter().map(|i| i.quantity).sum(),
            subtotal: self.subtotal(),
            tax: self.tax(),
            total: self.total(),
        }
    }
}

/// Cart totals summary for display surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
