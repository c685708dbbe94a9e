//! # Product Repository
//!
//! Whole-collection access to products plus the low-stock filter used by
//! the dashboard and insights screens.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::kv::{Storage, PRODUCTS};
use tillbook_core::{catalog, Product};

/// Repository for the product collection.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    storage: Arc<Storage>,
}

impl ProductRepository {
    /// Creates a new ProductRepository over a shared store.
    pub fn new(storage: Arc<Storage>) -> Self {
        ProductRepository { storage }
    }

    /// Loads the full product collection.
    pub fn load(&self) -> Vec<Product> {
        self.storage.get(PRODUCTS)
    }

    /// Overwrites the full product collection.
    pub fn save(&self, products: &[Product]) -> StoreResult<()> {
        debug!(count = products.len(), "saving products");
        self.storage.set(PRODUCTS, products)
    }

    /// Finds a product by id.
    pub fn find(&self, id: &str) -> Option<Product> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// All products below the low-stock threshold.
    pub fn low_stock(&self) -> Vec<Product> {
        let products = self.load();
        catalog::low_stock(&products).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            category_id: "c1".to_string(),
            price: 1.0,
            quantity,
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_low_stock_filter() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ProductRepository::new(Arc::new(Storage::open(dir.path()).unwrap()));

        repo.save(&[product("p1", 50), product("p2", 3), product("p3", 9)])
            .unwrap();

        let low = repo.low_stock();
        assert_eq!(low.len(), 2);
        assert!(low.iter().all(|p| p.quantity < 10));
    }
}
