//! # Home Controller
//!
//! The landing dashboard's stat cards.

use std::sync::Arc;

use serde::Serialize;

use tillbook_store::{CategoryRepository, ProductRepository, Storage};

/// The dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_categories: usize,
    pub low_stock_items: usize,
}

/// Controller behind the Home screen.
pub struct HomeController {
    products: ProductRepository,
    categories: CategoryRepository,
}

impl HomeController {
    /// Creates the controller over a shared store.
    pub fn new(storage: Arc<Storage>) -> Self {
        HomeController {
            products: ProductRepository::new(storage.clone()),
            categories: CategoryRepository::new(storage),
        }
    }

    /// Current stat-card figures.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_products: self.products.load().len(),
            total_categories: self.categories.load().len(),
            low_stock_items: self.products.low_stock().len(),
        }
    }
}
