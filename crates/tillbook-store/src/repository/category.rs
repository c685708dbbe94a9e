//! # Category Repository

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::kv::{Storage, CATEGORIES};
use tillbook_core::Category;

/// Repository for the category collection.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    storage: Arc<Storage>,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository over a shared store.
    pub fn new(storage: Arc<Storage>) -> Self {
        CategoryRepository { storage }
    }

    /// Loads the full category collection.
    pub fn load(&self) -> Vec<Category> {
        self.storage.get(CATEGORIES)
    }

    /// Overwrites the full category collection.
    pub fn save(&self, categories: &[Category]) -> StoreResult<()> {
        debug!(count = categories.len(), "saving categories");
        self.storage.set(CATEGORIES, categories)
    }

    /// Finds a category by id.
    pub fn find(&self, id: &str) -> Option<Category> {
        self.load().into_iter().find(|c| c.id == id)
    }
}
