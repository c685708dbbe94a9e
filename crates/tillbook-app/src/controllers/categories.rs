//! # Categories Controller
//!
//! List, create, update, and delete product categories.
//!
//! Deleting is the one operation with a cross-collection rule: a category
//! still referenced by any product is not deletable, checked by a linear
//! scan over the product collection at delete time.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::notify::NotificationCenter;
use tillbook_core::validation::validate_category_name;
use tillbook_core::{Category, CoreError};
use tillbook_store::{ident, CategoryRepository, ProductRepository, Storage};

/// User-editable category fields.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Controller behind the Categories screen.
pub struct CategoriesController {
    categories: CategoryRepository,
    products: ProductRepository,
    notifications: Arc<NotificationCenter>,
}

impl CategoriesController {
    /// Creates the controller over a shared store and notification center.
    pub fn new(storage: Arc<Storage>, notifications: Arc<NotificationCenter>) -> Self {
        CategoriesController {
            categories: CategoryRepository::new(storage.clone()),
            products: ProductRepository::new(storage),
            notifications,
        }
    }

    /// The full category list.
    pub fn list(&self) -> Vec<Category> {
        self.categories.load()
    }

    /// Creates a category.
    pub fn create(&self, draft: CategoryDraft) -> AppResult<Category> {
        debug!(name = %draft.name, "create category");
        let mut categories = self.categories.load();

        if let Err(e) = validate_category_name(&draft.name, None, &categories) {
            self.notifications.error(e.to_string());
            return Err(e.into());
        }

        let category = Category {
            id: ident::generate_id(),
            name: draft.name.trim().to_string(),
            description: normalize(draft.description),
            created_at: Utc::now(),
            updated_at: None,
        };

        categories.push(category.clone());
        self.persist(&categories)?;

        info!(id = %category.id, name = %category.name, "category created");
        self.notifications.success("Category added successfully");
        Ok(category)
    }

    /// Updates an existing category.
    pub fn update(&self, id: &str, draft: CategoryDraft) -> AppResult<Category> {
        debug!(id, name = %draft.name, "update category");
        let mut categories = self.categories.load();

        if !categories.iter().any(|c| c.id == id) {
            return Err(AppError::not_found("Category", id));
        }

        if let Err(e) = validate_category_name(&draft.name, Some(id), &categories) {
            self.notifications.error(e.to_string());
            return Err(e.into());
        }

        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .expect("presence checked above");
        category.name = draft.name.trim().to_string();
        category.description = normalize(draft.description);
        category.updated_at = Some(Utc::now());
        let updated = category.clone();

        self.persist(&categories)?;

        info!(id = %updated.id, "category updated");
        self.notifications.success("Category updated successfully");
        Ok(updated)
    }

    /// Deletes a category, unless any product still references it.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        debug!(id, "delete category");
        let mut categories = self.categories.load();

        let Some(category) = categories.iter().find(|c| c.id == id).cloned() else {
            return Err(AppError::not_found("Category", id));
        };

        let product_count = self
            .products
            .load()
            .iter()
            .filter(|p| p.category_id == id)
            .count();
        if product_count > 0 {
            let err = CoreError::CategoryInUse {
                name: category.name,
                product_count,
            };
            self.notifications
                .error("Cannot delete category because it is being used by products");
            return Err(err.into());
        }

        categories.retain(|c| c.id != id);
        self.persist(&categories)?;

        info!(id, "category deleted");
        self.notifications.success("Category deleted successfully");
        Ok(())
    }

    fn persist(&self, categories: &[Category]) -> AppResult<()> {
        self.categories.save(categories).map_err(|e| {
            let err: AppError = e.into();
            self.notifications.error(err.message.clone());
            err
        })
    }
}

fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use tillbook_core::Product;

    fn controller(dir: &std::path::Path) -> CategoriesController {
        let storage = Arc::new(Storage::open(dir).unwrap());
        CategoriesController::new(storage, Arc::new(NotificationCenter::new()))
    }

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_create_list_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(dir.path());

        let created = ctl.create(draft("Grocery")).unwrap();
        assert_eq!(ctl.list().len(), 1);
        assert!(created.updated_at.is_none());

        let updated = ctl
            .update(&created.id, CategoryDraft {
                name: "Groceries".to_string(),
                description: Some("Food items".to_string()),
            })
            .unwrap();
        assert_eq!(updated.name, "Groceries");
        assert!(updated.updated_at.is_some());

        ctl.delete(&created.id).unwrap();
        assert!(ctl.list().is_empty());
    }

    #[test]
    fn test_duplicate_name_differing_only_in_case_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(dir.path());

        ctl.create(draft("Grocery")).unwrap();
        let err = ctl.create(draft("gRoCeRy")).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctl.list().len(), 1);
    }

    #[test]
    fn test_update_may_keep_own_name() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(dir.path());

        let created = ctl.create(draft("Grocery")).unwrap();
        assert!(ctl.update(&created.id, draft("GROCERY")).is_ok());
    }

    #[test]
    fn test_delete_referenced_category_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        let ctl = CategoriesController::new(storage.clone(), Arc::new(NotificationCenter::new()));

        let category = ctl.create(draft("Grocery")).unwrap();
        ProductRepository::new(storage)
            .save(&[Product {
                id: "p1".to_string(),
                name: "Milk".to_string(),
                sku: "GRO-1001".to_string(),
                category_id: category.id.clone(),
                price: 3.99,
                quantity: 50,
                description: None,
                created_at: Utc::now(),
                updated_at: None,
            }])
            .unwrap();

        let err = ctl.delete(&category.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReferentialIntegrity);
        // the category list is unchanged
        assert_eq!(ctl.list().len(), 1);
    }

    #[test]
    fn test_validation_failure_publishes_notification() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        let notifications = Arc::new(NotificationCenter::new());
        let ctl = CategoriesController::new(storage, notifications.clone());

        assert!(ctl.create(draft("  ")).is_err());

        let active = notifications.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, crate::notify::Severity::Error);
    }
}
