//! # Inventory Controller
//!
//! Product CRUD, catalog filtering, the low-stock list, and CSV export.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::export::{self, Column};
use crate::notify::NotificationCenter;
use tillbook_core::validation::validate_product_input;
use tillbook_core::{catalog, dates::DateStyle, Product};
use tillbook_store::{ident, CategoryRepository, ProductRepository, Storage};

/// User-editable product fields. A blank SKU gets auto-generated.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub category_id: String,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
}

/// The inventory list filter: optional category plus a search term matched
/// case-insensitively against name and SKU.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub search: String,
}

/// Controller behind the Inventory screen.
pub struct InventoryController {
    products: ProductRepository,
    categories: CategoryRepository,
    notifications: Arc<NotificationCenter>,
    show_add_form: bool,
}

impl InventoryController {
    /// Creates the controller over a shared store and notification center.
    pub fn new(storage: Arc<Storage>, notifications: Arc<NotificationCenter>) -> Self {
        InventoryController {
            products: ProductRepository::new(storage.clone()),
            categories: CategoryRepository::new(storage),
            notifications,
            show_add_form: false,
        }
    }

    /// Same as [`new`](Self::new), honoring the screen's entry query flag
    /// (`action=add` pre-opens the add-product form).
    pub fn with_initial_action(
        storage: Arc<Storage>,
        notifications: Arc<NotificationCenter>,
        action: Option<&str>,
    ) -> Self {
        let mut controller = InventoryController::new(storage, notifications);
        controller.show_add_form = action == Some("add");
        controller
    }

    /// Whether the add/edit form starts visible.
    pub fn show_add_form(&self) -> bool {
        self.show_add_form
    }

    /// Toggles the add/edit form.
    pub fn set_show_add_form(&mut self, visible: bool) {
        self.show_add_form = visible;
    }

    /// The product list under the given filter.
    pub fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let products = self.products.load();
        catalog::filter_products(&products, filter.category_id.as_deref(), &filter.search)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Products below the low-stock threshold, ignoring any filter.
    pub fn low_stock(&self) -> Vec<Product> {
        self.products.low_stock()
    }

    /// Creates a product. A blank SKU is auto-generated.
    pub fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        debug!(name = %draft.name, "create product");
        if let Err(e) =
            validate_product_input(&draft.name, &draft.category_id, draft.price, draft.quantity)
        {
            self.notifications.error(e.to_string());
            return Err(e.into());
        }

        let sku = if draft.sku.trim().is_empty() {
            ident::generate_sku()
        } else {
            draft.sku.trim().to_string()
        };

        let product = Product {
            id: ident::generate_id(),
            name: draft.name.trim().to_string(),
            sku,
            category_id: draft.category_id,
            price: draft.price,
            quantity: draft.quantity,
            description: normalize(draft.description),
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut products = self.products.load();
        products.push(product.clone());
        self.persist(&products)?;

        info!(id = %product.id, sku = %product.sku, "product created");
        self.notifications.success("Product added successfully");
        Ok(product)
    }

    /// Updates an existing product.
    pub fn update(&self, id: &str, draft: ProductDraft) -> AppResult<Product> {
        debug!(id, "update product");
        if let Err(e) =
            validate_product_input(&draft.name, &draft.category_id, draft.price, draft.quantity)
        {
            self.notifications.error(e.to_string());
            return Err(e.into());
        }

        let mut products = self.products.load();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Err(AppError::not_found("Product", id));
        };

        product.name = draft.name.trim().to_string();
        if !draft.sku.trim().is_empty() {
            product.sku = draft.sku.trim().to_string();
        }
        product.category_id = draft.category_id;
        product.price = draft.price;
        product.quantity = draft.quantity;
        product.description = normalize(draft.description);
        product.updated_at = Some(Utc::now());
        let updated = product.clone();

        self.persist(&products)?;

        info!(id = %updated.id, "product updated");
        self.notifications.success("Product updated successfully");
        Ok(updated)
    }

    /// Deletes a product.
    ///
    /// Past sales keep their frozen line-item snapshots, so no referential
    /// check is needed here; the product's category simply stops resolving
    /// in future reports.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        debug!(id, "delete product");
        let mut products = self.products.load();
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(AppError::not_found("Product", id));
        }

        self.persist(&products)?;

        info!(id, "product deleted");
        self.notifications.success("Product deleted successfully");
        Ok(())
    }

    /// Exports the filtered product list as CSV.
    pub fn export_csv(&self, filter: &ProductFilter, path: &Path) -> AppResult<()> {
        let products = self.list(filter);
        export::write_csv(&products, &product_columns(), path)
    }

    fn persist(&self, products: &[Product]) -> AppResult<()> {
        self.products.save(products).map_err(|e| {
            let err: AppError = e.into();
            self.notifications.error(err.message.clone());
            err
        })
    }

    /// Category name lookup for list rendering; unresolved ids show as
    /// "Unknown".
    pub fn category_name(&self, category_id: &str) -> String {
        self.categories
            .find(category_id)
            .map(|c| c.name)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

fn product_columns() -> Vec<Column> {
    vec![
        Column::text("name", "Name"),
        Column::text("sku", "SKU"),
        Column::text("categoryId", "Category"),
        Column::currency("price", "Price"),
        Column::text("quantity", "Quantity"),
        Column::date("createdAt", "Created", DateStyle::YearMonthDay),
    ]
}

fn normalize(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
