//! # Billing Controller
//!
//! The point-of-sale screen: build a cart, check out, show the invoice.
//!
//! ## Phases
//! ```text
//! ┌──────────────┐   checkout()    ┌──────────────┐
//! │   Shopping   │────────────────►│   Invoice    │
//! │              │                 │  (read-only  │
//! │ add_to_cart  │◄────────────────│   receipt)   │
//! │ update/remove│   new_sale()    └──────────────┘
//! └──────────────┘
//! ```
//!
//! Checkout is the only operation that touches two collections: it
//! decrements every affected product's stock and persists the product
//! collection, then appends one sale record and persists the sales
//! collection. Both writes work on the same loaded snapshot; there is no
//! concurrent writer in the single-operator design.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::controllers::inventory::ProductFilter;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::notify::NotificationCenter;
use tillbook_core::validation::validate_customer;
use tillbook_core::{catalog, Cart, CartTotals, CoreError, Customer, Product, Sale};
use tillbook_store::{ident, CategoryRepository, ProductRepository, SaleRepository, Storage};

/// The billing screen's two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPhase {
    /// Selecting products and building the cart.
    Shopping,
    /// Read-only receipt view after a successful checkout.
    Invoice,
}

/// One rendered line of the invoice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// The rendered receipt shown in the Invoice phase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub invoice_number: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Controller behind the Billing screen.
///
/// Holds the ephemeral session state (cart, customer, pending invoice
/// number); all of it is discarded when the controller is dropped, exactly
/// like navigating away from the screen.
pub struct BillingController {
    products: ProductRepository,
    sales: SaleRepository,
    categories: CategoryRepository,
    notifications: Arc<NotificationCenter>,
    cart: Cart,
    customer: Customer,
    invoice_number: String,
    phase: BillingPhase,
    last_sale: Option<Sale>,
}

impl BillingController {
    /// Creates the controller and pre-generates the first invoice number.
    pub fn new(storage: Arc<Storage>, notifications: Arc<NotificationCenter>) -> Self {
        BillingController {
            products: ProductRepository::new(storage.clone()),
            sales: SaleRepository::new(storage.clone()),
            categories: CategoryRepository::new(storage),
            notifications,
            cart: Cart::new(),
            customer: Customer::default(),
            invoice_number: ident::generate_invoice_number(),
            phase: BillingPhase::Shopping,
            last_sale: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BillingPhase {
        self.phase
    }

    /// The invoice number the next checkout will use.
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Captures customer details for the next checkout.
    pub fn set_customer(&mut self, customer: Customer) {
        self.customer = customer;
    }

    /// The product catalog under the screen's filter.
    pub fn product_catalog(&self, filter: &ProductFilter) -> Vec<Product> {
        let products = self.products.load();
        catalog::filter_products(&products, filter.category_id.as_deref(), &filter.search)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Adds one unit of a product to the cart.
    pub fn add_to_cart(&mut self, product_id: &str) -> AppResult<()> {
        self.require_shopping()?;
        debug!(product_id, "add to cart");

        let product = self
            .products
            .find(product_id)
            .ok_or_else(|| AppError::not_found("Product", product_id))?;

        self.cart.add_product(&product).map_err(|e| self.reject(e))
    }

    /// Sets a cart line's quantity. Zero or less removes the line; more
    /// than the current stock is rejected and the line stays unchanged.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> AppResult<()> {
        self.require_shopping()?;
        debug!(product_id, quantity, "update cart quantity");

        let product = self
            .products
            .find(product_id)
            .ok_or_else(|| AppError::not_found("Product", product_id))?;

        self.cart
            .set_quantity(&product, quantity)
            .map_err(|e| self.reject(e))
    }

    /// Removes a cart line. Absent lines are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str) -> AppResult<()> {
        self.require_shopping()?;
        self.cart.remove(product_id);
        Ok(())
    }

    /// Current cart totals.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Completes the sale.
    ///
    /// Decrements stock for every cart line and persists the product
    /// collection, then appends the sale record. Stock is re-checked here
    /// against the freshly loaded collection, so a quantity that no longer
    /// fits is rejected rather than driven negative.
    pub fn checkout(&mut self) -> AppResult<Sale> {
        self.require_shopping()?;

        if self.cart.is_empty() {
            return Err(self.reject(CoreError::EmptyCart));
        }

        if let Err(e) = validate_customer(&self.customer) {
            self.notifications.error(e.to_string());
            return Err(e.into());
        }

        let mut products = self.products.load();
        for item in self.cart.items() {
            match products.iter_mut().find(|p| p.id == item.product_id) {
                Some(product) => {
                    if item.quantity > product.quantity {
                        return Err(self.reject(CoreError::InsufficientStock {
                            name: product.name.clone(),
                            available: product.quantity,
                            requested: item.quantity,
                        }));
                    }
                    product.quantity -= item.quantity;
                }
                None => {
                    // Deleted while the cart was open; nothing to decrement,
                    // the sale still records the frozen snapshot
                    warn!(product_id = %item.product_id, "cart line no longer matches a product");
                }
            }
        }

        let sale = Sale {
            id: ident::generate_id(),
            invoice_number: self.invoice_number.clone(),
            date: Utc::now(),
            customer: self.customer.clone(),
            items: self.cart.items().to_vec(),
            subtotal: self.cart.subtotal(),
            tax: self.cart.tax(),
            total: self.cart.total(),
        };

        self.persist_products(&products)?;
        self.sales.append(&sale).map_err(|e| {
            let err: AppError = e.into();
            self.notifications.error(err.message.clone());
            err
        })?;

        info!(invoice = %sale.invoice_number, total = sale.total, "checkout complete");

        self.phase = BillingPhase::Invoice;
        self.last_sale = Some(sale.clone());
        // Ready for the next sale as soon as the operator leaves the receipt
        self.invoice_number = ident::generate_invoice_number();

        Ok(sale)
    }

    /// Leaves the receipt view and resets the session for the next sale.
    pub fn new_sale(&mut self) {
        self.cart.clear();
        self.customer = Customer::default();
        self.last_sale = None;
        self.phase = BillingPhase::Shopping;
    }

    /// The rendered receipt; present only in the Invoice phase.
    pub fn invoice_view(&self) -> Option<InvoiceView> {
        if self.phase != BillingPhase::Invoice {
            return None;
        }
        let sale = self.last_sale.as_ref()?;
        let categories = self.categories.load();

        let lines = sale
            .items
            .iter()
            .map(|item| InvoiceLine {
                name: item.name.clone(),
                category: categories
                    .iter()
                    .find(|c| c.id == item.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                price: item.price,
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        Some(InvoiceView {
            invoice_number: sale.invoice_number.clone(),
            date: sale.date,
            customer_name: sale.customer.display_name().to_string(),
            customer_phone: sale.customer.phone.clone(),
            customer_email: sale.customer.email.clone(),
            lines,
            subtotal: sale.subtotal,
            tax: sale.tax,
            total: sale.total,
        })
    }

    fn require_shopping(&self) -> AppResult<()> {
        match self.phase {
            BillingPhase::Shopping => Ok(()),
            BillingPhase::Invoice => Err(AppError::new(
                ErrorCode::CartError,
                "Sale is complete; start a new sale first",
            )),
        }
    }

    fn reject(&self, err: CoreError) -> AppError {
        self.notifications.error(err.to_string());
        err.into()
    }

    fn persist_products(&self, products: &[Product]) -> AppResult<()> {
        self.products.save(products).map_err(|e| {
            let err: AppError = e.into();
            self.notifications.error(err.message.clone());
            err
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tillbook_core::Category;

    fn product(id: &str, name: &str, price: f64, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            category_id: "c1".to_string(),
            price,
            quantity,
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    struct Fixture {
        storage: Arc<Storage>,
        notifications: Arc<NotificationCenter>,
        _dir: tempfile::TempDir,
    }

    fn fixture(products: &[Product]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        ProductRepository::new(storage.clone()).save(products).unwrap();
        CategoryRepository::new(storage.clone())
            .save(&[Category {
                id: "c1".to_string(),
                name: "Grocery".to_string(),
                description: None,
                created_at: Utc::now(),
                updated_at: None,
            }])
            .unwrap();
        Fixture {
            storage,
            notifications: Arc::new(NotificationCenter::new()),
            _dir: dir,
        }
    }

    fn controller(fx: &Fixture) -> BillingController {
        BillingController::new(fx.storage.clone(), fx.notifications.clone())
    }

    #[test]
    fn test_full_checkout_flow() {
        let fx = fixture(&[
            product("p1", "Milk", 10.0, 10),
            product("p2", "Bread", 5.0, 10),
        ]);
        let mut billing = controller(&fx);
        let pending_invoice = billing.invoice_number().to_string();

        billing.add_to_cart("p1").unwrap();
        billing.update_quantity("p1", 2).unwrap();
        billing.add_to_cart("p2").unwrap();

        let totals = billing.totals();
        assert_eq!(totals.subtotal, 25.0);
        assert_eq!(totals.tax, 1.75);
        assert_eq!(totals.total, 26.75);

        let sale = billing.checkout().unwrap();
        assert_eq!(sale.invoice_number, pending_invoice);
        assert_eq!(sale.total, 26.75);
        assert_eq!(billing.phase(), BillingPhase::Invoice);
        // the next sale gets a fresh number
        assert_ne!(billing.invoice_number(), pending_invoice);

        // stock decremented and persisted
        let products = ProductRepository::new(fx.storage.clone()).load();
        assert_eq!(products.iter().find(|p| p.id == "p1").unwrap().quantity, 8);
        assert_eq!(products.iter().find(|p| p.id == "p2").unwrap().quantity, 9);

        // one sale appended
        let sales = SaleRepository::new(fx.storage.clone()).load();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].items.len(), 2);

        // receipt resolves category names
        let view = billing.invoice_view().unwrap();
        assert_eq!(view.customer_name, "Walk-in Customer");
        assert_eq!(view.lines[0].category, "Grocery");

        billing.new_sale();
        assert_eq!(billing.phase(), BillingPhase::Shopping);
        assert!(billing.cart().is_empty());
        assert!(billing.invoice_view().is_none());
    }

    #[test]
    fn test_add_rejected_beyond_stock() {
        // Grocery scenario: price 2.00, 3 in stock, a 4th unit must not fit
        let fx = fixture(&[product("p1", "Eggs", 2.0, 3)]);
        let mut billing = controller(&fx);

        for _ in 0..3 {
            billing.add_to_cart("p1").unwrap();
        }
        let err = billing.add_to_cart("p1").unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // cart unchanged, stock untouched
        assert_eq!(billing.cart().items()[0].quantity, 3);
        let stock = ProductRepository::new(fx.storage.clone()).find("p1").unwrap();
        assert_eq!(stock.quantity, 3);
        assert!(!fx.notifications.active().is_empty());
    }

    #[test]
    fn test_out_of_stock_product_cannot_be_added() {
        let fx = fixture(&[product("p1", "Eggs", 2.0, 0)]);
        let mut billing = controller(&fx);

        let err = billing.add_to_cart("p1").unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(billing.cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let fx = fixture(&[product("p1", "Eggs", 2.0, 3)]);
        let mut billing = controller(&fx);

        let err = billing.checkout().unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(SaleRepository::new(fx.storage.clone()).load().is_empty());
    }

    #[test]
    fn test_checkout_rechecks_stock() {
        let fx = fixture(&[product("p1", "Eggs", 2.0, 3)]);
        let mut billing = controller(&fx);

        billing.add_to_cart("p1").unwrap();
        billing.update_quantity("p1", 3).unwrap();

        // stock shrinks behind the session's back
        let repo = ProductRepository::new(fx.storage.clone());
        repo.save(&[product("p1", "Eggs", 2.0, 1)]).unwrap();

        let err = billing.checkout().unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // rejected, not clamped: nothing was persisted
        assert_eq!(repo.find("p1").unwrap().quantity, 1);
        assert!(SaleRepository::new(fx.storage.clone()).load().is_empty());
        assert_eq!(billing.phase(), BillingPhase::Shopping);
    }

    #[test]
    fn test_sale_items_are_frozen_snapshots() {
        let fx = fixture(&[product("p1", "Milk", 3.99, 10)]);
        let mut billing = controller(&fx);

        billing.add_to_cart("p1").unwrap();
        let sale = billing.checkout().unwrap();

        // reprice the product after the sale
        let repo = ProductRepository::new(fx.storage.clone());
        let mut changed = repo.load();
        changed[0].price = 9.99;
        changed[0].name = "Premium Milk".to_string();
        repo.save(&changed).unwrap();

        let recorded = &SaleRepository::new(fx.storage.clone()).load()[0];
        assert_eq!(recorded.items[0].price, 3.99);
        assert_eq!(recorded.items[0].name, "Milk");
        assert_eq!(recorded.total, sale.total);
    }

    #[test]
    fn test_invoice_phase_blocks_cart_edits() {
        let fx = fixture(&[product("p1", "Milk", 3.99, 10)]);
        let mut billing = controller(&fx);

        billing.add_to_cart("p1").unwrap();
        billing.checkout().unwrap();

        assert_eq!(billing.add_to_cart("p1").unwrap_err().code, ErrorCode::CartError);
        assert_eq!(
            billing.update_quantity("p1", 2).unwrap_err().code,
            ErrorCode::CartError
        );

        billing.new_sale();
        assert!(billing.add_to_cart("p1").is_ok());
    }

    #[test]
    fn test_customer_name_requires_phone() {
        let fx = fixture(&[product("p1", "Milk", 3.99, 10)]);
        let mut billing = controller(&fx);

        billing.add_to_cart("p1").unwrap();
        billing.set_customer(Customer {
            name: Some("Ada".to_string()),
            ..Customer::default()
        });

        let err = billing.checkout().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        billing.set_customer(Customer {
            name: Some("Ada".to_string()),
            phone: Some("555-123-4567".to_string()),
            ..Customer::default()
        });
        let sale = billing.checkout().unwrap();
        assert_eq!(sale.customer.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let fx = fixture(&[product("p1", "Milk", 3.99, 10)]);
        let mut billing = controller(&fx);

        billing.add_to_cart("p1").unwrap();
        billing.update_quantity("p1", 0).unwrap();
        assert!(billing.cart().is_empty());
    }
}
