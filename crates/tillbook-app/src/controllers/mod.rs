//! # Page Controllers
//!
//! One controller per screen, each following the same shape: load the full
//! collection(s) from the store, apply the user's edit to a working copy,
//! and write the whole collection back on every committed change.
//!
//! ```text
//! controllers/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── categories.rs ◄─── Category CRUD with referential delete check
//! ├── inventory.rs  ◄─── Product CRUD, filtering, low stock, CSV export
//! ├── billing.rs    ◄─── Cart, checkout, invoice view
//! ├── insights.rs   ◄─── Report aggregation over sales
//! └── home.rs       ◄─── Dashboard stat cards
//! ```
//!
//! User-visible outcomes (saved / rejected / failed to persist) go through
//! the shared [`NotificationCenter`](crate::notify::NotificationCenter);
//! typed errors carry the same information to programmatic callers.

pub mod billing;
pub mod categories;
pub mod home;
pub mod insights;
pub mod inventory;

pub use billing::{BillingController, BillingPhase, InvoiceLine, InvoiceView};
pub use categories::{CategoriesController, CategoryDraft};
pub use home::{DashboardStats, HomeController};
pub use insights::{InsightsController, InsightsQuery, InsightsReport};
pub use inventory::{InventoryController, ProductDraft, ProductFilter};
