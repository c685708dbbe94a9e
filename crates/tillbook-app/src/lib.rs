//! # tillbook-app: Page Controllers and App Services
//!
//! The thin orchestration layer of Tillbook. Each screen of the UI maps to
//! one controller; all of them share a single [`Storage`] and a single
//! [`NotificationCenter`], wired together by [`App`].
//!
//! ## Usage
//! ```rust,no_run
//! use tillbook_app::App;
//! use tillbook_app::controllers::CategoryDraft;
//!
//! let app = App::open_default().unwrap();
//!
//! let categories = app.categories();
//! categories.create(CategoryDraft {
//!     name: "Grocery".to_string(),
//!     description: None,
//! }).unwrap();
//!
//! let mut billing = app.billing();
//! // billing.add_to_cart("...")?; billing.checkout()?;
//! ```
//!
//! ## Modules
//!
//! - [`controllers`] - One controller per screen
//! - [`notify`] - The injectable notification center
//! - [`export`] - Quoted-CSV document generation
//! - [`error`] - The unified app error type

pub mod controllers;
pub mod error;
pub mod export;
pub mod notify;

pub use error::{AppError, AppResult, ErrorCode};
pub use notify::{Notification, NotificationCenter, Severity};

use std::sync::Arc;

use controllers::{
    BillingController, CategoriesController, HomeController, InsightsController,
    InventoryController,
};
use tillbook_store::{Storage, StoreResult, Theme};

/// The assembled application: shared storage and notifications plus
/// factories for the per-screen controllers.
///
/// Controllers are created per screen visit, mirroring how each screen
/// loads its collections fresh on entry. Session-only state (the billing
/// cart) lives inside the controller instance and dies with it.
pub struct App {
    storage: Arc<Storage>,
    notifications: Arc<NotificationCenter>,
}

impl App {
    /// Opens the application over a data directory.
    pub fn open(data_dir: impl Into<std::path::PathBuf>) -> StoreResult<Self> {
        Ok(App::with_storage(Arc::new(Storage::open(data_dir)?)))
    }

    /// Opens the application over the platform data directory.
    pub fn open_default() -> StoreResult<Self> {
        Ok(App::with_storage(Arc::new(Storage::open_default()?)))
    }

    /// Wraps an existing store.
    pub fn with_storage(storage: Arc<Storage>) -> Self {
        App {
            storage,
            notifications: Arc::new(NotificationCenter::new()),
        }
    }

    /// The shared store.
    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    /// The shared notification center.
    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    /// The current UI theme preference.
    pub fn theme(&self) -> Theme {
        Theme::load(&self.storage)
    }

    /// Flips and persists the UI theme preference.
    pub fn toggle_theme(&self) -> StoreResult<Theme> {
        let theme = self.theme().toggled();
        theme.save(&self.storage)?;
        Ok(theme)
    }

    /// Controller for the Categories screen.
    pub fn categories(&self) -> CategoriesController {
        CategoriesController::new(self.storage.clone(), self.notifications.clone())
    }

    /// Controller for the Inventory screen.
    pub fn inventory(&self) -> InventoryController {
        InventoryController::new(self.storage.clone(), self.notifications.clone())
    }

    /// Controller for the Billing screen.
    pub fn billing(&self) -> BillingController {
        BillingController::new(self.storage.clone(), self.notifications.clone())
    }

    /// Controller for the Insights screen.
    pub fn insights(&self) -> InsightsController {
        InsightsController::new(self.storage.clone())
    }

    /// Controller for the Home screen.
    pub fn home(&self) -> HomeController {
        HomeController::new(self.storage.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
