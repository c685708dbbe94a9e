//! # Sale Repository
//!
//! The sales collection is append-only: checkout appends one record, and
//! nothing in the system edits or deletes past sales.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::StoreResult;
use crate::kv::{Storage, SALES};
use tillbook_core::Sale;

/// Repository for the sale collection.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    storage: Arc<Storage>,
}

impl SaleRepository {
    /// Creates a new SaleRepository over a shared store.
    pub fn new(storage: Arc<Storage>) -> Self {
        SaleRepository { storage }
    }

    /// Loads the full sales history.
    pub fn load(&self) -> Vec<Sale> {
        self.storage.get(SALES)
    }

    /// Overwrites the full sales history (seeding only; the application
    /// path is [`append`](Self::append)).
    pub fn save(&self, sales: &[Sale]) -> StoreResult<()> {
        debug!(count = sales.len(), "saving sales");
        self.storage.set(SALES, sales)
    }

    /// Appends one sale to the history.
    pub fn append(&self, sale: &Sale) -> StoreResult<()> {
        let mut sales = self.load();
        sales.push(sale.clone());
        self.storage.set(SALES, &sales)?;
        info!(invoice = %sale.invoice_number, total = sale.total, "recorded sale");
        Ok(())
    }
}
