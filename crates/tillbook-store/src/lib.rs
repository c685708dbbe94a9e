//! # tillbook-store: Persistence Layer for Tillbook
//!
//! This crate persists the three business collections (categories,
//! products, sales) plus the UI theme preference as whole-document JSON
//! under fixed keys in a data directory.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Tillbook Data Flow                          │
//! │                                                                 │
//! │  Controller (e.g. CategoriesController::create)                 │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                tillbook-store (THIS CRATE)                │  │
//! │  │                                                           │  │
//! │  │   ┌────────────┐   ┌────────────────┐   ┌─────────────┐  │  │
//! │  │   │  Storage   │   │  Repositories  │   │    ident    │  │  │
//! │  │   │  (kv.rs)   │◄──│ category.rs    │   │ ids / SKUs  │  │  │
//! │  │   │            │   │ product.rs     │   │ invoice nos │  │  │
//! │  │   │ get / set  │   │ sale.rs        │   └─────────────┘  │  │
//! │  │   └────────────┘   └────────────────┘                    │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  <data dir>/categories.json, products.json, sales.json, ...     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//! Reads return the full collection (empty when absent or corrupt, never an
//! error); writes replace the full document. A failed write leaves the
//! previously persisted document untouched. There are no partial updates.
//!
//! ## Modules
//!
//! - [`kv`] - The key-value document store
//! - [`repository`] - Typed collection repositories
//! - [`ident`] - Identifier generation (ids, SKUs, invoice numbers)
//! - [`theme`] - UI theme preference
//! - [`seed`] - Demo catalog and sample sales
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ident;
pub mod kv;
pub mod repository;
pub mod seed;
pub mod theme;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::Storage;
pub use theme::Theme;

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
