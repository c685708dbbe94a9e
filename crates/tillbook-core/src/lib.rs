//! # tillbook-core: Pure Business Logic for Tillbook
//!
//! This crate is the **heart** of Tillbook, a single-operator retail
//! point-of-sale and inventory manager. It contains all business logic as
//! pure functions and plain types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Tillbook Architecture                        │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 tillbook-app (controllers)                │  │
//! │  │   Billing ── Inventory ── Categories ── Insights ── Home  │  │
//! │  └─────────────────────────────┬─────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼─────────────────────────────┐  │
//! │  │              ★ tillbook-core (THIS CRATE) ★               │  │
//! │  │                                                           │  │
//! │  │   ┌─────────┐ ┌──────────┐ ┌──────┐ ┌─────────┐ ┌──────┐  │  │
//! │  │   │  types  │ │ currency │ │ cart │ │ reports │ │rules │  │  │
//! │  │   └─────────┘ └──────────┘ └──────┘ └─────────┘ └──────┘  │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS         │  │
//! │  └─────────────────────────────┬─────────────────────────────┘  │
//! │                                │                                │
//! │  ┌─────────────────────────────▼─────────────────────────────┐  │
//! │  │              tillbook-store (persistence)                 │  │
//! │  │        whole-collection JSON documents on disk            │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, CartItem, Sale)
//! - [`currency`] - Monetary helpers (tax, cent rounding, display format)
//! - [`cart`] - Cart state with stock-aware add/update/remove
//! - [`catalog`] - Product filtering and the low-stock rule
//! - [`dates`] - Date formatting and report range arithmetic
//! - [`reports`] - Sales aggregation for the Insights screens
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod dates;
pub mod error;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{CartItem, Category, Customer, Product, Sale};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax rate applied to every cart subtotal (7%).
///
/// Hard-coded for the single-store scope; making it configurable per store
/// would only need a config surface, the math already flows through
/// [`currency::calculate_tax`].
pub const TAX_RATE: f64 = 0.07;

/// Stock level below which a product is flagged as "low stock".
///
/// Surfaced as a warning badge in the inventory list and as the low-stock
/// panel on the dashboard and insights screens.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
