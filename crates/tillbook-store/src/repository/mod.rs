//! # Repositories
//!
//! Typed access to the three business collections.
//!
//! ```text
//! repository/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── category.rs  ◄─── Category collection
//! ├── product.rs   ◄─── Product collection + low-stock filter
//! └── sale.rs      ◄─── Sale collection (append-only)
//! ```
//!
//! Every repository follows the same whole-collection shape: `load` reads
//! everything, `save` overwrites everything. Mutation logic (validate, edit
//! a working copy, write back) lives in the controllers.

pub mod category;
pub mod product;
pub mod sale;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
