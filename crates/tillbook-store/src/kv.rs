//! # Key-Value Document Store
//!
//! Whole-collection JSON persistence under fixed keys.
//!
//! ## Layout
//! ```text
//! <data dir>/
//! ├── categories.json       [ {id, name, description, createdAt, ...}, ... ]
//! ├── products.json         [ {id, name, sku, categoryId, price, ...}, ... ]
//! ├── sales.json            [ {id, invoiceNumber, items, total, ...}, ... ]
//! └── retail_app_theme      "light" | "dark"
//! ```
//!
//! ## Contract
//! - `get` returns the whole collection; absent or unparseable documents
//!   read as an empty collection (with a warning logged), never an error.
//! - `set` replaces the whole document. The write goes to a temp file that
//!   is renamed over the document, so a failed write leaves the previously
//!   persisted state untouched.
//! - No indexing, no queries, no transactions. Callers load everything and
//!   filter in memory; at this data scale that is the whole design.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collection Keys
// =============================================================================

/// Collection key for categories.
pub const CATEGORIES: &str = "categories";

/// Collection key for products.
pub const PRODUCTS: &str = "products";

/// Collection key for sales.
pub const SALES: &str = "sales";

/// Key for the UI theme preference (a bare string, not a collection).
pub const THEME: &str = "retail_app_theme";

// =============================================================================
// Storage
// =============================================================================

/// The document store: one file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Opens a store rooted at the given directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::OpenFailed {
            path: root.clone(),
            source,
        })?;
        debug!(root = %root.display(), "opened store");
        Ok(Storage { root })
    }

    /// Opens the store in the platform data directory
    /// (e.g. `~/.local/share/tillbook` on Linux).
    pub fn open_default() -> StoreResult<Self> {
        let dirs = ProjectDirs::from("com", "tillbook", "tillbook")
            .ok_or(StoreError::NoDataDir)?;
        Storage::open(dirs.data_dir())
    }

    /// The directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> PathBuf {
        if key == THEME {
            self.root.join(key)
        } else {
            self.root.join(format!("{key}.json"))
        }
    }

    // -------------------------------------------------------------------------
    // Raw access (used for the theme preference)
    // -------------------------------------------------------------------------

    /// Reads the raw document under a key, if present and readable.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.document_path(key)) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read document");
                None
            }
        }
    }

    /// Writes a raw document under a key.
    ///
    /// The contents land in a sibling temp file first and are renamed into
    /// place, so an interrupted or failed write cannot clobber the previous
    /// document.
    pub fn set_raw(&self, key: &str, contents: &str) -> StoreResult<()> {
        let path = self.document_path(key);
        let tmp = self.root.join(format!(".{key}.tmp"));

        let write = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, &path));
        write.map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StoreError::WriteFailed {
                collection: key.to_string(),
                source,
            }
        })
    }

    // -------------------------------------------------------------------------
    // Collection access
    // -------------------------------------------------------------------------

    /// Loads a whole collection.
    ///
    /// Absent documents and parse failures both read as an empty collection;
    /// a parse failure is logged so corruption is visible without taking the
    /// application down.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.get_raw(key) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key, error = %e, "collection document is corrupt, reading as empty");
                Vec::new()
            }
        }
    }

    /// Replaces a whole collection.
    pub fn set<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string(records).map_err(|source| {
            StoreError::SerializeFailed {
                collection: key.to_string(),
                source,
            }
        })?;
        self.set_raw(key, &json)?;
        debug!(key, count = records.len(), "wrote collection");
        Ok(())
    }

    /// Removes a document. Missing documents are fine.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.document_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::WriteFailed {
                collection: key.to_string(),
                source,
            }),
        }
    }

    /// Removes the three business collections (used by tests and demos;
    /// leaves the theme preference alone).
    pub fn clear_collections(&self) -> StoreResult<()> {
        self.remove(CATEGORIES)?;
        self.remove(PRODUCTS)?;
        self.remove(SALES)?;
        Ok(())
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

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: Some("demo".to_string()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_collection_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        let categories = vec![category("c1", "Grocery"), category("c2", "Electronics")];
        store.set(CATEGORIES, &categories).unwrap();

        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert_eq!(loaded, categories);
    }

    #[test]
    fn test_absent_collection_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_collection_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        store.set_raw(CATEGORIES, "{not json").unwrap();
        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_set_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        store.set(CATEGORIES, &[category("c1", "Grocery")]).unwrap();
        store.set(CATEGORIES, &[category("c2", "Electronics")]).unwrap();

        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "c2");
    }

    #[test]
    fn test_failed_write_leaves_previous_document_intact() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();
        store.set(CATEGORIES, &[category("c1", "Grocery")]).unwrap();

        // Occupy the temp path with a directory so the next write cannot land
        std::fs::create_dir(dir.path().join(".categories.tmp")).unwrap();

        let result = store.set(CATEGORIES, &[category("c2", "Electronics")]);
        assert!(matches!(result, Err(StoreError::WriteFailed { .. })));

        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert_eq!(loaded[0].id, "c1");
    }

    #[test]
    fn test_remove_missing_document_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();
        assert!(store.remove(SALES).is_ok());
    }

    #[test]
    fn test_clear_collections_keeps_theme() {
        let dir = tempfile::tempdir().unwrap();
        let store = Storage::open(dir.path()).unwrap();

        store.set(CATEGORIES, &[category("c1", "Grocery")]).unwrap();
        store.set_raw(THEME, "dark").unwrap();
        store.clear_collections().unwrap();

        let loaded: Vec<Category> = store.get(CATEGORIES);
        assert!(loaded.is_empty());
        assert_eq!(store.get_raw(THEME).as_deref(), Some("dark"));
    }
}
