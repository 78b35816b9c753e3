//! Catalog management and persistence.
//!
//! The catalog lives in memory and is written to disk as a single JSON file:
//!
//! ```text
//! ~/.mediashelf/
//! └── catalog.json    # { version, saved_at, items: [...] }
//! ```
//!
//! Each item record carries a `type` tag (`book`, `dvd`, `cd`) ahead of its
//! fields so the right variant comes back on load.

pub mod catalog;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use store::StoreError;
