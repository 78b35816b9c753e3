//! mediashelf - Catalog manager for books, DVDs and CDs
//!
//! Keeps an ordered catalog of items in memory, supports case-insensitive
//! search, borrow/return tracking, and saves the whole catalog to a single
//! JSON file.
//!
//! # Modules
//!
//! - `domain`: Item types and validation errors
//! - `library`: Catalog operations and file persistence
//! - `config`: Path resolution (env, config file, defaults)
//! - `cli`: Command-line interface and interactive shell
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! mediashelf add book "1984" "George Orwell" 0451524934
//!
//! # Search and borrow
//! mediashelf search orwell
//! mediashelf borrow 0451524934 --name Alice --contact alice@example.com
//!
//! # Interactive menu
//! mediashelf shell
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Item, ItemKind, ItemStatus, ItemType, ValidationError};
pub use library::{Catalog, CatalogError, StoreError};
