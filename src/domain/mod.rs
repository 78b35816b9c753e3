//! Domain types for the media catalog.
//!
//! This module contains the core data structures:
//! - Item: a book, DVD or CD with its borrow status
//! - ValidationError: contract violations on construction and borrowing

pub mod error;
pub mod item;

// Re-export commonly used types
pub use error::ValidationError;
pub use item::{Item, ItemKind, ItemStatus, ItemType};
