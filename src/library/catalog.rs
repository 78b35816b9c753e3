//! Catalog of all items on the shelf.
//!
//! An ordered list searched with a linear scan. Items keep insertion order and
//! duplicate identifiers are allowed.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::store::{self, StoreError};
use crate::domain::error::require_str;
use crate::domain::{Item, ItemType, ValidationError};

/// Failure from a catalog save or load
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered collection of items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the catalog stored at `path`, or an empty one if the file does not exist
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        match catalog.load(path) {
            Ok(()) => Ok(catalog),
            Err(CatalogError::Store(StoreError::NotFound { .. })) => {
                debug!(path = %path.display(), "No catalog file yet, starting empty");
                Ok(catalog)
            }
            Err(e) => Err(e),
        }
    }

    /// Append an item. No duplicate check is made.
    pub fn add(&mut self, item: Item) {
        debug!(id = %item.unique_identifier(), "Adding item");
        self.items.push(item);
    }

    /// All items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose searchable attributes contain `term`, ignoring case.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Item> {
        let term = term.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                item.searchable_attributes()
                    .iter()
                    .any(|attr| attr.contains(&term))
            })
            .collect()
    }

    /// First item whose identifier equals `id` exactly
    pub fn find_by_identifier(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.unique_identifier() == id)
    }

    fn find_by_identifier_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.unique_identifier() == id)
    }

    /// Items of a single type
    pub fn filter_by_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.item_type() == item_type)
            .collect()
    }

    /// Lend the item with identifier `id`.
    ///
    /// Returns `Ok(false)` when no such item exists or it is already borrowed.
    pub fn borrow(&mut self, id: &str, name: &str, contact: &str) -> Result<bool, ValidationError> {
        require_str("Identifier", id)?;
        require_str("Borrower name", name)?;
        require_str("Borrower contact", contact)?;

        match self.find_by_identifier_mut(id) {
            Some(item) if item.is_available() => {
                item.borrow(name, contact)?;
                debug!(%id, "Item borrowed");
                Ok(true)
            }
            Some(_) => {
                debug!(%id, "Borrow refused, item already out");
                Ok(false)
            }
            None => {
                debug!(%id, "Borrow refused, no such item");
                Ok(false)
            }
        }
    }

    /// Take back the item with identifier `id`.
    ///
    /// Returns `Ok(false)` when no such item exists or it is not borrowed.
    pub fn return_item(&mut self, id: &str) -> Result<bool, ValidationError> {
        require_str("Identifier", id)?;

        match self.find_by_identifier_mut(id) {
            Some(item) if !item.is_available() => {
                item.return_item();
                debug!(%id, "Item returned");
                Ok(true)
            }
            _ => {
                debug!(%id, "Return refused");
                Ok(false)
            }
        }
    }

    /// Write the whole catalog to `dest`
    pub fn save(&self, dest: &Path) -> Result<(), CatalogError> {
        require_path(dest)?;
        store::write_catalog(dest, &self.items)?;
        Ok(())
    }

    /// Replace the contents with the catalog stored at `src`.
    ///
    /// On any failure the current contents are left as they were.
    pub fn load(&mut self, src: &Path) -> Result<(), CatalogError> {
        require_path(src)?;
        let items = store::read_catalog(src)?;
        self.items = items;
        Ok(())
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn require_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        Err(ValidationError::empty("Filename"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(Item::book("1984", "George Orwell", "0451524934").unwrap());
        catalog.add(Item::dvd("Inception", "Sci-Fi", "Christopher Nolan").unwrap());
        catalog.add(Item::cd("Thriller", "Michael Jackson", "Pop").unwrap());
        catalog
    }

    #[test]
    fn test_catalog_add_and_find() {
        let catalog = sample_catalog();

        assert_eq!(catalog.len(), 3);
        let found = catalog.find_by_identifier("0451524934").unwrap();
        assert_eq!(found.title(), "1984");
        assert!(catalog.find_by_identifier("missing").is_none());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let catalog = sample_catalog();

        assert!(catalog
            .find_by_identifier("Inception_Christopher Nolan")
            .is_some());
        assert!(catalog
            .find_by_identifier("inception_christopher nolan")
            .is_none());
    }

    #[test]
    fn test_duplicates_allowed_first_wins() {
        let mut catalog = Catalog::new();
        catalog.add(Item::cd("Greatest Hits", "Queen", "Rock").unwrap());
        catalog.add(Item::cd("Greatest Hits", "Queen", "Classic Rock").unwrap());

        assert_eq!(catalog.len(), 2);
        let found = catalog.find_by_identifier("Greatest Hits_Queen").unwrap();
        assert_eq!(found.searchable_attributes()[2], "rock");
    }

    #[test]
    fn test_catalog_search() {
        let catalog = sample_catalog();

        // Search by title
        let results = catalog.search("thrill");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title(), "Thriller");

        // Search by type field
        let results = catalog.search("nolan");
        assert_eq!(results.len(), 1);

        // Case insensitive
        let results = catalog.search("ORWELL");
        assert_eq!(results.len(), 1);

        // No match
        assert!(catalog.search("python").is_empty());
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let catalog = sample_catalog();
        let titles: Vec<_> = catalog.search("").iter().map(|i| i.title()).collect();

        assert_eq!(titles, vec!["1984", "Inception", "Thriller"]);
    }

    #[test]
    fn test_search_lists_each_item_once() {
        let mut catalog = Catalog::new();
        catalog.add(Item::cd("Pop Hits", "Pop Stars", "Pop").unwrap());

        assert_eq!(catalog.search("pop").len(), 1);
    }

    #[test]
    fn test_filter_by_type() {
        let mut catalog = sample_catalog();
        catalog.add(Item::book("Dune", "Frank Herbert", "0441172717").unwrap());

        assert_eq!(catalog.filter_by_type(ItemType::Book).len(), 2);
        assert_eq!(catalog.filter_by_type(ItemType::Dvd).len(), 1);
        assert_eq!(catalog.filter_by_type(ItemType::Cd).len(), 1);
    }

    #[test]
    fn test_borrow_flow() {
        let mut catalog = sample_catalog();

        assert!(catalog.borrow("0451524934", "Alice", "alice@example.com").unwrap());
        let book = catalog.find_by_identifier("0451524934").unwrap();
        assert!(!book.is_available());
        assert_eq!(book.borrower_name(), "Alice");

        // Already borrowed: refused, borrower unchanged
        assert!(!catalog.borrow("0451524934", "Bob", "bob@example.com").unwrap());
        let book = catalog.find_by_identifier("0451524934").unwrap();
        assert_eq!(book.borrower_name(), "Alice");

        // Unknown identifier
        assert!(!catalog.borrow("missing", "Bob", "bob@example.com").unwrap());
    }

    #[test]
    fn test_borrow_validates_arguments() {
        let mut catalog = sample_catalog();

        assert!(catalog.borrow("", "Alice", "a@example.com").is_err());
        assert!(catalog.borrow("0451524934", "", "a@example.com").is_err());
        assert!(catalog.borrow("0451524934", "Alice", "").is_err());
        assert!(catalog.find_by_identifier("0451524934").unwrap().is_available());
    }

    #[test]
    fn test_return_flow() {
        let mut catalog = sample_catalog();
        let id = "Thriller_Michael Jackson";

        // Not borrowed yet
        assert!(!catalog.return_item(id).unwrap());

        assert!(catalog.borrow(id, "Alice", "alice@example.com").unwrap());
        assert!(catalog.return_item(id).unwrap());

        let cd = catalog.find_by_identifier(id).unwrap();
        assert!(cd.is_available());
        assert_eq!(cd.borrower_name(), "");
        assert_eq!(cd.borrower_contact(), "");

        assert!(!catalog.return_item("missing").unwrap());
        assert!(catalog.return_item("").is_err());
    }

    #[test]
    fn test_save_and_load_reject_empty_path() {
        let mut catalog = sample_catalog();

        assert!(matches!(
            catalog.save(Path::new("")),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            catalog.load(Path::new("")),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(catalog.len(), 3);
    }
}
