//! Catalog Integration Tests
//!
//! Tests for item construction, search, and the borrow/return lifecycle
//! through the public API.

use mediashelf::{Catalog, Item, ItemStatus, ValidationError};

fn mixed_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add(Item::book("1984", "George Orwell", "0451524934").unwrap());
    catalog.add(Item::dvd("Inception", "Sci-Fi", "Christopher Nolan").unwrap());
    catalog.add(Item::cd("Thriller", "Michael Jackson", "Pop").unwrap());
    catalog.add(Item::book("Animal Farm", "George Orwell", "0451526341").unwrap());
    catalog
}

#[test]
fn test_constructors_return_what_was_passed() {
    let book = Item::book("1984", "George Orwell", "0451524934").unwrap();
    assert_eq!(book.title(), "1984");
    assert_eq!(book.unique_identifier(), "0451524934");
    assert_eq!(book.status(), ItemStatus::Available);

    let dvd = Item::dvd("Inception", "Sci-Fi", "Christopher Nolan").unwrap();
    assert_eq!(dvd.unique_identifier(), "Inception_Christopher Nolan");

    let cd = Item::cd("Thriller", "Michael Jackson", "Pop").unwrap();
    assert_eq!(cd.unique_identifier(), "Thriller_Michael Jackson");
}

#[test]
fn test_constructor_failure_is_invalid_argument() {
    let err = Item::book("1984", "George Orwell", "").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidArgument(_)));
    assert!(err.to_string().contains("ISBN"));
}

#[test]
fn test_search_matches_any_attribute_in_insertion_order() {
    let catalog = mixed_catalog();

    let titles: Vec<_> = catalog.search("george").iter().map(|i| i.title()).collect();
    assert_eq!(titles, vec!["1984", "Animal Farm"]);

    let results = catalog.search("SCI-FI");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title(), "Inception");

    // Matches an ISBN fragment
    let results = catalog.search("52634");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title(), "Animal Farm");

    assert_eq!(catalog.search("").len(), 4);
}

#[test]
fn test_borrow_return_cycle() {
    let mut catalog = mixed_catalog();
    let id = "Inception_Christopher Nolan";

    assert!(catalog.borrow(id, "John Doe", "555-0100").unwrap());
    {
        let dvd = catalog.find_by_identifier(id).unwrap();
        assert_eq!(dvd.status(), ItemStatus::Borrowed);
        assert_eq!(dvd.borrower_name(), "John Doe");
        assert_eq!(dvd.borrower_contact(), "555-0100");
    }

    // Second borrow is a business miss, not an error
    assert_eq!(catalog.borrow(id, "Jane Roe", "555-0199"), Ok(false));

    assert_eq!(catalog.return_item(id), Ok(true));
    assert_eq!(catalog.return_item(id), Ok(false));

    let dvd = catalog.find_by_identifier(id).unwrap();
    assert_eq!(dvd.status(), ItemStatus::Available);
    assert_eq!(dvd.borrower_name(), "");
    assert_eq!(dvd.borrower_contact(), "");
}

#[test]
fn test_missing_items_are_business_misses() {
    let mut catalog = mixed_catalog();

    assert_eq!(catalog.borrow("no-such-id", "A", "B"), Ok(false));
    assert_eq!(catalog.return_item("no-such-id"), Ok(false));
}

#[test]
fn test_empty_arguments_are_contract_violations() {
    let mut catalog = mixed_catalog();

    assert!(matches!(
        catalog.borrow("", "A", "B"),
        Err(ValidationError::InvalidArgument(_))
    ));
    assert!(matches!(
        catalog.borrow("0451524934", "A", ""),
        Err(ValidationError::InvalidArgument(_))
    ));
    assert!(matches!(
        catalog.return_item(""),
        Err(ValidationError::InvalidArgument(_))
    ));
}
