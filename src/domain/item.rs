//! Catalog items and their borrow lifecycle.
//!
//! An item is one physical media unit. The shared fields (title, status,
//! borrower) live on [`Item`]; the variant-specific fields live on the closed
//! [`ItemKind`] enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{require, require_str, ValidationError};

/// Borrow status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// On the shelf
    #[default]
    Available,

    /// Lent out to a borrower
    Borrowed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "available"),
            ItemStatus::Borrowed => write!(f, "borrowed"),
        }
    }
}

/// Variant-specific fields, tagged by `type` when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Book { author: String, isbn: String },
    Dvd { genre: String, director: String },
    Cd { artist: String, genre: String },
}

impl ItemKind {
    /// Type discriminant without the fields
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Book { .. } => ItemType::Book,
            ItemKind::Dvd { .. } => ItemType::Dvd,
            ItemKind::Cd { .. } => ItemType::Cd,
        }
    }

    /// Field values in declaration order
    fn fields(&self) -> [(&'static str, &str); 2] {
        match self {
            ItemKind::Book { author, isbn } => {
                [("Author", author.as_str()), ("ISBN", isbn.as_str())]
            }
            ItemKind::Dvd { genre, director } => {
                [("Genre", genre.as_str()), ("Director", director.as_str())]
            }
            ItemKind::Cd { artist, genre } => {
                [("Artist", artist.as_str()), ("Genre", genre.as_str())]
            }
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in self.fields() {
            require_str(name, value)?;
        }
        Ok(())
    }
}

/// Type of item, used for filtering and user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Book,
    Dvd,
    Cd,
}

impl ItemType {
    /// Human-facing name ("Book", "DVD", "CD")
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Book => "Book",
            ItemType::Dvd => "DVD",
            ItemType::Cd => "CD",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Book => write!(f, "book"),
            ItemType::Dvd => write!(f, "dvd"),
            ItemType::Cd => write!(f, "cd"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "book" => Ok(ItemType::Book),
            "dvd" | "movie" => Ok(ItemType::Dvd),
            "cd" | "album" => Ok(ItemType::Cd),
            _ => anyhow::bail!("Unknown item type: {}", s),
        }
    }
}

/// A single catalog item
///
/// Identity fields are fixed at construction. Status and borrower fields only
/// change through [`Item::borrow`] and [`Item::return_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    title: String,
    kind: ItemKind,
    status: ItemStatus,
    borrower_name: String,
    borrower_contact: String,
}

impl Item {
    /// Create an available item, validating every identity field
    pub fn new(title: impl Into<String>, kind: ItemKind) -> Result<Self, ValidationError> {
        let title = require("Title", title.into())?;
        kind.validate()?;

        Ok(Self {
            title,
            kind,
            status: ItemStatus::Available,
            borrower_name: String::new(),
            borrower_contact: String::new(),
        })
    }

    /// Create a book
    pub fn book(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            title,
            ItemKind::Book {
                author: author.into(),
                isbn: isbn.into(),
            },
        )
    }

    /// Create a DVD
    pub fn dvd(
        title: impl Into<String>,
        genre: impl Into<String>,
        director: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            title,
            ItemKind::Dvd {
                genre: genre.into(),
                director: director.into(),
            },
        )
    }

    /// Create a CD
    pub fn cd(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            title,
            ItemKind::Cd {
                artist: artist.into(),
                genre: genre.into(),
            },
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    /// Borrower name, empty while the item is available
    pub fn borrower_name(&self) -> &str {
        &self.borrower_name
    }

    /// Borrower contact, empty while the item is available
    pub fn borrower_contact(&self) -> &str {
        &self.borrower_contact
    }

    /// Identifier used for lookup: the ISBN for books, `title_director` for
    /// DVDs and `title_artist` for CDs.
    ///
    /// Two different DVDs (or CDs) with the same title and director (or
    /// artist) share an identifier; lookups return the first one added.
    pub fn unique_identifier(&self) -> String {
        match &self.kind {
            ItemKind::Book { isbn, .. } => isbn.clone(),
            ItemKind::Dvd { director, .. } => format!("{}_{}", self.title, director),
            ItemKind::Cd { artist, .. } => format!("{}_{}", self.title, artist),
        }
    }

    /// Lower-cased title followed by the variant fields in declaration order
    pub fn searchable_attributes(&self) -> Vec<String> {
        std::iter::once(self.title.as_str())
            .chain(self.kind.fields().into_iter().map(|(_, value)| value))
            .map(str::to_lowercase)
            .collect()
    }

    /// Mark the item borrowed by `name`.
    ///
    /// This does not look at the current status: borrowing an item that is
    /// already out replaces the borrower. [`Catalog::borrow`] only calls it on
    /// available items.
    ///
    /// [`Catalog::borrow`]: crate::library::Catalog::borrow
    pub fn borrow(&mut self, name: &str, contact: &str) -> Result<(), ValidationError> {
        require_str("Borrower name", name)?;
        require_str("Borrower contact", contact)?;

        self.borrower_name = name.to_string();
        self.borrower_contact = contact.to_string();
        self.status = ItemStatus::Borrowed;
        Ok(())
    }

    /// Mark the item available and clear the borrower fields
    pub fn return_item(&mut self) {
        self.status = ItemStatus::Available;
        self.borrower_name.clear();
        self.borrower_contact.clear();
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}, Status: {}", self.title, self.status)?;
        for (name, value) in self.kind.fields() {
            write!(f, ", {}: {}", name, value)?;
        }
        Ok(())
    }
}

/// On-disk shape of an item. The variant tag is written first.
#[derive(Serialize, Deserialize)]
struct ItemRecord {
    #[serde(flatten)]
    kind: ItemKind,
    title: String,
    #[serde(default)]
    status: ItemStatus,
    #[serde(default)]
    borrower_name: String,
    #[serde(default)]
    borrower_contact: String,
}

impl TryFrom<ItemRecord> for Item {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let mut item = Item::new(record.title, record.kind)?;

        match record.status {
            ItemStatus::Borrowed => item.borrow(&record.borrower_name, &record.borrower_contact)?,
            ItemStatus::Available => {
                if !record.borrower_name.is_empty() || !record.borrower_contact.is_empty() {
                    return Err(ValidationError::InvalidArgument(format!(
                        "available item '{}' has borrower details",
                        item.title
                    )));
                }
            }
        }

        Ok(item)
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            kind: item.kind,
            title: item.title,
            status: item.status,
            borrower_name: item.borrower_name,
            borrower_contact: item.borrower_contact,
        }
    }
}
