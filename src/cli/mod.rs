//! Command-line interface for mediashelf.
//!
//! Provides one-shot commands for adding, searching, borrowing and returning
//! items, plus the interactive `shell` menu (the default when no command is
//! given).

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::{self, Overrides, ResolvedConfig};
use crate::domain::{Item, ItemKind, ItemType};
use crate::library::Catalog;

pub mod shell;

pub use shell::Shell;

/// mediashelf - Catalog manager for books, DVDs and CDs
#[derive(Parser, Debug)]
#[command(name = "mediashelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file to use instead of the configured one
    #[arg(long, global = true, env = "MEDIASHELF_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// State directory (default ~/.mediashelf)
    #[arg(long, global = true, env = "MEDIASHELF_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu
    Shell,

    /// Add an item to the catalog
    Add {
        #[command(subcommand)]
        item: AddCommands,
    },

    /// Search titles, authors, artists, genres, directors and ISBNs
    Search {
        /// Search term (case-insensitive; empty matches everything)
        term: String,
    },

    /// Borrow an item
    Borrow {
        /// Item identifier (ISBN, title_director or title_artist)
        id: String,

        /// Borrower name
        #[arg(long)]
        name: String,

        /// Borrower contact information
        #[arg(long)]
        contact: String,
    },

    /// Return a borrowed item
    Return {
        /// Item identifier
        id: String,
    },

    /// List items in the catalog
    List {
        /// Only show items of this type
        #[arg(short = 't', long = "type", value_enum)]
        item_type: Option<TypeArg>,

        /// Maximum number of items to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show details of one item
    Show {
        /// Item identifier
        id: String,
    },

    /// Save the catalog to another file
    Export {
        /// Destination file
        dest: PathBuf,
    },

    /// Replace the catalog with the contents of a file
    Import {
        /// Source file
        src: PathBuf,
    },

    /// Show resolved configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Add a book
    Book {
        title: String,
        author: String,
        isbn: String,
    },

    /// Add a DVD
    Dvd {
        title: String,
        genre: String,
        director: String,
    },

    /// Add a CD
    Cd {
        title: String,
        artist: String,
        genre: String,
    },
}

impl AddCommands {
    fn into_item(self) -> Result<Item> {
        let (title, kind) = match self {
            AddCommands::Book {
                title,
                author,
                isbn,
            } => (title, ItemKind::Book { author, isbn }),
            AddCommands::Dvd {
                title,
                genre,
                director,
            } => (title, ItemKind::Dvd { genre, director }),
            AddCommands::Cd {
                title,
                artist,
                genre,
            } => (title, ItemKind::Cd { artist, genre }),
        };

        Ok(Item::new(title, kind)?)
    }
}

/// Item type for CLI (maps to ItemType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Book,
    Dvd,
    Cd,
}

impl From<TypeArg> for ItemType {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::Book => ItemType::Book,
            TypeArg::Dvd => ItemType::Dvd,
            TypeArg::Cd => ItemType::Cd,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let cfg = config::load_config(Overrides {
            home: self.home,
            catalog: self.catalog,
        })?;
        debug!(catalog = %cfg.catalog.display(), "Resolved catalog file");

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => run_shell(&cfg),
            Commands::Add { item } => add_item(&cfg, item),
            Commands::Search { term } => search_items(&cfg, &term),
            Commands::Borrow { id, name, contact } => borrow_item(&cfg, &id, &name, &contact),
            Commands::Return { id } => return_item(&cfg, &id),
            Commands::List { item_type, limit } => list_items(&cfg, item_type, limit),
            Commands::Show { id } => show_item(&cfg, &id),
            Commands::Export { dest } => export_catalog(&cfg, &dest),
            Commands::Import { src } => import_catalog(&cfg, &src),
            Commands::Config => show_config(&cfg),
        }
    }
}

fn open_catalog(cfg: &ResolvedConfig) -> Result<Catalog> {
    Catalog::open(&cfg.catalog)
        .with_context(|| format!("Failed to open catalog: {}", cfg.catalog.display()))
}

fn save_catalog(cfg: &ResolvedConfig, catalog: &Catalog) -> Result<()> {
    catalog
        .save(&cfg.catalog)
        .with_context(|| format!("Failed to save catalog: {}", cfg.catalog.display()))
}

/// Run the interactive menu against the configured catalog
fn run_shell(cfg: &ResolvedConfig) -> Result<()> {
    let mut catalog = open_catalog(cfg)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut catalog, stdin.lock(), stdout.lock())
        .run()
        .context("Console I/O failed")?;

    if cfg.shell.autosave {
        save_catalog(cfg, &catalog)?;
    }

    Ok(())
}

fn add_item(cfg: &ResolvedConfig, item: AddCommands) -> Result<()> {
    let item = item.into_item()?;
    let mut catalog = open_catalog(cfg)?;

    let label = item.item_type().label();
    let id = item.unique_identifier();
    catalog.add(item);
    save_catalog(cfg, &catalog)?;

    println!("{} added successfully.", label);
    println!("  ID: {}", id);
    Ok(())
}

fn search_items(cfg: &ResolvedConfig, term: &str) -> Result<()> {
    let catalog = open_catalog(cfg)?;
    let results = catalog.search(term);

    if results.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    println!("Found {} item(s) for \"{}\":\n", results.len(), term);
    for item in results {
        println!("{}", item);
    }

    Ok(())
}

fn borrow_item(cfg: &ResolvedConfig, id: &str, name: &str, contact: &str) -> Result<()> {
    let mut catalog = open_catalog(cfg)?;

    if catalog.borrow(id, name, contact)? {
        save_catalog(cfg, &catalog)?;
        println!("Item borrowed successfully.");
    } else {
        println!("Item could not be borrowed. It might be unavailable or not found.");
    }

    Ok(())
}

fn return_item(cfg: &ResolvedConfig, id: &str) -> Result<()> {
    let mut catalog = open_catalog(cfg)?;

    if catalog.return_item(id)? {
        save_catalog(cfg, &catalog)?;
        println!("Item returned successfully.");
    } else {
        println!("Item could not be returned. It might not be borrowed or not found.");
    }

    Ok(())
}

fn list_items(cfg: &ResolvedConfig, item_type: Option<TypeArg>, limit: Option<usize>) -> Result<()> {
    let catalog = open_catalog(cfg)?;

    if catalog.is_empty() {
        println!("Catalog is empty. Use 'mediashelf add' to add items.");
        return Ok(());
    }

    let items: Vec<&Item> = match item_type {
        Some(t) => catalog.filter_by_type(t.into()),
        None => catalog.items().iter().collect(),
    };
    let shown = limit.unwrap_or(items.len());

    println!("{:<36} {:<5} {:<10} {:<40}", "ID", "TYPE", "STATUS", "TITLE");
    println!("{}", "-".repeat(94));

    for item in items.iter().take(shown) {
        println!(
            "{:<36} {:<5} {:<10} {:<40}",
            truncate(&item.unique_identifier(), 36),
            item.item_type().to_string(),
            item.status().to_string(),
            truncate(item.title(), 40)
        );
    }

    println!("\nTotal: {} items", catalog.len());

    Ok(())
}

fn show_item(cfg: &ResolvedConfig, id: &str) -> Result<()> {
    let catalog = open_catalog(cfg)?;
    let item = catalog
        .find_by_identifier(id)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    println!("ID:      {}", item.unique_identifier());
    println!("Type:    {}", item.item_type().label());
    println!("Title:   {}", item.title());
    match item.kind() {
        ItemKind::Book { author, isbn } => {
            println!("Author:  {}", author);
            println!("ISBN:    {}", isbn);
        }
        ItemKind::Dvd { genre, director } => {
            println!("Genre:   {}", genre);
            println!("Director: {}", director);
        }
        ItemKind::Cd { artist, genre } => {
            println!("Artist:  {}", artist);
            println!("Genre:   {}", genre);
        }
    }
    println!("Status:  {}", item.status());
    if !item.is_available() {
        println!("Borrower: {} ({})", item.borrower_name(), item.borrower_contact());
    }

    Ok(())
}

fn export_catalog(cfg: &ResolvedConfig, dest: &Path) -> Result<()> {
    let catalog = open_catalog(cfg)?;
    catalog
        .save(dest)
        .with_context(|| format!("Failed to export catalog to {}", dest.display()))?;

    println!("Exported {} items to {}", catalog.len(), dest.display());
    Ok(())
}

fn import_catalog(cfg: &ResolvedConfig, src: &Path) -> Result<()> {
    let mut catalog = Catalog::new();
    catalog
        .load(src)
        .with_context(|| format!("Failed to import catalog from {}", src.display()))?;
    save_catalog(cfg, &catalog)?;

    println!("Imported {} items from {}", catalog.len(), src.display());
    Ok(())
}

fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Catalog: {}", cfg.catalog.display());
    println!();
    println!("Shell:");
    println!("  Autosave on quit: {}", cfg.shell.autosave);

    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very ...");
    }

    #[test]
    fn test_cli_parses_borrow() {
        let cli = Cli::try_parse_from([
            "mediashelf",
            "borrow",
            "0451524934",
            "--name",
            "Alice",
            "--contact",
            "alice@example.com",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Borrow { id, name, contact }) => {
                assert_eq!(id, "0451524934");
                assert_eq!(name, "Alice");
                assert_eq!(contact, "alice@example.com");
            }
            other => panic!("Expected borrow command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_command_defaults_to_shell() {
        let cli = Cli::try_parse_from(["mediashelf"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_command_builds_item() {
        let cli = Cli::try_parse_from([
            "mediashelf",
            "add",
            "dvd",
            "Inception",
            "Sci-Fi",
            "Christopher Nolan",
        ])
        .unwrap();

        let Some(Commands::Add { item }) = cli.command else {
            panic!("Expected add command");
        };
        let item = item.into_item().unwrap();
        assert_eq!(item.unique_identifier(), "Inception_Christopher Nolan");
    }

    #[test]
    fn test_add_command_rejects_empty_field() {
        let cli = Cli::try_parse_from(["mediashelf", "add", "cd", "Thriller", "", "Pop"]).unwrap();

        let Some(Commands::Add { item }) = cli.command else {
            panic!("Expected add command");
        };
        assert!(item.into_item().is_err());
    }
}
