//! Interactive numbered menu over a catalog.
//!
//! The shell reads from any `BufRead` and writes to any `Write`, so the same
//! loop drives a terminal session and scripted tests. End of input is treated
//! as Quit.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::warn;

use crate::domain::{Item, ItemType};
use crate::library::Catalog;

const MENU: &str = "
1) Add Item
2) Search Items
3) Borrow Item
4) Return Item
5) Export all items to file
6) Load all items from file
7) Quit";

enum Flow {
    Continue,
    Quit,
}

/// Menu-driven session bound to one catalog
pub struct Shell<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Run the menu loop until Quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            write!(self.output, "Please choose from the above options: ")?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };

            let flow = match choice.trim().parse::<u32>() {
                Ok(1) => self.add_item()?,
                Ok(2) => self.search_items()?,
                Ok(3) => self.borrow_item()?,
                Ok(4) => self.return_item()?,
                Ok(5) => self.save_to_file()?,
                Ok(6) => self.load_from_file()?,
                Ok(7) => Flow::Quit,
                Ok(_) => {
                    writeln!(
                        self.output,
                        "Invalid option. Please enter a number between 1 and 7."
                    )?;
                    Flow::Continue
                }
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Next line without its line ending, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask for a value until a non-empty one is given
    fn prompt_required(&mut self, prompt: &str, field: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", prompt)?;

        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(value) if value.is_empty() => {
                    writeln!(
                        self.output,
                        "{} cannot be empty. Please enter the {}:",
                        capitalize(field),
                        field
                    )?;
                }
                Some(value) => return Ok(Some(value)),
            }
        }
    }

    fn add_item(&mut self) -> io::Result<Flow> {
        let item_type = loop {
            writeln!(self.output, "What type of item would you like to add?")?;
            writeln!(self.output, "1. Book")?;
            writeln!(self.output, "2. DVD")?;
            writeln!(self.output, "3. CD")?;
            write!(self.output, "Enter your choice (1-3): ")?;
            self.output.flush()?;

            match self.read_line()?.as_deref().map(str::trim) {
                None => return Ok(Flow::Quit),
                Some("1") => break ItemType::Book,
                Some("2") => break ItemType::Dvd,
                Some("3") => break ItemType::Cd,
                Some(_) => writeln!(
                    self.output,
                    "Invalid option. Please enter a number between 1 and 3."
                )?,
            }
        };

        let label = item_type.label();
        let (noun, first, second) = match item_type {
            ItemType::Book => (
                "book",
                ("Enter the author's name:", "author"),
                ("Enter the ISBN of the book:", "ISBN"),
            ),
            ItemType::Dvd => (
                "DVD",
                ("Enter the genre of the DVD:", "genre"),
                ("Enter the director's name:", "director"),
            ),
            ItemType::Cd => (
                "CD",
                ("Enter the artist's name:", "artist"),
                ("Enter the genre of the CD:", "genre"),
            ),
        };

        let title_prompt = format!("Enter the title of the {}:", noun);
        let Some(title) = self.prompt_required(&title_prompt, "title")? else {
            return Ok(Flow::Quit);
        };
        let Some(a) = self.prompt_required(first.0, first.1)? else {
            return Ok(Flow::Quit);
        };
        let Some(b) = self.prompt_required(second.0, second.1)? else {
            return Ok(Flow::Quit);
        };

        let item = match item_type {
            ItemType::Book => Item::book(title, a, b),
            ItemType::Dvd => Item::dvd(title, a, b),
            ItemType::Cd => Item::cd(title, a, b),
        };

        match item {
            Ok(item) => {
                self.catalog.add(item);
                writeln!(self.output, "{} added successfully.", label)?;
            }
            Err(e) => writeln!(self.output, "Could not add {}: {}", label, e)?,
        }

        Ok(Flow::Continue)
    }

    fn search_items(&mut self) -> io::Result<Flow> {
        writeln!(
            self.output,
            "Enter the search term (ISBN, director, author, artist, etc.):"
        )?;
        let Some(term) = self.read_line()? else {
            return Ok(Flow::Quit);
        };

        let matches = self.catalog.search(&term);
        if matches.is_empty() {
            writeln!(self.output, "No items found.")?;
        } else {
            writeln!(self.output, "Matching items:")?;
            for item in matches {
                writeln!(self.output, "{}", item)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn borrow_item(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_required(
            "Enter the identifier of the item to borrow (ISBN for book, title_director for DVD, and title_artist for CD):",
            "identifier",
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(name) = self.prompt_required("Enter your name:", "name")? else {
            return Ok(Flow::Quit);
        };
        let Some(contact) =
            self.prompt_required("Enter your contact information:", "contact information")?
        else {
            return Ok(Flow::Quit);
        };

        match self.catalog.borrow(&id, &name, &contact) {
            Ok(true) => writeln!(self.output, "Item borrowed successfully.")?,
            Ok(false) => writeln!(
                self.output,
                "Item could not be borrowed. It might be unavailable or not found."
            )?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn return_item(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_required(
            "Enter the identifier of the item to return (ISBN for book, title_director for DVD, and title_artist for CD):",
            "identifier",
        )?
        else {
            return Ok(Flow::Quit);
        };

        match self.catalog.return_item(&id) {
            Ok(true) => writeln!(self.output, "Item returned successfully.")?,
            Ok(false) => writeln!(
                self.output,
                "Item could not be returned. It might not be borrowed or not found."
            )?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn save_to_file(&mut self) -> io::Result<Flow> {
        let Some(filename) =
            self.prompt_required("Enter the filename to save the items:", "filename")?
        else {
            return Ok(Flow::Quit);
        };

        match self.catalog.save(Path::new(&filename)) {
            Ok(()) => writeln!(self.output, "Library items saved to file.")?,
            Err(e) => {
                warn!(%filename, error = %e, "Save failed");
                writeln!(
                    self.output,
                    "An error occurred while saving the library items to file: {}",
                    e
                )?;
            }
        }

        Ok(Flow::Continue)
    }

    fn load_from_file(&mut self) -> io::Result<Flow> {
        let Some(filename) =
            self.prompt_required("Enter the filename to load the items:", "filename")?
        else {
            return Ok(Flow::Quit);
        };

        match self.catalog.load(Path::new(&filename)) {
            Ok(()) => writeln!(self.output, "Library items loaded from file.")?,
            Err(e) => {
                warn!(%filename, error = %e, "Load failed");
                writeln!(
                    self.output,
                    "An error occurred while loading the library items from file: {}",
                    e
                )?;
            }
        }

        Ok(Flow::Continue)
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
