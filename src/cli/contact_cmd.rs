//! One-shot contact commands
//!
//! Each command loads the contact file, performs a single operation and,
//! if the book changed, saves it back.

use anyhow::Result;
use clap::Args;

use super::output::Output;
use crate::domain::{Contact, ContactBook, UpdateOutcome};
use crate::storage::ContactStore;

/// Fields of a contact given on the command line
#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    /// Contact name
    #[arg(long)]
    pub name: String,

    /// Email address (must contain '@')
    #[arg(long)]
    pub email: String,

    /// Phone number (at least 10 characters)
    #[arg(long)]
    pub phone: String,
}

impl ContactArgs {
    fn into_contact(self) -> Result<Contact> {
        Ok(Contact::validated(
            self.name.trim(),
            self.email.trim(),
            self.phone.trim(),
        )?)
    }
}

/// Loads the book, falling back to an empty one if the file can't be read
pub fn open_book(output: &Output, store: &ContactStore) -> ContactBook {
    output.verbose_ctx("load", &format!("Reading contacts from {}", store.path().display()));

    match store.try_load() {
        Ok(book) => {
            output.verbose_ctx("load", &format!("Loaded {} contact(s)", book.len()));
            book
        }
        Err(e) => {
            output.verbose_ctx("load", &format!("Starting empty: {:#}", e));
            ContactBook::new()
        }
    }
}

/// Loads the book for a command that will write it back.
///
/// Unlike [`open_book`], a file that exists but can't be read is an error,
/// so the save that follows can't replace it with a partial book.
fn load_for_update(output: &Output, store: &ContactStore) -> Result<ContactBook> {
    output.verbose_ctx("load", &format!("Reading contacts from {}", store.path().display()));

    let book = store.try_load()?;
    output.verbose_ctx("load", &format!("Loaded {} contact(s)", book.len()));
    Ok(book)
}

fn save_book(output: &Output, store: &ContactStore, book: &ContactBook) -> Result<()> {
    store.save(book)?;
    output.verbose_ctx(
        "save",
        &format!("Saved {} contact(s) to {}", book.len(), store.path().display()),
    );
    Ok(())
}

pub fn add(output: &Output, store: &ContactStore, args: ContactArgs) -> Result<()> {
    let contact = args.into_contact()?;
    let mut book = load_for_update(output, store)?;

    book.add(contact);
    save_book(output, store, &book)?;

    output.success("Contact added successfully!");
    Ok(())
}

pub fn list(output: &Output, store: &ContactStore) -> Result<()> {
    let book = open_book(output, store);

    if output.is_json() {
        output.data(&book);
    } else {
        output.line("List of all contacts");
        for line in book.list() {
            output.line(&line);
        }
    }

    Ok(())
}

pub fn search(output: &Output, store: &ContactStore, term: &str) -> Result<()> {
    let book = open_book(output, store);
    let hits = book.search(term);
    output.verbose_ctx("search", &format!("Found {} match(es) for '{}'", hits.len(), term));

    if output.is_json() {
        output.data(&hits);
    } else if hits.is_empty() {
        output.line("No matching contacts found.");
    } else {
        output.line("Search results:");
        for contact in hits {
            output.line(&contact.to_string());
        }
    }

    Ok(())
}

pub fn update(output: &Output, store: &ContactStore, target: &str, args: ContactArgs) -> Result<()> {
    let replacement = args.into_contact()?;
    let mut book = load_for_update(output, store)?;

    match book.update(target, || Ok::<_, anyhow::Error>(replacement))? {
        UpdateOutcome::Updated(index) => {
            output.verbose_ctx("update", &format!("Replaced contact at position {}", index));
            save_book(output, store, &book)?;
            output.success("Contact updated successfully!");
        }
        UpdateOutcome::NotFound => output.notice("Contact not found."),
    }

    Ok(())
}

pub fn delete(output: &Output, store: &ContactStore, name: &str) -> Result<()> {
    let mut book = load_for_update(output, store)?;

    match book.delete(name) {
        Some(removed) => {
            output.verbose_ctx("delete", &format!("Removed {}", removed));
            save_book(output, store, &book)?;
            output.success("Contact deleted successfully!");
        }
        None => output.notice("Contact not found."),
    }

    Ok(())
}
