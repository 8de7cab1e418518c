//! Interactive menu shell
//!
//! Owns nothing but a console: the contact book is passed in by the caller
//! and mutated in place. Leaving the menu (choice 6 or end of input) saves
//! the book.

use anyhow::Result;

use super::output::Output;
use crate::console::Console;
use crate::domain::{Contact, ContactBook, PromptError, Retry, UpdateOutcome};
use crate::storage::ContactStore;

const MENU: [&str; 9] = [
    "Contact List Manager",
    "",
    "Select an option:",
    "1. Add new contact",
    "2. List all contacts",
    "3. Search for a contact",
    "4. Update a contact",
    "5. Delete a contact",
    "6. Quit",
];

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Search,
    Update,
    Delete,
    Quit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Search),
            "4" => Some(Self::Update),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The interactive menu loop
pub struct Shell<'a> {
    console: &'a mut dyn Console,
    output: &'a Output,
    retry: Retry,
    pause: bool,
}

impl<'a> Shell<'a> {
    pub fn new(console: &'a mut dyn Console, output: &'a Output, retry: Retry, pause: bool) -> Self {
        Self {
            console,
            output,
            retry,
            pause,
        }
    }

    /// Runs the menu until the user quits, then saves the book to `store`.
    ///
    /// The save is attempted even when the console fails mid-session; the
    /// console error is returned afterwards.
    pub fn run(&mut self, book: &mut ContactBook, store: &ContactStore) -> Result<()> {
        let session = self.menu_loop(book);

        let saved = store.save(book);
        match &saved {
            Ok(()) => self.output.verbose_ctx(
                "save",
                &format!("Saved {} contact(s) to {}", book.len(), store.path().display()),
            ),
            Err(e) => self.output.verbose_ctx("save", &format!("{:#}", e)),
        }

        session?;

        if saved.is_err() {
            self.console.write_line("Error opening file for writing.")?;
        }

        self.console.clear()?;
        self.console.write_line("Goodbye!")?;
        Ok(())
    }

    fn menu_loop(&mut self, book: &mut ContactBook) -> Result<()> {
        loop {
            self.console.clear()?;
            for line in MENU {
                self.console.write_line(line)?;
            }
            self.console.write_line("")?;

            let Some(input) = self.console.read_line("Enter your choice: ")? else {
                return Ok(());
            };

            match MenuChoice::parse(&input) {
                Some(MenuChoice::Quit) => return Ok(()),
                Some(choice) => {
                    self.output.verbose_ctx("shell", &format!("Selected {:?}", choice));
                    match self.dispatch(choice, book) {
                        Ok(()) => {}
                        Err(PromptError::Closed) => return Ok(()),
                        Err(PromptError::Io(e)) => return Err(e.into()),
                        Err(e @ PromptError::TooManyAttempts { .. }) => {
                            self.console.write_line(&e.to_string())?;
                        }
                    }
                }
                None => self.console.write_line("Invalid choice. Please try again.")?,
            }

            if self.pause {
                self.console.write_line("")?;
                if self.console.read_line("Press Enter to continue...")?.is_none() {
                    return Ok(());
                }
            }
        }
    }

    /// Runs one menu action against the book
    pub fn dispatch(&mut self, choice: MenuChoice, book: &mut ContactBook) -> Result<(), PromptError> {
        match choice {
            MenuChoice::Add => self.add(book),
            MenuChoice::List => self.list(book),
            MenuChoice::Search => self.search(book),
            MenuChoice::Update => self.update(book),
            MenuChoice::Delete => self.delete(book),
            MenuChoice::Quit => Ok(()),
        }
    }

    fn add(&mut self, book: &mut ContactBook) -> Result<(), PromptError> {
        self.console.clear()?;
        self.console.write_line("Add a new Contact")?;

        let contact = Contact::prompt(self.console, self.retry)?;
        book.add(contact);

        self.console.write_line("")?;
        self.console.write_line("Contact added successfully!")?;
        Ok(())
    }

    fn list(&mut self, book: &ContactBook) -> Result<(), PromptError> {
        self.console.clear()?;
        self.console.write_line("List of all contacts")?;

        for line in book.list() {
            self.console.write_line(&line)?;
        }
        Ok(())
    }

    fn search(&mut self, book: &ContactBook) -> Result<(), PromptError> {
        self.console.clear()?;
        self.console.write_line("Search for contact")?;

        let term = self.ask("Enter search term: ")?;
        let hits = book.search(&term);

        self.console.write_line("")?;
        self.console.write_line("Search results:")?;
        if hits.is_empty() {
            self.console.write_line("No matching contacts found.")?;
        }
        for contact in hits {
            self.console.write_line(&contact.to_string())?;
        }
        Ok(())
    }

    fn update(&mut self, book: &mut ContactBook) -> Result<(), PromptError> {
        self.console.clear()?;
        self.console.write_line("Update contact")?;

        let name = self.ask("Enter the name of the contact to update: ")?;
        let retry = self.retry;
        let console = &mut *self.console;

        match book.update(&name, || Contact::prompt(console, retry))? {
            UpdateOutcome::Updated(_) => {
                self.console.write_line("")?;
                self.console.write_line("Contact updated successfully!")?;
            }
            UpdateOutcome::NotFound => self.console.write_line("Contact not found.")?,
        }
        Ok(())
    }

    fn delete(&mut self, book: &mut ContactBook) -> Result<(), PromptError> {
        self.console.clear()?;
        self.console.write_line("Delete a contact")?;

        let name = self.ask("Enter the name of the contact to delete: ")?;

        match book.delete(&name) {
            Some(_) => {
                self.console.write_line("")?;
                self.console.write_line("Contact deleted successfully!")?;
            }
            None => self.console.write_line("Contact not found.")?,
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        let answer = self.console.read_line(prompt)?.ok_or(PromptError::Closed)?;
        Ok(answer.trim().to_string())
    }
}
