//! The ordered contact collection
//!
//! Insertion order is preserved and names are not deduplicated. Update and
//! delete address a contact by exact name and act on the first match only,
//! while search is a substring match over every field.

use serde::Serialize;

use super::contact::Contact;

/// Result of an update attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The contact at this position was replaced
    Updated(usize),
    /// No contact has that exact name
    NotFound,
}

/// An ordered list of contacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactBook(Vec<Contact>);

impl ContactBook {
    /// Creates an empty book
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a contact, duplicates included
    pub fn add(&mut self, contact: Contact) {
        self.0.push(contact);
    }

    /// Renders one display line per contact, in order
    pub fn list(&self) -> Vec<String> {
        self.0.iter().map(Contact::to_string).collect()
    }

    /// Returns every contact with `term` in its name, email, or phone
    pub fn search(&self, term: &str) -> Vec<&Contact> {
        self.0.iter().filter(|c| c.matches(term)).collect()
    }

    /// Position of the first contact named exactly `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c.name() == name)
    }

    /// Replaces the first contact named exactly `name`.
    ///
    /// `build` only runs when a match exists. If it fails the book is left
    /// untouched and the error is returned.
    pub fn update<E>(
        &mut self,
        name: &str,
        build: impl FnOnce() -> Result<Contact, E>,
    ) -> Result<UpdateOutcome, E> {
        let Some(index) = self.position(name) else {
            return Ok(UpdateOutcome::NotFound);
        };

        self.0[index] = build()?;
        Ok(UpdateOutcome::Updated(index))
    }

    /// Removes and returns the first contact named exactly `name`
    pub fn delete(&mut self, name: &str) -> Option<Contact> {
        self.position(name).map(|index| self.0.remove(index))
    }

    /// Returns the number of contacts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the book holds no contacts
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over contacts in order
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.0.iter()
    }
}

impl From<Vec<Contact>> for ContactBook {
    fn from(contacts: Vec<Contact>) -> Self {
        Self(contacts)
    }
}

impl FromIterator<Contact> for ContactBook {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ContactBook {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
