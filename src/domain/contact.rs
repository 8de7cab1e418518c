//! Contact domain model
//!
//! A contact is an immutable (name, email, phone) record. Validation is
//! deliberately shallow: an email needs an `@`, a phone number needs ten
//! characters.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::console::Console;

/// Minimum number of characters in a phone number
pub const MIN_PHONE_LEN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name can't be empty")]
    EmptyName,

    #[error("Invalid email format: '{0}'")]
    InvalidEmail(String),

    #[error("Invalid phone format: '{0}' (expected at least 10 characters)")]
    InvalidPhone(String),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input closed before a contact was entered")]
    Closed,

    #[error("Gave up on {field} after {attempts} invalid attempts")]
    TooManyAttempts { field: &'static str, attempts: u32 },

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// How many times a rejected answer is re-prompted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retry {
    /// Keep asking until a valid answer arrives
    #[default]
    Unbounded,
    /// Give up after this many rejected answers
    AtMost(u32),
}

impl Retry {
    /// Builds a policy from an optional attempt limit
    pub fn from_limit(limit: Option<u32>) -> Self {
        limit.map(Retry::AtMost).unwrap_or(Retry::Unbounded)
    }

    fn exhausted(&self, rejected: u32) -> bool {
        match self {
            Retry::Unbounded => false,
            Retry::AtMost(max) => rejected >= *max,
        }
    }
}

/// A single contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    name: String,
    email: String,
    phone: String,
}

impl Contact {
    /// Creates a contact without validating any field
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Creates a contact, rejecting fields that fail validation
    pub fn validated(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let contact = Self::new(name, email, phone);

        if contact.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_valid_email(&contact.email) {
            return Err(ValidationError::InvalidEmail(contact.email));
        }
        if !is_valid_phone_number(&contact.phone) {
            return Err(ValidationError::InvalidPhone(contact.phone));
        }

        Ok(contact)
    }

    /// Builds a contact by prompting for each field until it is valid
    pub fn prompt(console: &mut dyn Console, retry: Retry) -> Result<Self, PromptError> {
        let name = ask(
            console,
            retry,
            "name",
            "Enter name: ",
            "Name can't be empty. Please try again.",
            |s| !s.is_empty(),
        )?;
        let email = ask(
            console,
            retry,
            "email",
            "Enter email: ",
            "Invalid email format. Please try again.",
            is_valid_email,
        )?;
        let phone = ask(
            console,
            retry,
            "phone",
            "Enter phone number: ",
            "Invalid phone format. Please try again.",
            is_valid_phone_number,
        )?;

        Ok(Self { name, email, phone })
    }

    /// Returns true if any field contains `term` (case-sensitive)
    pub fn matches(&self, term: &str) -> bool {
        self.name.contains(term) || self.email.contains(term) || self.phone.contains(term)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.email, self.phone)
    }
}

/// An email is valid if it is non-empty and contains `@`
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// A phone number is valid if it has at least [`MIN_PHONE_LEN`] characters
pub fn is_valid_phone_number(phone: &str) -> bool {
    !phone.is_empty() && phone.chars().count() >= MIN_PHONE_LEN
}

fn ask(
    console: &mut dyn Console,
    retry: Retry,
    field: &'static str,
    prompt: &str,
    rejection: &str,
    valid: impl Fn(&str) -> bool,
) -> Result<String, PromptError> {
    let mut rejected = 0;

    loop {
        let answer = console.read_line(prompt)?.ok_or(PromptError::Closed)?;
        let answer = answer.trim();
        if valid(answer) {
            return Ok(answer.to_string());
        }

        console.write_line(rejection)?;
        rejected += 1;
        if retry.exhausted(rejected) {
            return Err(PromptError::TooManyAttempts {
                field,
                attempts: rejected,
            });
        }
    }
}
