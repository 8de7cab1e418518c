//! Domain models for the contact list
//!
//! Contains the contact record and the ordered collection, without any
//! file I/O.

mod contact;
mod book;

pub use contact::{
    is_valid_email, is_valid_phone_number, Contact, PromptError, Retry, ValidationError,
    MIN_PHONE_LEN,
};
pub use book::{ContactBook, UpdateOutcome};
