//! Contact List - a terminal contact manager
//!
//! Contacts (name, email, phone) live in an ordered in-memory [`ContactBook`]
//! that is loaded from and saved to a flat comma-delimited file. An
//! interactive menu shell and one-shot subcommands sit on top.

pub mod console;
pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Contact, ContactBook, Retry, UpdateOutcome};
