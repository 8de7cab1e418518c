//! # Storage Layer
//!
//! Persistence for the contact list.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Contacts | `name,email,phone` per line | `contacts.csv` (configurable) |
//! | Local config | TOML | `./contacts.toml` |
//! | Global config | TOML | `~/.config/contact-list/config.toml` |
//!
//! Writes go to a temp file that is renamed over the destination, under an
//! exclusive `fs2` lock. Reads take a shared lock.

mod csv;
mod config;

pub use csv::{format_line, parse_line, ContactStore, DEFAULT_FILE};
pub use config::{Config, ConfigError, ConfigFile, LOCAL_CONFIG};
