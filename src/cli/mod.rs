//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | *(none)*, `shell` | Interactive menu |
//! | `add`, `update` | Write a contact from `--name/--email/--phone` |
//! | `list`, `search` | Read contacts |
//! | `delete` | Remove a contact by exact name |
//!
//! ## Output Formats
//!
//! One-shot commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! contacts --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod shell;
mod contact_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use shell::{MenuChoice, Shell};
