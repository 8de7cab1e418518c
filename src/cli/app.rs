//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::contact_cmd::{self, ContactArgs};
use super::output::{Output, OutputFormat};
use super::shell::Shell;
use crate::console::Terminal;
use crate::storage::{Config, ContactStore};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(author, version, about = "Terminal contact list manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Contact file (defaults to the configured file, then contacts.csv)
    #[arg(long, short = 'F', global = true, env = "CONTACTS_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Shell,

    /// Add a contact
    Add(ContactArgs),

    /// List all contacts
    List,

    /// Search name, email and phone for a substring (case-sensitive)
    Search {
        /// Text to look for
        term: String,
    },

    /// Replace the first contact with exactly this name
    Update {
        /// Exact name of the contact to replace
        #[arg(value_name = "NAME")]
        target: String,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Delete the first contact with exactly this name
    Delete {
        /// Exact name of the contact to delete
        name: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Contacts starting");

    let mut config = Config::load()?;
    if let Some(file) = cli.file {
        config.file = file;
    }
    output.verbose_ctx("config", &format!("{:?}", config));

    let store = ContactStore::new(&config.file);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut book = contact_cmd::open_book(&output, &store);
            let mut terminal = Terminal::new(config.clear_screen);
            Shell::new(&mut terminal, &output, config.retry(), config.pause)
                .run(&mut book, &store)?
        }
        Commands::Add(contact) => contact_cmd::add(&output, &store, contact)?,
        Commands::List => contact_cmd::list(&output, &store)?,
        Commands::Search { term } => contact_cmd::search(&output, &store, &term)?,
        Commands::Update { target, contact } => {
            contact_cmd::update(&output, &store, &target, contact)?
        }
        Commands::Delete { name } => contact_cmd::delete(&output, &store, &name)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
