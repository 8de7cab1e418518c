//! Contacts - terminal contact list manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = contact_list::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
