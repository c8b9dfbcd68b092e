//! Badge - resolve, inspect and preview overlay badges

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = badge_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
