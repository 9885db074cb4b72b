//! docforge - generate and validate check-digit identifiers
//!
//! CPF, CNPJ, CNH, civil-registry certificate numbers and test card numbers,
//! with local preferences, history and batch export.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod history;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
