//! Validate command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docforge_id::check;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, OutputFormat};

use super::{parse_kind, CommandContext};

/// Validate identifiers. Exits non-zero if any input is invalid.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Document kind (cpf, cnpj, cnh, certidao, card).
    kind: String,

    /// Values to check, masked or raw.
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "Input")]
    input: String,

    #[tabled(rename = "Valid", display = "display_valid")]
    valid: bool,

    #[tabled(rename = "Detail")]
    detail: String,
}

fn display_valid(valid: &bool) -> String {
    if *valid {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let kind = parse_kind(&self.kind)?;

        let rows: Vec<ValidationRow> = self
            .inputs
            .into_iter()
            .map(|input| {
                let (valid, detail) = match check(kind, &input) {
                    Ok(id) => (true, id.masked()),
                    Err(err) => (false, err.to_string()),
                };
                ValidationRow {
                    input,
                    valid,
                    detail,
                }
            })
            .collect();

        let invalid = rows.iter().filter(|r| !r.valid).count();
        tracing::debug!(kind = kind.code(), total = rows.len(), invalid, "validated inputs");

        match ctx.format {
            OutputFormat::Table => print_output(&rows, ctx.format),
            OutputFormat::Json => print_single(&rows),
        }

        if invalid > 0 {
            return Err(CliError::ValidationFailed {
                invalid,
                total: rows.len(),
            }
            .into());
        }
        Ok(())
    }
}
