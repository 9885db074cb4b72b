//! Mask and unmask commands.

use anyhow::Result;
use clap::Args;
use docforge_id::{mask_str, unmask};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::{parse_kind, CommandContext};

/// Format raw digits with a document mask.
#[derive(Debug, Args)]
pub struct MaskCommand {
    /// Document kind (cpf, cnpj, cnh, certidao, card).
    kind: String,

    /// Digits to format. Existing punctuation is ignored.
    input: String,
}

/// Strip formatting, leaving only digits.
#[derive(Debug, Args)]
pub struct UnmaskCommand {
    /// Formatted value.
    input: String,
}

#[derive(Debug, Serialize)]
struct Conversion<'a> {
    input: &'a str,
    output: String,
}

impl MaskCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let kind = parse_kind(&self.kind)?;
        let output = mask_str(kind, &self.input).map_err(CliError::from)?;
        print_conversion(&ctx, &self.input, output);
        Ok(())
    }
}

impl UnmaskCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let output = unmask(&self.input).map_err(CliError::from)?.to_string();
        print_conversion(&ctx, &self.input, output);
        Ok(())
    }
}

fn print_conversion(ctx: &CommandContext, input: &str, output: String) {
    match ctx.format {
        OutputFormat::Table => println!("{output}"),
        OutputFormat::Json => print_single(&Conversion { input, output }),
    }
}
