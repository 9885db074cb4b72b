//! Generate command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use docforge_export::{write_to_file, Batch, ExportFormat};
use docforge_id::{clamp_quantity, DocumentKind, Generated, MAX_BATCH};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::history::History;
use crate::output::{
    display_option, print_output, print_single, print_success, print_warning, OutputFormat,
};

use super::{parse_kind, CommandContext};

/// Generate identifiers.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Document kind (cpf, cnpj, cnh, certidao, card).
    kind: String,

    /// How many to generate (1-50). Defaults to the `quantity` preference.
    #[arg(short = 'n', long)]
    quantity: Option<usize>,

    /// Print masked values.
    #[arg(long, conflicts_with = "raw")]
    masked: bool,

    /// Print raw digits.
    #[arg(long)]
    raw: bool,

    /// CPF fiscal region (two-letter state code, e.g. SP).
    #[arg(long)]
    region: Option<String>,

    /// Card brand (visa, mastercard, amex, elo, ...).
    #[arg(long)]
    brand: Option<String>,

    /// Omit the card expiry date.
    #[arg(long)]
    no_expiry: bool,

    /// Omit the card CVV.
    #[arg(long)]
    no_cvv: bool,

    /// Export format (json, csv, text) instead of table output.
    #[arg(long)]
    export: Option<String>,

    /// Write the export to this file instead of stdout.
    #[arg(long, short = 'o', requires = "export")]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct IdentifierRow {
    #[tabled(rename = "#")]
    index: usize,

    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    index: usize,

    #[tabled(rename = "Number")]
    number: String,

    #[tabled(rename = "Brand")]
    brand: String,

    #[tabled(rename = "Expiry", display = "display_option")]
    expiry: Option<String>,

    #[tabled(rename = "CVV", display = "display_option")]
    cvv: Option<String>,
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let kind = parse_kind(&self.kind)?;
        let export = self
            .export
            .as_deref()
            .map(str::parse::<ExportFormat>)
            .transpose()
            .map_err(CliError::from)?;

        let mut options = ctx.prefs.generation_options()?;
        if self.masked {
            options.masked = true;
        } else if self.raw {
            options.masked = false;
        }
        if let Some(region) = self.region.as_deref() {
            options = options.with_region_code(region).map_err(CliError::from)?;
        }
        if let Some(brand) = self.brand.as_deref() {
            options = options.with_brand_name(brand).map_err(CliError::from)?;
        }
        if self.no_expiry {
            options.include_expiry = false;
        }
        if self.no_cvv {
            options.include_cvv = false;
        }

        let requested = self.quantity.unwrap_or(ctx.prefs.quantity);
        if clamp_quantity(requested) != requested {
            print_warning(&format!(
                "quantity {requested} out of range, generating {} (max {MAX_BATCH})",
                clamp_quantity(requested)
            ));
        }

        let items = ctx.generate(kind, &options, requested);

        if ctx.records_history() {
            let mut history = History::open(&ctx.home)?;
            history.record(&items, Utc::now());
            history.save()?;
        }

        match export {
            Some(format) => export_batch(kind, items, format, self.output),
            None => {
                print_items(&ctx, kind, &items);
                Ok(())
            }
        }
    }
}

fn print_items(ctx: &CommandContext, kind: DocumentKind, items: &[Generated]) {
    if kind == DocumentKind::PaymentCard {
        let rows: Vec<CardRow> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let card = item.card.as_ref();
                CardRow {
                    index: i + 1,
                    number: item.display.clone(),
                    brand: card.map(|c| c.brand.to_string()).unwrap_or_default(),
                    expiry: card.and_then(|c| c.expiry).map(|e| e.to_string()),
                    cvv: card.and_then(|c| c.cvv.clone()),
                }
            })
            .collect();
        match ctx.format {
            OutputFormat::Table => print_output(&rows, ctx.format),
            OutputFormat::Json => print_single(items),
        }
    } else {
        let rows: Vec<IdentifierRow> = items
            .iter()
            .enumerate()
            .map(|(i, item)| IdentifierRow {
                index: i + 1,
                value: item.display.clone(),
            })
            .collect();
        match ctx.format {
            OutputFormat::Table => print_output(&rows, ctx.format),
            OutputFormat::Json => print_single(items),
        }
    }
}

fn export_batch(
    kind: DocumentKind,
    items: Vec<Generated>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let count = items.len();
    let rendered = Batch::new(kind, items)
        .render(format)
        .map_err(CliError::from)?;

    match output {
        Some(path) => {
            write_to_file(&path, &rendered)
                .map_err(CliError::from)
                .with_context(|| format!("Failed to export to {:?}", path))?;
            tracing::info!(path = %path.display(), count, %format, "exported batch");
            print_success(&format!(
                "Wrote {count} {} to {}",
                kind.label(),
                path.display()
            ));
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
