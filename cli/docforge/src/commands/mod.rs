//! CLI commands.

mod generate;
mod history;
mod kinds;
mod mask;
mod preferences;
mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docforge_id::{generate_many, DocumentKind, Generated, GenerationOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{self, Preferences};
use crate::error::CliError;
use crate::logging;
use crate::output::OutputFormat;

/// docforge - Generate and validate Brazilian document numbers and test cards.
#[derive(Debug, Parser)]
#[command(name = "docforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to the `format` preference.
    #[arg(long, global = true, value_parser = ["table", "json"])]
    format: Option<String>,

    /// Seed the random generator for repeatable output.
    #[arg(long, global = true, env = "DOCFORGE_SEED")]
    seed: Option<u64>,

    /// Do not record generated values in history.
    #[arg(long, global = true)]
    no_history: bool,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate identifiers.
    Generate(generate::GenerateCommand),

    /// Validate identifiers (masked or raw).
    Validate(validate::ValidateCommand),

    /// Format raw digits with a document mask.
    Mask(mask::MaskCommand),

    /// Strip formatting, leaving only digits.
    Unmask(mask::UnmaskCommand),

    /// List supported document kinds.
    Kinds,

    /// List supported card brands.
    Brands,

    /// Show and manage generation history.
    History(history::HistoryCommand),

    /// Show or change saved preferences.
    Preferences(preferences::PreferencesCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let home = config::config_dir()?;
        let prefs = Preferences::load(&home)?;

        logging::init(&prefs.log_level, self.log_json)?;
        tracing::debug!(home = %home.display(), "loaded preferences");

        let format = match self.format.as_deref() {
            Some(format) => format.parse().unwrap_or_default(),
            None => prefs.output_format(),
        };

        // Stored preferences must stay editable even when invalid
        if !matches!(self.command, Commands::Preferences(_) | Commands::Version) {
            prefs.validate()?;
        }

        let ctx = CommandContext {
            prefs,
            format,
            seed: self.seed,
            no_history: self.no_history,
            home,
        };

        match self.command {
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Mask(cmd) => cmd.run(ctx),
            Commands::Unmask(cmd) => cmd.run(ctx),
            Commands::Kinds => kinds::list_kinds(ctx),
            Commands::Brands => kinds::list_brands(ctx),
            Commands::History(cmd) => cmd.run(ctx),
            Commands::Preferences(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("docforge {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub prefs: Preferences,
    pub format: OutputFormat,
    pub seed: Option<u64>,
    pub no_history: bool,
    pub home: PathBuf,
}

impl CommandContext {
    /// Whether generated values should be written to history.
    pub fn records_history(&self) -> bool {
        self.prefs.record_history && !self.no_history
    }

    /// Generate a batch with the seeded or thread-local generator.
    pub fn generate(
        &self,
        kind: DocumentKind,
        options: &GenerationOptions,
        quantity: usize,
    ) -> Vec<Generated> {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_many(kind, options, quantity, &mut rng)
            }
            None => generate_many(kind, options, quantity, &mut rand::rng()),
        }
    }
}

/// Parse a document kind argument.
pub fn parse_kind(input: &str) -> Result<DocumentKind, CliError> {
    Ok(input.parse()?)
}
