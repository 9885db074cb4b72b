//! Preferences commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Preferences;
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Show or change saved preferences.
#[derive(Debug, Args)]
pub struct PreferencesCommand {
    #[command(subcommand)]
    command: PreferencesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PreferencesSubcommand {
    /// Show effective preferences (file plus environment overrides).
    Show,

    /// Save one preference.
    Set(SetArgs),

    /// Restore defaults.
    Reset,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Preference name, e.g. quantity or region.
    key: String,

    /// New value. Use `none` to clear region or brand.
    value: String,
}

impl PreferencesCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            PreferencesSubcommand::Show => show(ctx),
            PreferencesSubcommand::Set(args) => set(ctx, args),
            PreferencesSubcommand::Reset => reset(ctx),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let prefs = &ctx.prefs;

    match ctx.format {
        OutputFormat::Json => print_single(prefs),
        OutputFormat::Table => {
            println!("masked: {}", prefs.masked);
            println!("quantity: {}", prefs.quantity);
            println!("region: {}", prefs.region.as_deref().unwrap_or("-"));
            println!("brand: {}", prefs.brand.as_deref().unwrap_or("-"));
            println!("include_expiry: {}", prefs.include_expiry);
            println!("include_cvv: {}", prefs.include_cvv);
            println!("format: {}", prefs.format);
            println!("record_history: {}", prefs.record_history);
            println!("log_level: {}", prefs.log_level);
        }
    }

    Ok(())
}

fn set(ctx: CommandContext, args: SetArgs) -> Result<()> {
    // Environment overrides are not persisted
    let mut prefs = Preferences::load_file(&ctx.home)?;
    prefs.set(&args.key, &args.value)?;
    prefs.validate()?;
    prefs.save(&ctx.home)?;

    match ctx.format {
        OutputFormat::Json => print_single(&prefs),
        OutputFormat::Table => print_success(&format!("Set {} = {}", args.key, args.value)),
    }

    Ok(())
}

fn reset(ctx: CommandContext) -> Result<()> {
    let prefs = Preferences::default();
    prefs.save(&ctx.home)?;

    match ctx.format {
        OutputFormat::Json => print_single(&prefs),
        OutputFormat::Table => print_success("Preferences reset to defaults"),
    }

    Ok(())
}
