//! Error handling and display for the CLI.

use colored::Colorize;
use docforge_export::ExportError;
use docforge_id::{IdError, Region, MAX_BATCH};
use thiserror::Error;

use crate::config::PREFERENCE_KEYS;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Id(#[from] IdError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("Unknown preference '{0}'")]
    UnknownPreference(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidPreference {
        key: String,
        value: String,
        reason: String,
    },

    #[error("History entry #{number} not found ({len} entries)")]
    HistoryEntryNotFound { number: usize, len: usize },

    #[error("{invalid} of {total} inputs failed validation")]
    ValidationFailed { invalid: usize, total: usize },
}

impl CliError {
    pub fn invalid_preference(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPreference {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<CliError>().and_then(hint_for) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint_for(err: &CliError) -> Option<String> {
    match err {
        CliError::Id(IdError::UnknownVariant { category, .. }) => match *category {
            "document kind" => Some("Run `docforge kinds` to list document kinds.".to_string()),
            "card brand" => Some("Run `docforge brands` to list card brands.".to_string()),
            "region" => {
                let codes: Vec<&str> = Region::ALL.iter().map(|r| r.code()).collect();
                Some(format!("Valid regions: {}", codes.join(", ")))
            }
            _ => None,
        },
        CliError::Id(IdError::QuantityOutOfRange { .. }) => Some(format!(
            "Set a quantity between 1 and {MAX_BATCH} with `docforge preferences set quantity <n>`."
        )),
        CliError::Export(ExportError::UnsupportedFormat { .. }) => {
            Some("Use --export json, csv or text.".to_string())
        }
        CliError::UnknownPreference(_) => {
            Some(format!("Known preferences: {}", PREFERENCE_KEYS.join(", ")))
        }
        CliError::HistoryEntryNotFound { .. } => {
            Some("Run `docforge history list` to see entry numbers.".to_string())
        }
        _ => None,
    }
}
