//! Preferences and config directory management.
//!
//! Handles:
//! - Default generation options (masking, quantity, region, brand, card extras)
//! - Output format and log level defaults
//! - Whether generated values are recorded in history
//!
//! Load order: defaults, then `preferences.json`, then `DOCFORGE_*`
//! environment variables. Command-line flags are applied by each command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use docforge_id::{ensure_quantity, CardBrand, GenerationOptions, Region};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Preferences file name.
const PREFERENCES_FILE: &str = "preferences.json";

/// Overrides the config directory.
pub const HOME_ENV: &str = "DOCFORGE_HOME";

/// Keys accepted by `docforge preferences set`.
pub const PREFERENCE_KEYS: &[&str] = &[
    "masked",
    "quantity",
    "region",
    "brand",
    "include_expiry",
    "include_cvv",
    "format",
    "record_history",
    "log_level",
];

/// Get the config directory path.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("dev", "docforge", "docforge")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Print masked values by default.
    pub masked: bool,

    /// Default batch size.
    pub quantity: usize,

    /// Default CPF fiscal region (two-letter code).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Default card brand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    pub include_expiry: bool,
    pub include_cvv: bool,

    /// `table` or `json`.
    pub format: String,

    /// Record generated values in history.
    pub record_history: bool,

    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            masked: true,
            quantity: 1,
            region: None,
            brand: None,
            include_expiry: true,
            include_cvv: true,
            format: "table".to_string(),
            record_history: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Preferences {
    /// Load preferences from disk and apply environment overrides.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut prefs = Self::load_file(dir)?;
        prefs.apply_env(|key| std::env::var(key).ok())?;
        Ok(prefs)
    }

    /// Load preferences from disk only, or return default.
    pub fn load_file(dir: &Path) -> Result<Self> {
        let path = dir.join(PREFERENCES_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences from {:?}", path))
    }

    /// Save preferences to disk.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(PREFERENCES_FILE);
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');

        docforge_export::write_to_file(&path, &contents)
            .with_context(|| format!("Failed to write preferences to {:?}", path))
    }

    /// Applies `DOCFORGE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        const OVERRIDES: [(&str, &str); 5] = [
            ("DOCFORGE_MASKED", "masked"),
            ("DOCFORGE_QUANTITY", "quantity"),
            ("DOCFORGE_REGION", "region"),
            ("DOCFORGE_BRAND", "brand"),
            ("DOCFORGE_LOG_LEVEL", "log_level"),
        ];

        for (var, key) in OVERRIDES {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                self.set(key, &value)?;
            }
        }
        Ok(())
    }

    /// Sets one preference from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CliError> {
        let value = value.trim();
        match key {
            "masked" => self.masked = parse_bool(key, value)?,
            "quantity" => {
                self.quantity = value
                    .parse()
                    .map_err(|_| CliError::invalid_preference(key, value, "expected a number"))?;
            }
            "region" => self.region = parse_optional(value),
            "brand" => self.brand = parse_optional(value),
            "include_expiry" => self.include_expiry = parse_bool(key, value)?,
            "include_cvv" => self.include_cvv = parse_bool(key, value)?,
            "format" => {
                value
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::invalid_preference(key, value, "expected table or json"))?;
                self.format = value.to_ascii_lowercase();
            }
            "record_history" => self.record_history = parse_bool(key, value)?,
            "log_level" => self.log_level = value.to_string(),
            _ => return Err(CliError::UnknownPreference(key.to_string())),
        }
        Ok(())
    }

    /// Checks values that could only be parsed lazily.
    pub fn validate(&self) -> Result<(), CliError> {
        ensure_quantity(self.quantity)?;
        self.region()?;
        self.brand()?;
        Ok(())
    }

    pub fn region(&self) -> Result<Option<Region>, CliError> {
        Ok(self.region.as_deref().map(str::parse::<Region>).transpose()?)
    }

    pub fn brand(&self) -> Result<Option<CardBrand>, CliError> {
        Ok(self.brand.as_deref().map(str::parse::<CardBrand>).transpose()?)
    }

    /// Generation options carrying these defaults.
    pub fn generation_options(&self) -> Result<GenerationOptions, CliError> {
        Ok(GenerationOptions {
            masked: self.masked,
            region: self.region()?,
            brand: self.brand()?,
            include_expiry: self.include_expiry,
            include_cvv: self.include_cvv,
            reference_year: None,
        })
    }

    /// The output format preference.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or_default()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CliError::invalid_preference(key, value, "expected true or false")),
    }
}

/// `none` and `-` clear an optional preference.
fn parse_optional(value: &str) -> Option<String> {
    match value {
        "" | "-" | "none" => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use docforge_id::IdError;

    use super::*;

    #[test]
    fn test_preferences_default() {
        let prefs = Preferences::default();
        assert!(prefs.masked);
        assert_eq!(prefs.quantity, 1);
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_file(dir.path()).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Preferences::default();
        prefs.set("region", "sp").unwrap();
        prefs.set("quantity", "12").unwrap();
        prefs.save(dir.path()).unwrap();

        let loaded = Preferences::load_file(dir.path()).unwrap();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.region().unwrap(), Some(Region::Sp));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), r#"{"masked": false}"#).unwrap();
        let prefs = Preferences::load_file(dir.path()).unwrap();
        assert!(!prefs.masked);
        assert_eq!(prefs.quantity, 1);
        assert!(prefs.include_cvv);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DOCFORGE_MASKED", "false"),
            ("DOCFORGE_QUANTITY", "7"),
            ("DOCFORGE_BRAND", "amex"),
        ]
        .into_iter()
        .collect();

        let mut prefs = Preferences::default();
        prefs
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(!prefs.masked);
        assert_eq!(prefs.quantity, 7);
        assert_eq!(prefs.brand().unwrap(), Some(CardBrand::Amex));
        assert_eq!(prefs.region, None);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut prefs = Preferences::default();
        let err = prefs
            .apply_env(|key| (key == "DOCFORGE_QUANTITY").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidPreference { .. }));
    }

    #[test]
    fn test_validate_quantity_out_of_range() {
        let mut prefs = Preferences::default();
        prefs.quantity = 500;
        assert!(matches!(
            prefs.validate(),
            Err(CliError::Id(IdError::QuantityOutOfRange { requested: 500, .. }))
        ));
    }

    #[test]
    fn test_validate_unknown_region() {
        let mut prefs = Preferences::default();
        prefs.set("region", "XX").unwrap();
        assert!(matches!(
            prefs.validate(),
            Err(CliError::Id(IdError::UnknownVariant {
                category: "region",
                ..
            }))
        ));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut prefs = Preferences::default();
        assert!(matches!(
            prefs.set("colour", "blue"),
            Err(CliError::UnknownPreference(_))
        ));
        assert!(prefs.set("format", "yaml").is_err());
        prefs.set("format", "JSON").unwrap();
        assert_eq!(prefs.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_clear_optional() {
        let mut prefs = Preferences::default();
        prefs.set("brand", "visa").unwrap();
        prefs.set("brand", "none").unwrap();
        assert_eq!(prefs.brand, None);
    }

    #[test]
    fn test_generation_options() {
        let mut prefs = Preferences::default();
        prefs.set("include_cvv", "no").unwrap();
        prefs.set("region", "RJ").unwrap();
        let options = prefs.generation_options().unwrap();
        assert!(options.masked);
        assert!(!options.include_cvv);
        assert_eq!(options.region, Some(Region::Rj));
    }
}
