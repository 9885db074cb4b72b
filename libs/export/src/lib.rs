//! Batch export for generated identifiers.
//!
//! Three formats are supported:
//!
//! - `json`: one pretty-printed document with batch metadata
//! - `csv`: header row `kind,value,formatted,brand,expiry,cvv`, RFC 4180 quoting
//! - `text`: one display value per line, card extras tab-separated
//!
//! ```text
//! {
//!   "kind": "cpf",
//!   "count": 2,
//!   "generatedAt": "2026-10-16T12:00:00Z",
//!   "items": [ ... ]
//! }
//! ```

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use docforge_id::{DocumentKind, Generated};
use serde::Serialize;
use thiserror::Error;

/// CSV header row.
pub const CSV_HEADER: &str = "kind,value,formatted,brand,expiry,cvv";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Format name not recognized.
    #[error("unsupported export format: '{format}' (expected json, csv or text)")]
    UnsupportedFormat { format: String },

    /// JSON encoding failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Output format for an exported batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    /// All formats.
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Text];

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" | "plain" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// A batch of identifiers of one kind, stamped with its creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: DocumentKind,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<Generated>,
}

impl Batch {
    /// Creates a batch stamped with the current time.
    pub fn new(kind: DocumentKind, items: Vec<Generated>) -> Self {
        Self::with_timestamp(kind, items, Utc::now())
    }

    pub fn with_timestamp(
        kind: DocumentKind,
        items: Vec<Generated>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            generated_at,
            items,
        }
    }

    /// Renders the batch in `format`.
    pub fn render(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Pretty-printed JSON document with a trailing newline.
    pub fn to_json(&self) -> Result<String, ExportError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Document<'a> {
            kind: DocumentKind,
            count: usize,
            generated_at: String,
            items: &'a [Generated],
        }

        let doc = Document {
            kind: self.kind,
            count: self.items.len(),
            generated_at: self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            items: &self.items,
        };
        let mut out = serde_json::to_string_pretty(&doc)?;
        out.push('\n');
        Ok(out)
    }

    /// CSV with a header row; card columns are empty for other kinds.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(CSV_HEADER);
        out.push('\n');

        for item in &self.items {
            let card = item.card.as_ref();
            let brand = card.map(|c| c.brand.code().to_string()).unwrap_or_default();
            let expiry = card
                .and_then(|c| c.expiry)
                .map(|e| e.to_string())
                .unwrap_or_default();
            let cvv = card.and_then(|c| c.cvv.clone()).unwrap_or_default();

            let fields = [
                item.identifier.kind().code().to_string(),
                item.identifier.raw(),
                item.identifier.masked(),
                brand,
                expiry,
                cvv,
            ];
            let row: Vec<String> = fields.iter().map(|f| escape_csv_field(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }

        out
    }

    /// One display value per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            out.push_str(&item.display);
            if let Some(card) = &item.card {
                out.push('\t');
                out.push_str(&card.brand.to_string());
                if let Some(expiry) = card.expiry {
                    out.push('\t');
                    out.push_str(&expiry.to_string());
                }
                if let Some(cvv) = &card.cvv {
                    out.push('\t');
                    out.push_str(cvv);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Quotes a CSV field if it contains a comma, quote, or line break.
///
/// Embedded quotes are doubled.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Writes `content` to `path` atomically.
///
/// Uses write-to-temp + fsync + rename, creating parent directories first.
pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), ExportError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // Atomic rename
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    Ok(())
}

/// Sibling temp file: `dir/.name.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use docforge_id::{generate_many, CardBrand, GenerationOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn batch(kind: DocumentKind, options: &GenerationOptions, n: usize) -> Batch {
        let mut rng = StdRng::seed_from_u64(12);
        Batch::with_timestamp(kind, generate_many(kind, options, n, &mut rng), stamp())
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_json_document() {
        let batch = batch(DocumentKind::PersonalTaxId, &GenerationOptions::default(), 3);
        let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "cpf");
        assert_eq!(json["count"], 3);
        assert_eq!(json["generatedAt"], "2026-10-16T12:00:00Z");
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["items"][0]["value"].as_str().unwrap().len(), 11);
    }

    #[test]
    fn test_csv_rows() {
        let options = GenerationOptions::default()
            .with_brand(CardBrand::Amex)
            .with_reference_year(2026);
        let batch = batch(DocumentKind::PaymentCard, &options, 2);
        let csv = batch.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        let cols: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cols.len(), 6);
        assert_eq!(cols[0], "card");
        assert_eq!(cols[3], "amex");
        assert_eq!(cols[5].len(), 4);
    }

    #[test]
    fn test_csv_non_card_columns_empty() {
        let batch = batch(DocumentKind::CorporateTaxId, &GenerationOptions::default(), 1);
        let csv = batch.to_csv();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",,,"));
    }

    #[test]
    fn test_text_lines() {
        let masked = GenerationOptions::default().masked(true);
        let text = batch(DocumentKind::DriverLicenseNumber, &masked, 4).to_text();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().all(|l| l.len() == 14));

        let cards = GenerationOptions::default()
            .with_brand(CardBrand::Visa)
            .with_reference_year(2026);
        let text = batch(DocumentKind::PaymentCard, &cards, 1).to_text();
        let parts: Vec<&str> = text.trim_end().split('\t').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], "Visa");
    }

    #[test]
    fn test_write_to_file_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        write_to_file(&path, "first\n").unwrap();
        write_to_file(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!temp_path_for(&path).exists());
    }
}
