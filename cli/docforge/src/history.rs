//! Local history of generated identifiers, with favorites.
//!
//! Stored as `history.json` next to the preferences. Entries are kept oldest
//! first on disk; listing numbers them newest first starting at 1.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use docforge_id::{CardBrand, DocumentKind, Generated};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// History file name.
const HISTORY_FILE: &str = "history.json";

/// Entries kept before the oldest non-favorite is evicted.
pub const MAX_HISTORY: usize = 100;

/// One recorded identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub kind: DocumentKind,
    pub value: String,
    pub formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<CardBrand>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryEntry {
    pub fn from_generated(item: &Generated, created_at: DateTime<Utc>) -> Self {
        Self {
            kind: item.identifier.kind(),
            value: item.identifier.raw(),
            formatted: item.identifier.masked(),
            brand: item.card.as_ref().map(|c| c.brand),
            created_at,
            favorite: false,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// History store bound to a file.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Open the history in `dir`, starting empty if the file is missing.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(HISTORY_FILE);

        if !path.exists() {
            return Ok(Self {
                path,
                entries: Vec::new(),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history from {:?}", path))?;
        let file: HistoryFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse history from {:?}", path))?;

        Ok(Self {
            path,
            entries: file.entries,
        })
    }

    /// Save history to disk.
    pub fn save(&self) -> Result<()> {
        let file = HistoryFile {
            entries: self.entries.clone(),
        };
        let mut contents = serde_json::to_string_pretty(&file)?;
        contents.push('\n');

        docforge_export::write_to_file(&self.path, &contents)
            .with_context(|| format!("Failed to write history to {:?}", self.path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends generated items, evicting the oldest non-favorites past
    /// [`MAX_HISTORY`].
    pub fn record(&mut self, items: &[Generated], at: DateTime<Utc>) {
        for item in items {
            self.push(HistoryEntry::from_generated(item, at));
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        while self.entries.len() > MAX_HISTORY {
            match self.entries.iter().position(|e| !e.favorite) {
                Some(oldest) => {
                    self.entries.remove(oldest);
                }
                // only favorites left
                None => break,
            }
        }
    }

    /// Entries newest first with their list numbers.
    pub fn list(
        &self,
        kind: Option<DocumentKind>,
        favorites_only: bool,
    ) -> Vec<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .rev()
            .enumerate()
            .map(|(i, entry)| (i + 1, entry))
            .filter(|(_, e)| kind.is_none_or(|k| e.kind == k))
            .filter(|(_, e)| !favorites_only || e.favorite)
            .collect()
    }

    /// Flips the favorite flag of entry `number` (as numbered by [`list`](Self::list)).
    ///
    /// Returns the new flag.
    pub fn toggle_favorite(&mut self, number: usize) -> Result<bool, CliError> {
        let len = self.entries.len();
        let index = number
            .checked_sub(1)
            .filter(|i| *i < len)
            .map(|i| len - 1 - i)
            .ok_or(CliError::HistoryEntryNotFound { number, len })?;

        let entry = &mut self.entries[index];
        entry.favorite = !entry.favorite;
        Ok(entry.favorite)
    }

    /// Removes entries, keeping favorites unless `all` is set.
    ///
    /// Returns the number removed.
    pub fn clear(&mut self, all: bool) -> usize {
        let before = self.entries.len();
        if all {
            self.entries.clear();
        } else {
            self.entries.retain(|e| e.favorite);
        }
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use docforge_id::{generate_many, GenerationOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn items(kind: DocumentKind, n: usize, seed: u64) -> Vec<Generated> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_many(kind, &GenerationOptions::default(), n, &mut rng)
    }

    #[test]
    fn test_open_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::open(dir.path()).unwrap();
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_record_save_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let generated = items(DocumentKind::PersonalTaxId, 3, 1);

        let mut history = History::open(dir.path()).unwrap();
        history.record(&generated, at());
        history.save().unwrap();

        let reopened = History::open(dir.path()).unwrap();
        let listed = reopened.list(None, false);
        assert_eq!(listed.len(), 3);
        // newest first
        assert_eq!(listed[0].0, 1);
        assert_eq!(listed[0].1.value, generated[2].identifier.raw());
        assert_eq!(listed[2].1.value, generated[0].identifier.raw());
    }

    #[test]
    fn test_list_filters() {
        let mut history = History::open(tempfile::tempdir().unwrap().path()).unwrap();
        history.record(&items(DocumentKind::PersonalTaxId, 2, 1), at());
        history.record(&items(DocumentKind::PaymentCard, 2, 2), at());

        let cards = history.list(Some(DocumentKind::PaymentCard), false);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|(_, e)| e.brand.is_some()));

        history.toggle_favorite(4).unwrap();
        let favorites = history.list(None, true);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].0, 4);
        assert_eq!(favorites[0].1.kind, DocumentKind::PersonalTaxId);
    }

    #[test]
    fn test_eviction_keeps_favorites() {
        let mut history = History::open(tempfile::tempdir().unwrap().path()).unwrap();
        history.record(&items(DocumentKind::DriverLicenseNumber, 1, 9), at());
        history.toggle_favorite(1).unwrap();
        let favorite = history.list(None, true)[0].1.value.clone();

        for seed in 0..3 {
            history.record(&items(DocumentKind::CorporateTaxId, 50, seed), at());
        }

        assert_eq!(history.len(), MAX_HISTORY);
        let favorites = history.list(None, true);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].1.value, favorite);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut history = History::open(tempfile::tempdir().unwrap().path()).unwrap();
        history.record(&items(DocumentKind::PersonalTaxId, 1, 1), at());
        assert!(matches!(
            history.toggle_favorite(0),
            Err(CliError::HistoryEntryNotFound { number: 0, len: 1 })
        ));
        assert!(history.toggle_favorite(2).is_err());
        assert!(history.toggle_favorite(1).unwrap());
        assert!(!history.toggle_favorite(1).unwrap());
    }

    #[test]
    fn test_clear() {
        let mut history = History::open(tempfile::tempdir().unwrap().path()).unwrap();
        history.record(&items(DocumentKind::PersonalTaxId, 5, 1), at());
        history.toggle_favorite(2).unwrap();

        assert_eq!(history.clear(false), 4);
        assert_eq!(history.len(), 1);
        assert_eq!(history.clear(true), 1);
        assert_eq!(history.len(), 0);
    }
}
