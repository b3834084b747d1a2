use crate::editcount_core::error::{EditCountError, Result};
use crate::editcount_core::persist::write_atomic;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::Path;

/// Albums of one year, keyed by album name.
pub type YearEntry = BTreeMap<String, Vec<String>>;

/// Every raw file name ever seen, per year and album.
///
/// Names are only ever appended. A raw file that disappears from the source tree
/// stays in the ledger and is later counted as deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    years: BTreeMap<String, YearEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger from a JSON file. A missing file yields an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No ledger at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(EditCountError::io(path, e)),
        };

        let mut ledger: Ledger =
            serde_json::from_str(&contents).map_err(|source| EditCountError::LedgerParse {
                path: path.to_path_buf(),
                source,
            })?;

        let removed = ledger.dedup();
        if removed > 0 {
            log::warn!(
                "Ledger {} contained {} duplicate entries, keeping first occurrences",
                path.display(),
                removed
            );
        }

        log::info!(
            "Loaded ledger {} ({} albums, {} files)",
            path.display(),
            ledger.album_count(),
            ledger.file_count()
        );
        Ok(ledger)
    }

    /// Overwrite `path` with this ledger as compact JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        write_atomic(path, json.as_bytes())
    }

    /// Add any raw names not yet recorded for the album, creating the year and
    /// album as needed. Returns the album's full record.
    pub fn record(&mut self, year: &str, album: &str, raw: &BTreeSet<String>) -> &[String] {
        let entry = self
            .years
            .entry(year.to_string())
            .or_default()
            .entry(album.to_string())
            .or_default();

        let known: HashSet<String> = entry.iter().cloned().collect();
        entry.extend(raw.iter().filter(|name| !known.contains(*name)).cloned());

        entry.as_slice()
    }

    pub fn album(&self, year: &str, album: &str) -> Option<&[String]> {
        self.years.get(year)?.get(album).map(Vec::as_slice)
    }

    pub fn years(&self) -> impl Iterator<Item = (&String, &YearEntry)> {
        self.years.iter()
    }

    pub fn album_count(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    pub fn file_count(&self) -> usize {
        self.years
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Drop repeated names within each album, keeping the first. Returns how many were dropped.
    fn dedup(&mut self) -> usize {
        let mut removed = 0;
        for names in self.years.values_mut().flat_map(BTreeMap::values_mut) {
            let mut seen = HashSet::with_capacity(names.len());
            let before = names.len();
            names.retain(|name| seen.insert(name.clone()));
            removed += before - names.len();
        }
        removed
    }
}

/// Consume a ledger and return it with the album's raw names recorded.
pub fn update_ledger(
    mut ledger: Ledger,
    year: &str,
    album: &str,
    raw: &BTreeSet<String>,
) -> Ledger {
    ledger.record(year, album, raw);
    ledger
}
