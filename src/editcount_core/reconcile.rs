use crate::editcount_core::config::Config;
use crate::editcount_core::error::Result;
use crate::editcount_core::ledger::Ledger;
use crate::editcount_core::report::write_report;
use crate::editcount_core::scan::{list_subdirectories, scan_edited_files, scan_raw_files};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Counts for one album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumStats {
    pub album: String,
    /// Every raw file ever recorded for the album.
    pub total: usize,
    /// Recorded files still present as raws that have an edited output.
    pub edited: usize,
    /// Recorded files no longer present as raws.
    pub deleted: usize,
}

impl AlbumStats {
    /// Files still waiting for an edit.
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.edited).saturating_sub(self.deleted)
    }

    /// Every surviving raw has been edited.
    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearReport {
    pub year: String,
    pub albums: Vec<AlbumStats>,
}

/// Per-year album counts for a whole run. Serializes as a bare array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub years: Vec<YearReport>,
}

/// Sums over every album in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub albums: usize,
    pub complete: usize,
    pub total: usize,
    pub edited: usize,
    pub deleted: usize,
}

impl Report {
    pub fn albums(&self) -> impl Iterator<Item = &AlbumStats> {
        self.years.iter().flat_map(|y| y.albums.iter())
    }

    pub fn totals(&self) -> Totals {
        self.albums().fold(Totals::default(), |mut t, a| {
            t.albums += 1;
            t.complete += usize::from(a.is_complete());
            t.total += a.total;
            t.edited += a.edited;
            t.deleted += a.deleted;
            t
        })
    }
}

/// Count an album's recorded files against the current raw and edited scans.
///
/// The ledger entry drives the count: a recorded name missing from `raw` is
/// deleted, otherwise it is edited if it appears in `edited`.
pub fn compute_album_stats(
    album: &str,
    ledger_entry: &[String],
    raw: &BTreeSet<String>,
    edited: &BTreeSet<String>,
) -> AlbumStats {
    let mut stats = AlbumStats {
        album: album.to_string(),
        total: ledger_entry.len(),
        edited: 0,
        deleted: 0,
    };

    for name in ledger_entry {
        if !raw.contains(name) {
            stats.deleted += 1;
        } else if edited.contains(name) {
            stats.edited += 1;
        }
    }

    stats
}

/// Walks the source and destination trees and keeps the ledger current.
pub struct Reconciler {
    config: Config,
}

impl Reconciler {
    pub fn new(config: Config) -> Self {
        Reconciler { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan every year and album under the source root, recording new raw files
    /// into `ledger`. Returns the updated ledger and the report.
    pub fn run(&self, mut ledger: Ledger) -> Result<(Ledger, Report)> {
        let source_root = &self.config.source_root;
        log::info!("Scanning {}", source_root.display());

        let spinner = ProgressBar::new_spinner().with_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} albums {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let mut report = Report::default();

        for year in list_subdirectories(source_root)? {
            let mut albums = Vec::new();

            for album in list_subdirectories(&source_root.join(&year))? {
                spinner.set_message(format!("{}/{}", year, album));
                let stats = self.reconcile_album(&mut ledger, &year, &album)?;
                log::info!(
                    "{}/{}: {}/{}/{} edited/deleted/total",
                    year,
                    album,
                    stats.edited,
                    stats.deleted,
                    stats.total
                );
                albums.push(stats);
                spinner.inc(1);
            }

            report.years.push(YearReport { year, albums });
        }

        spinner.finish_and_clear();
        Ok((ledger, report))
    }

    /// Record one album's raw files and count it.
    pub fn reconcile_album(
        &self,
        ledger: &mut Ledger,
        year: &str,
        album: &str,
    ) -> Result<AlbumStats> {
        let raw = scan_raw_files(&self.config.source_root.join(year).join(album))?;
        let entry = ledger.record(year, album, &raw);
        let edited = scan_edited_files(&self.config.dest_root.join(year).join(album))?;

        Ok(compute_album_stats(album, entry, &raw, &edited))
    }

    /// Full run: load the ledger, reconcile, then write the report and ledger.
    /// Nothing is written unless the whole traversal succeeds, or at all with `dry_run`.
    pub fn execute(&self, dry_run: bool) -> Result<Report> {
        let ledger = Ledger::load(&self.config.ledger_path)?;
        let (ledger, report) = self.run(ledger)?;

        if dry_run {
            log::info!(
                "Dry run, leaving {} and {} untouched",
                self.config.output_path.display(),
                self.config.ledger_path.display()
            );
            return Ok(report);
        }

        write_report(&report, &self.config.output_path, &self.config.output_format)?;
        ledger.save(&self.config.ledger_path)?;

        Ok(report)
    }
}
