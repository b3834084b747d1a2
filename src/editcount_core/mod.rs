pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod persist;
pub mod reconcile;
pub mod report;
pub mod scan;

pub use cli::{Cli, Commands, RunArgs};
pub use config::{Config, OutputFormat};
pub use error::{EditCountError, Result};
pub use ledger::{Ledger, update_ledger};
pub use reconcile::{AlbumStats, Reconciler, Report, Totals, YearReport, compute_album_stats};
pub use report::{format_summary, render_report, write_report};
pub use scan::{is_raw_file, list_subdirectories, scan_edited_files, scan_raw_files};
