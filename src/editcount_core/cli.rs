use crate::editcount_core::config::{
    Config, DEFAULT_LEDGER_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_VAR_NAME, OutputFormat,
};
use clap::{Args, Parser, Subcommand};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track how many raw photos in each album have been edited")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable file logging to editcount.log
    #[arg(long = "log", global = true)]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug, global = true)]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the source and destination trees, update the ledger and write the report
    Run(RunArgs),

    /// Show what the ledger has recorded so far, without scanning
    Status {
        /// Ledger file to read
        #[arg(long, default_value = DEFAULT_LEDGER_FILE)]
        ledger: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Root of the raw files, laid out as <year>/<album>/
    #[arg(long, env = "PHOTO_SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Root of the edited outputs, mirroring the source layout
    #[arg(long, env = "PHOTO_DEST_DIR")]
    pub dest_dir: PathBuf,

    /// Ledger of every raw file seen so far (created if missing)
    #[arg(long, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,

    /// Report file to write
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Variable name the report is assigned to
    #[arg(long, default_value = DEFAULT_VAR_NAME, conflicts_with = "json")]
    pub var_name: String,

    /// Write the report as a bare JSON array
    #[arg(long)]
    pub json: bool,

    /// Scan and print the summary without writing the report or the ledger
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn to_config(&self) -> Config {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Script {
                var_name: self.var_name.clone(),
            }
        };

        Config::new(&self.source_dir, &self.dest_dir)
            .with_ledger_path(&self.ledger)
            .with_output_path(&self.output)
            .with_output_format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_defaults() {
        let cli = Cli::parse_from([
            "editcount",
            "run",
            "--source-dir",
            "/raws",
            "--dest-dir",
            "/edits",
        ]);

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = args.to_config();
        assert_eq!(config.source_root, PathBuf::from("/raws"));
        assert_eq!(config.ledger_path, PathBuf::from("counts.json"));
        assert_eq!(config.output_path, PathBuf::from("photo_data.js"));
        assert_eq!(config.output_format, OutputFormat::default());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_run_args_json() {
        let cli = Cli::parse_from([
            "editcount",
            "run",
            "--source-dir",
            "/raws",
            "--dest-dir",
            "/edits",
            "--json",
            "--output",
            "report.json",
        ]);

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.to_config().output_format, OutputFormat::Json);
    }

    #[test]
    fn test_json_conflicts_with_var_name() {
        let result = Cli::try_parse_from([
            "editcount",
            "run",
            "--source-dir",
            "/raws",
            "--dest-dir",
            "/edits",
            "--json",
            "--var-name",
            "photos",
        ]);
        assert!(result.is_err());
    }
}
