use anyhow::{Context, Result};
use clap::Parser;
use editcount::editcount_core::{Cli, Commands, Ledger, Reconciler, format_summary};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("editcount.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    match cli.command {
        Commands::Run(args) => {
            let config = match args.to_config().validate() {
                Ok(config) => config,
                Err(e) if e.is_config_error() => {
                    return Err(e).context("Invalid configuration");
                }
                Err(e) => return Err(e.into()),
            };
            let reconciler = Reconciler::new(config);
            let report = reconciler.execute(args.dry_run)?;

            if args.dry_run {
                println!("DRY RUN - nothing written\n");
            }
            print!("{}", format_summary(&report));

            if !args.dry_run {
                let config = reconciler.config();
                println!("\nReport written to {}", config.output_path.display());
                println!("Ledger written to {}", config.ledger_path.display());
            }
        }

        Commands::Status { ledger } => {
            let recorded = Ledger::load(&ledger)?;

            if recorded.is_empty() {
                println!("Ledger {} is empty", ledger.display());
                return Ok(());
            }

            println!("Ledger: {}", ledger.display());
            println!("─────────────────────────────────");
            for (year, albums) in recorded.years() {
                println!("{}", year);
                for (album, names) in albums {
                    println!("  {:<32} {:>6} files", album, names.len());
                }
            }
            println!("─────────────────────────────────");
            println!(
                "Total: {} albums, {} files",
                recorded.album_count(),
                recorded.file_count()
            );
        }
    }

    Ok(())
}
