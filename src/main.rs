//! cellstore - command-line front end for the cell store

use anyhow::{Context, Result};
use cellstore_core::{Config, Sheet};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellstore")]
#[command(
    version,
    about = "Spreadsheet cell store: SET <id> <value> writes a cell, GET <id> reads its value"
)]
struct Cli {
    /// Run a command (can be repeated); without -c, commands are read from stdin
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Configuration file (default: config.toml in the user config dir)
    #[arg(long, conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any configuration file
    #[arg(long)]
    no_config: bool,

    /// Snapshot file to load at start and save at exit (overrides config)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        Config::default()
    } else {
        Config::load(cli.config.as_deref()).context("loading configuration")?
    };
    init_logging(&config);

    tracing::debug!(policy = ?config.cycle_check, "configuration loaded");

    let snapshot = cli.snapshot.clone().or_else(|| config.snapshot.clone());
    let sheet = Sheet::with_config(cellstore_core::MemoryStore::new(), &config);

    if let Some(path) = snapshot.as_deref() {
        if path.exists() {
            sheet
                .load_snapshot(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
        }
    }

    let all_ok = if cli.commands.is_empty() {
        run_repl(&sheet)?
    } else {
        run_commands(&sheet, &cli.commands)?
    };

    if let Some(path) = snapshot.as_deref() {
        sheet
            .save_snapshot(path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
    }

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}

fn run_commands(sheet: &Sheet, commands: &[String]) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    let mut all_ok = true;
    for command in commands {
        let response = sheet.dispatch_line(command);
        all_ok &= response.is_success();
        writeln!(stdout, "{} {}", response.status, response.body)?;
    }
    Ok(all_ok)
}

fn run_repl(sheet: &Sheet) -> Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut all_ok = true;
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let response = sheet.dispatch_line(trimmed);
        all_ok &= response.is_success();
        writeln!(stdout, "{} {}", response.status, response.body)?;
        stdout.flush()?;
    }
    Ok(all_ok)
}
