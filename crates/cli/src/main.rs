// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use atelier_api::{Clock, FixedClock, SystemClock, Workspace};
use atelier_persistence::MemoryStore;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::Result;
use time::{Date, OffsetDateTime};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

use crate::commands::{CliError, Command, parse_date};

/// Atelier - invoices and contracts for a small studio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an in-memory store.
    #[arg(short, long, env = "ATELIER_DATABASE")]
    database: Option<PathBuf>,

    /// Date used for numbering and overdue checks (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    today: Option<Date>,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn clock(&self) -> Arc<dyn Clock> {
        match self.today {
            Some(date) => Arc::new(FixedClock::new(OffsetDateTime::now_utc().replace_date(date))),
            None => Arc::new(SystemClock),
        }
    }

    fn workspace(&self) -> Result<Workspace, CliError> {
        let clock = self.clock();
        if let Some(path) = &self.database {
            info!("Using file-based database at: {}", path.display());
            Ok(Workspace::open(path, clock)?)
        } else {
            info!("Using in-memory store; nothing will be kept");
            Ok(Workspace::new(Arc::new(MemoryStore::new()), clock))
        }
    }

    fn run(self) -> Result<(), CliError> {
        let workspace = self.workspace()?;
        let output = self.command.execute(&workspace)?;

        for warning in workspace.storage_warnings() {
            tracing::warn!("{warning}");
        }

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            error!(kind = err.kind(), "{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
