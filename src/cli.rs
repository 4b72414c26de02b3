use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod report;
mod shell;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use report::ListFormat;
use roster::{Config, RecordStore};
use shell::{DialoguerPrompter, Prompter, Shell};
use terminal::Colorize;
use tracing::instrument;

/// Interactive in-memory student record shell
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Student records to import at startup
    input: PathBuf,

    /// Export to this file on exit instead of asking
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Format used when printing every student
    #[arg(long, value_enum, default_value_t)]
    format: ListFormat,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(anyhow::Error::msg)?,
            None => Config::default(),
        };

        let store = open_store(&self.input)?;

        let stdout = io::stdout();
        let mut shell = Shell::new(store, config, self.format, DialoguerPrompter, stdout.lock());
        shell.run()?;

        let (store, config, mut prompter, mut out) = shell.into_parts();
        finish_session(&store, &config, self.output.as_deref(), &mut prompter, &mut out)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Imports the startup file. A missing or malformed file ends the session.
#[instrument]
fn open_store(input: &Path) -> anyhow::Result<RecordStore> {
    if !input.is_file() {
        anyhow::bail!("Input file not found - {}", input.display());
    }
    let store = RecordStore::open(input)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    tracing::info!(count = store.len(), "imported student records");
    Ok(store)
}

/// Offers the end-of-session export.
///
/// With an explicit output path the export happens without prompting.
fn finish_session(
    store: &RecordStore,
    config: &Config,
    output: Option<&Path>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        if !prompter.confirm("Save changes to output file?")? {
            return Ok(());
        }
        let default = config
            .export_path()
            .map(|path| path.display().to_string());
        let filename = prompter.text("Enter output filename", default.as_deref())?;
        if filename.trim().is_empty() {
            writeln!(out, "{}", "No filename given, nothing saved".warning())?;
            return Ok(());
        }
        PathBuf::from(filename.trim())
    };

    match store.export_file(&path) {
        Ok(()) => writeln!(out, "{}", format!("Data saved to {}", path.display()).success())?,
        Err(e) => {
            tracing::warn!("{e}");
            writeln!(
                out,
                "{}",
                format!("Error saving data to file {}: {e}", path.display()).warning()
            )?;
        }
    }
    Ok(())
}
