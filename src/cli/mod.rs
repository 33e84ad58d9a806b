//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `scanshelf import <file>` - Save OCR results as a new scan
//! - `scanshelf history|show|export|range` - Browse saved scans
//! - `scanshelf delete|delete-file|edit|rename` - Modify saved scans
//! - `scanshelf cleanup|stats|config` - Maintenance

mod config;
mod edit;
mod export;
mod history;
mod import;

pub use config::{ConfigAction, ConfigCommand};
pub use edit::{DeleteCommand, DeleteFileCommand, EditCommand, RenameCommand};
pub use export::{ExportCommand, ShowCommand};
pub use history::{HistoryCommand, RangeCommand};
pub use import::ImportCommand;

use crate::config::{Paths, StoreSettings};
use crate::error::CliResult;
use crate::output;
use crate::storage::{FileBackend, SavedScan, ScanStore};
use crate::types::ScanId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Store type driven by the CLI.
pub type CliStore = ScanStore<FileBackend>;

/// scanshelf - keep OCR scan sessions on the local machine.
///
/// Scans are grouped into sessions, stored under a single key in a local
/// key-value directory, and removed automatically once they age out of the
/// retention window.
#[derive(Parser, Debug)]
#[command(name = "scanshelf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local storage for OCR scan sessions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the key-value storage files
    #[arg(long, global = true, value_name = "DIR", env = "SCANSHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a JSON file of OCR results as a new scan
    #[command(alias = "i")]
    Import(ImportCommand),

    /// List saved scans, newest first
    #[command(alias = "h")]
    History(HistoryCommand),

    /// Show one scan
    Show(ShowCommand),

    /// Export one scan to a file or stdout
    #[command(alias = "e")]
    Export(ExportCommand),

    /// Delete a scan
    Delete(DeleteCommand),

    /// Delete every region of one source file from a scan
    DeleteFile(DeleteFileCommand),

    /// Correct the text of one region
    Edit(EditCommand),

    /// Set or clear a scan's name
    Rename(RenameCommand),

    /// List scans created within a date range
    Range(RangeCommand),

    /// Remove scans older than the retention window
    Cleanup,

    /// Show storage statistics
    Stats,

    /// Show or initialize the settings file
    Config(ConfigCommand),
}

impl Cli {
    /// Load the effective settings.
    pub fn settings(&self) -> CliResult<StoreSettings> {
        let settings = match &self.config {
            Some(path) => StoreSettings::load_from(path)?,
            None => StoreSettings::load(&Paths::discover()?)?,
        };

        Ok(settings)
    }

    /// Open the scan store described by the settings and flags.
    pub fn open_store(&self, settings: &StoreSettings) -> CliResult<CliStore> {
        let dir = match self.data_dir.clone().or_else(|| settings.data_dir.clone()) {
            Some(dir) => dir,
            None => Paths::discover()?.storage_dir(),
        };

        tracing::debug!(dir = %dir.display(), key = %settings.storage_key, "Opening scan store");

        let backend = FileBackend::open(dir)?;
        Ok(ScanStore::with_key(backend, settings.storage_key.clone())
            .with_retention(settings.retention()))
    }

    /// Run the selected subcommand.
    pub fn run(&self) -> CliResult<()> {
        if let Commands::Config(cmd) = &self.command {
            return cmd.execute(self, self.quiet);
        }

        let settings = self.settings()?;
        let mut store = self.open_store(&settings)?;
        self.command.execute(&mut store, self.quiet)
    }
}

impl Commands {
    /// Execute a store subcommand.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        match self {
            Self::Import(cmd) => cmd.execute(store, quiet),
            Self::History(cmd) => cmd.execute(store, quiet),
            Self::Show(cmd) => cmd.execute(store, quiet),
            Self::Export(cmd) => cmd.execute(store, quiet),
            Self::Delete(cmd) => cmd.execute(store, quiet),
            Self::DeleteFile(cmd) => cmd.execute(store, quiet),
            Self::Edit(cmd) => cmd.execute(store, quiet),
            Self::Rename(cmd) => cmd.execute(store, quiet),
            Self::Range(cmd) => cmd.execute(store, quiet),
            Self::Cleanup => cleanup(store, quiet),
            Self::Stats => {
                output::print_stats(&store.stats(), store.key());
                Ok(())
            }
            Self::Config(_) => Err(crate::error::CliError::Other(
                "config does not operate on the scan store".to_string(),
            )),
        }
    }
}

fn cleanup(store: &mut CliStore, quiet: bool) -> CliResult<()> {
    let removed = store.cleanup_old_scans()?;

    if !quiet {
        if removed == 0 {
            output::print_info("No scans older than the retention window");
        } else {
            output::print_success(&format!("Removed {} old scan(s)", removed));
        }
    }

    Ok(())
}

/// Find a scan by full id or unique prefix.
pub(crate) fn resolve_scan(store: &CliStore, id_or_prefix: &str) -> CliResult<SavedScan> {
    let id: ScanId = id_or_prefix.parse()?;
    Ok(store.find_by_prefix(id.as_str())?)
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
