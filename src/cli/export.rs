//! Show and export subcommands.
//!
//! Handles `scanshelf show <scan-id>` and `scanshelf export <scan-id>`.

use super::{resolve_scan, CliStore, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Show one scan.
#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(&self, store: &mut CliStore, _quiet: bool) -> CliResult<()> {
        let scan = resolve_scan(store, &self.scan_id)?;
        output::print_scans(std::slice::from_ref(&scan), self.format)?;
        Ok(())
    }
}

/// Export scan results.
#[derive(Parser, Debug)]
pub struct ExportCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,

    /// Export only regions from this source file
    #[arg(long, value_name = "INDEX")]
    pub file_index: Option<u32>,
}

impl ExportCommand {
    /// Execute the export command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let mut scan = resolve_scan(store, &self.scan_id)?;

        if let Some(file_index) = self.file_index {
            scan.results.retain(|r| r.file_index == file_index);
        }

        let content = output::render_scans(std::slice::from_ref(&scan), self.format)?;

        if let Some(ref path) = self.output_file {
            fs::write(path, &content)
                .map_err(|e| CliError::Other(format!("failed to write file: {}", e)))?;

            if !quiet {
                output::print_success(&format!(
                    "Exported scan {} to {}",
                    scan.id.short(),
                    path.display()
                ));
            }
        } else {
            print!("{}", content);
        }

        Ok(())
    }
}
