//! Import subcommand implementation.
//!
//! Handles `scanshelf import <file>`: reads a JSON array of OCR results as
//! produced by the recognition front-end and saves it as a new scan.

use super::CliStore;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::types::ParsedResult;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Save OCR results as a new scan.
#[derive(Parser, Debug)]
pub struct ImportCommand {
    /// JSON file containing an array of results ("-" reads stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Label for the new scan
    #[arg(short, long)]
    pub name: Option<String>,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let content = self.read_input()?;
        let results = parse_results(&content)?;
        let count = results.len();

        let id = store.save(results, self.name.clone())?;

        if quiet {
            println!("{}", id);
        } else {
            output::print_success(&format!("Saved {} region(s) as scan {}", count, id));
        }

        Ok(())
    }

    fn read_input(&self) -> CliResult<String> {
        if self.input.as_os_str() == "-" {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            return Ok(content);
        }

        fs::read_to_string(&self.input).map_err(|e| {
            CliError::Other(format!("failed to read {}: {}", self.input.display(), e))
        })
    }
}

/// Parse a JSON array of OCR results.
fn parse_results(content: &str) -> CliResult<Vec<ParsedResult>> {
    serde_json::from_str(content).map_err(|e| CliError::Other(format!("invalid results file: {}", e)))
}
