//! Config subcommand implementation.
//!
//! Handles `scanshelf config show|init`.

use super::Cli;
use crate::config::{Paths, StoreSettings};
use crate::error::{CliError, CliResult};
use crate::output;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Show or initialize the settings file.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, cli: &Cli, quiet: bool) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => {
                let settings = cli.settings()?;
                let content = serde_json::to_string_pretty(&settings)
                    .map_err(|e| CliError::Other(e.to_string()))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Init { force } => {
                let path = settings_path(cli)?;
                init_settings(&path, *force)?;

                if !quiet {
                    output::print_success(&format!("Wrote settings to {}", path.display()));
                }
                Ok(())
            }
        }
    }
}

fn settings_path(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Paths::discover()?.settings_file()),
    }
}

fn init_settings(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::Other(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    StoreSettings::default().save_to(path)?;
    Ok(())
}
