//! Subcommands that modify saved scans.
//!
//! Handles `delete`, `delete-file`, `edit` and `rename`.

use super::{resolve_scan, CliStore};
use crate::error::{CliError, CliResult, StoreError};
use crate::output;
use crate::types::ScanId;
use clap::Parser;

/// Delete a scan.
#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Skip confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let scan = resolve_scan(store, &self.scan_id)?;

        if !self.yes {
            println!("Delete scan {}? [y/N] ", scan.summary());
            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        store.delete_scan(&scan.id)?;

        if !quiet {
            output::print_success(&format!("Scan {} deleted", scan.id.short()));
        }

        Ok(())
    }
}

/// Delete every region of one source file from a scan.
#[derive(Parser, Debug)]
pub struct DeleteFileCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Index of the source file within the scan
    #[arg(value_name = "FILE_INDEX")]
    pub file_index: u32,
}

impl DeleteFileCommand {
    /// Execute the delete-file command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let scan = resolve_scan(store, &self.scan_id)?;
        let removed = scan
            .results
            .iter()
            .filter(|r| r.file_index == self.file_index)
            .count();

        if removed == 0 {
            return Err(CliError::Other(format!(
                "scan {} has no regions from file {}",
                scan.id.short(),
                self.file_index
            )));
        }

        store.delete_result(&scan.id, self.file_index)?;

        if !quiet {
            if removed == scan.results.len() {
                output::print_success(&format!(
                    "Removed the last file; scan {} deleted",
                    scan.id.short()
                ));
            } else {
                output::print_success(&format!(
                    "Removed {} region(s) of file {} from scan {}",
                    removed,
                    self.file_index,
                    scan.id.short()
                ));
            }
        }

        Ok(())
    }
}

/// Correct the text of one region.
#[derive(Parser, Debug)]
pub struct EditCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// Index of the source file within the scan
    #[arg(value_name = "FILE_INDEX")]
    pub file_index: u32,

    /// Index of the region within the file
    #[arg(value_name = "RECTANGLE_INDEX")]
    pub rectangle_index: u32,

    /// Replacement text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

impl EditCommand {
    /// Execute the edit command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let scan = resolve_scan(store, &self.scan_id)?;

        if !scan
            .results
            .iter()
            .any(|r| r.is_region(self.file_index, self.rectangle_index))
        {
            return Err(CliError::Other(format!(
                "scan {} has no region {}/{}",
                scan.id.short(),
                self.file_index,
                self.rectangle_index
            )));
        }

        store.update_result_text(&scan.id, self.file_index, self.rectangle_index, &self.text)?;

        if !quiet {
            output::print_success(&format!(
                "Updated region {}/{} of scan {}",
                self.file_index,
                self.rectangle_index,
                scan.id.short()
            ));
        }

        Ok(())
    }
}

/// Set or clear a scan's name.
#[derive(Parser, Debug)]
pub struct RenameCommand {
    /// Scan ID or unique prefix
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: String,

    /// New name (omit to clear)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

impl RenameCommand {
    /// Execute the rename command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let scan = resolve_scan(store, &self.scan_id)?;
        let name = self.name.clone().filter(|n| !n.trim().is_empty());

        rename(store, &scan.id, name.clone())?;

        if !quiet {
            match name {
                Some(name) => {
                    output::print_success(&format!("Scan {} renamed to '{}'", scan.id.short(), name))
                }
                None => output::print_success(&format!("Cleared name of scan {}", scan.id.short())),
            }
        }

        Ok(())
    }
}

/// Rename a resolved scan, failing if it is gone by the time of the write.
fn rename(store: &mut CliStore, id: &ScanId, name: Option<String>) -> CliResult<()> {
    if !store.rename_scan(id, name)? {
        return Err(StoreError::ScanNotFound(id.to_string()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{region, temp_store};
    use super::*;

    #[test]
    fn test_delete_command() {
        let (mut store, _dir) = temp_store();
        let id = store.save(vec![region(0, 0, "a")], None).unwrap();

        let cmd = DeleteCommand {
            scan_id: id.to_string(),
            yes: true,
        };
        cmd.execute(&mut store, true).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_delete_file_command() {
        let (mut store, _dir) = temp_store();
        let id = store
            .save(vec![region(0, 0, "a"), region(0, 1, "b"), region(1, 0, "c")], None)
            .unwrap();

        let cmd = DeleteFileCommand {
            scan_id: id.to_string(),
            file_index: 0,
        };
        cmd.execute(&mut store, true).unwrap();
        assert_eq!(store.get(&id).unwrap().results.len(), 1);

        // Nothing left to remove from file 0.
        assert!(cmd.execute(&mut store, true).is_err());

        let last = DeleteFileCommand {
            scan_id: id.to_string(),
            file_index: 1,
        };
        last.execute(&mut store, true).unwrap();
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_edit_command() {
        let (mut store, _dir) = temp_store();
        let id = store
            .save(vec![region(2, 4, "keep"), region(2, 5, "M8x4O")], None)
            .unwrap();

        let cmd = EditCommand {
            scan_id: id.to_string(),
            file_index: 2,
            rectangle_index: 5,
            text: "M8x40".to_string(),
        };
        cmd.execute(&mut store, true).unwrap();

        let scan = store.get(&id).unwrap();
        assert_eq!(scan.results[0].text, "keep");
        assert_eq!(scan.results[1].text, "M8x40");
    }

    #[test]
    fn test_edit_unknown_region() {
        let (mut store, _dir) = temp_store();
        let id = store.save(vec![region(0, 0, "a")], None).unwrap();

        let cmd = EditCommand {
            scan_id: id.to_string(),
            file_index: 0,
            rectangle_index: 3,
            text: "x".to_string(),
        };
        assert!(matches!(cmd.execute(&mut store, true), Err(CliError::Other(_))));
    }

    #[test]
    fn test_rename_command() {
        let (mut store, _dir) = temp_store();
        let id = store.save(vec![region(0, 0, "a")], None).unwrap();

        RenameCommand {
            scan_id: id.to_string(),
            name: Some("site visit".to_string()),
        }
        .execute(&mut store, true)
        .unwrap();
        assert_eq!(store.get(&id).unwrap().name.as_deref(), Some("site visit"));

        RenameCommand {
            scan_id: id.to_string(),
            name: Some("  ".to_string()),
        }
        .execute(&mut store, true)
        .unwrap();
        assert_eq!(store.get(&id).unwrap().name, None);
    }

    #[test]
    fn test_rename_vanished_scan_is_an_error() {
        let (mut store, dir) = temp_store();
        let gone: ScanId = "scan-9-gone".parse().unwrap();

        let err = rename(&mut store, &gone, Some("late".to_string())).unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::ScanNotFound(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
