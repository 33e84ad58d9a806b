//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of saved scans.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    format_timestamp, print_error, print_history, print_info, print_stats,
    print_success, print_warning, write_plain,
};

use crate::cli::OutputFormat;
use crate::storage::SavedScan;
use std::io::{self, Write};

/// Write scans in the requested format.
pub fn write_scans<W: Write>(out: &mut W, scans: &[SavedScan], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => scans.iter().try_for_each(|scan| write_plain(&mut *out, scan)),
        OutputFormat::Json => write_json(out, scans),
        OutputFormat::Csv => write_csv(out, scans),
    }
}

/// Render scans to a string in the requested format.
pub fn render_scans(scans: &[SavedScan], format: OutputFormat) -> io::Result<String> {
    let mut buf = Vec::new();
    write_scans(&mut buf, scans, format)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

/// Print scans to stdout in the requested format.
pub fn print_scans(scans: &[SavedScan], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_scans(&mut out, scans, format)
}
