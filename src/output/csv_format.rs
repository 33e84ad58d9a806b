//! CSV output formatting.
//!
//! One row per result region, so exports open directly in a spreadsheet.

use crate::storage::SavedScan;
use std::io::{self, Write};

const HEADER: [&str; 11] = [
    "scan_id",
    "scan_name",
    "file_index",
    "file_name",
    "rectangle_index",
    "left",
    "top",
    "width",
    "height",
    "confidence",
    "text",
];

/// Write the regions of all scans in CSV format.
pub fn write_csv<W: Write>(out: W, scans: &[SavedScan]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(HEADER)?;

    for scan in scans {
        for result in &scan.results {
            wtr.write_record([
                scan.id.as_str(),
                scan.name.as_deref().unwrap_or(""),
                result.file_index.to_string().as_str(),
                result.file_name.as_str(),
                result.rectangle_index.to_string().as_str(),
                result.rectangle.left.to_string().as_str(),
                result.rectangle.top.to_string().as_str(),
                result.rectangle.width.to_string().as_str(),
                result.rectangle.height.to_string().as_str(),
                result.confidence.to_string().as_str(),
                result.text.as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
