//! JSON output formatting.

use crate::storage::SavedScan;
use std::io::{self, Write};

/// Write scans as a pretty-printed JSON array, in the stored shape.
pub fn write_json<W: Write>(out: &mut W, scans: &[SavedScan]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, scans).map_err(io::Error::other)?;
    writeln!(out)
}
