//! Core data types for scan sessions.
//!
//! Newtypes keep scan identifiers distinct from arbitrary strings, and the
//! result types mirror the shape produced by the OCR front-end.

mod result;
mod scan_id;

pub use result::{ParsedResult, Rectangle};
pub use scan_id::{ScanId, ScanIdError};
