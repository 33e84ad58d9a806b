//! # scanshelf - Local storage for OCR scan sessions
//!
//! scanshelf keeps the results of a document-scanning front-end on the local
//! machine. Each batch of recognized text regions is saved as a scan session
//! with a generated id and creation time, and sessions older than the
//! retention window are pruned automatically.
//!
//! ## Features
//!
//! - **Single-slot storage**: the whole collection lives under one key of a
//!   string key-value backend, compatible with blobs written by the browser
//!   front-end
//! - **Pluggable backends**: in-memory (with an optional quota) and
//!   file-backed implementations of [`storage::KeyValueBackend`]
//! - **Retention**: scans older than a configurable number of 30-day months
//!   are removed on save and on explicit cleanup
//! - **Editing**: correct a region's text, drop a source file's regions, or
//!   rename a session
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust
//! use scanshelf::storage::{MemoryBackend, ScanStore};
//! use scanshelf::types::{ParsedResult, Rectangle};
//!
//! let mut store = ScanStore::new(MemoryBackend::new());
//! let region = ParsedResult::new(0, "page-1.png", 0, Rectangle::new(4.0, 8.0, 120.0, 24.0), "M10x60", 0.94);
//!
//! let id = store.save(vec![region], Some("bolts".to_string())).unwrap();
//! store.update_result_text(&id, 0, 0, "M10x65").unwrap();
//!
//! assert_eq!(store.get(&id).unwrap().results[0].text, "M10x65");
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Scan ids and recognized result regions
//! - [`storage`] - Backends, retention and the scan store
//! - [`config`] - Paths and settings
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities
//! - [`cli`] - Command-line subcommands

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{BackendError, CliError, StoreError};
pub use storage::{KeyValueBackend, LoadOutcome, SavedScan, ScanStore};
pub use types::{ParsedResult, Rectangle, ScanId};
