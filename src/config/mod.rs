//! Configuration management for scanshelf.
//!
//! Provides XDG-compliant paths and the settings that shape the scan store:
//! storage key, retention window and storage directory.

mod settings;

pub use settings::{Paths, StoreSettings};
