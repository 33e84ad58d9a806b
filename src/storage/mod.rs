//! Scan session persistence.
//!
//! Provides the key-value backend abstraction and the scan store that keeps
//! every session in a single serialized slot.

mod backend;
mod clock;
mod retention;
mod scan_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use retention::{
    Retention, DAYS_PER_MONTH, DAY_MS, DEFAULT_RETENTION_MONTHS, MAX_RETENTION_MONTHS,
};
pub use scan_store::{
    sort_results, LoadOutcome, SavedScan, ScanStore, StorageStats, DEFAULT_STORAGE_KEY,
};
