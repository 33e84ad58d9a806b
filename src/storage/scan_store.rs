//! Scan session storage over a single key-value slot.
//!
//! The whole collection is serialized as one JSON array under one key.
//! Every operation loads the array, computes, and rewrites it in full.

use super::backend::KeyValueBackend;
use super::clock::{Clock, SystemClock};
use super::retention::{Retention, DAY_MS};
use crate::error::{StoreError, StoreResult};
use crate::types::{ParsedResult, ScanId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Key the front-end has always stored its scans under.
pub const DEFAULT_STORAGE_KEY: &str = "boltparser-saved-scans";

/// A persisted scan session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScan {
    /// Unique identifier, fixed at creation.
    pub id: ScanId,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// Recognized regions, sorted at save time.
    pub results: Vec<ParsedResult>,
    /// Optional user label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SavedScan {
    /// Creation time as a UTC date-time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Number of distinct source files in this scan.
    pub fn file_count(&self) -> usize {
        self.results
            .iter()
            .map(|r| r.file_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Get a short summary of the scan.
    pub fn summary(&self) -> String {
        let created = self
            .created_at()
            .map_or_else(|| self.timestamp.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());

        format!(
            "{} [{}] - {} files, {} regions",
            self.name.as_deref().unwrap_or("(unnamed)"),
            created,
            self.file_count(),
            self.results.len()
        )
    }
}

/// What a load found at the storage key.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Missing,
    /// The stored collection decoded successfully.
    Loaded(Vec<SavedScan>),
    /// A value was present but unreadable; callers continue with no scans.
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }

    /// The scans this outcome yields, empty unless loaded.
    pub fn into_scans(self) -> Vec<SavedScan> {
        match self {
            Self::Loaded(scans) => scans,
            Self::Missing | Self::Recovered { .. } => Vec::new(),
        }
    }
}

/// Sort results by capture time when every result has one, otherwise by
/// file index. The sort is stable in both cases.
pub fn sort_results(results: &mut [ParsedResult]) {
    if results.iter().all(|r| r.image_created_at.is_some()) {
        results.sort_by_key(|r| r.image_created_at);
    } else {
        results.sort_by_key(|r| r.file_index);
    }
}

/// Scan session store over a string key-value backend.
pub struct ScanStore<B, C = SystemClock> {
    backend: B,
    key: String,
    retention: Retention,
    clock: C,
}

impl<B: KeyValueBackend> ScanStore<B> {
    /// Create a store using the default key, retention and system clock.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store that keeps its collection under `key`.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            retention: Retention::default(),
            clock: SystemClock,
        }
    }
}

impl<B: KeyValueBackend, C: Clock> ScanStore<B, C> {
    /// Replace the time source.
    pub fn with_clock<D: Clock>(self, clock: D) -> ScanStore<B, D> {
        ScanStore {
            backend: self.backend,
            key: self.key,
            retention: self.retention,
            clock,
        }
    }

    /// Set the retention window.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Generate a fresh scan id for the current time.
    pub fn generate_id(&self) -> ScanId {
        ScanId::generate(self.clock.now_ms())
    }

    /// Save a new scan session and return its id.
    ///
    /// The new scan is prepended to the collection and the retention sweep
    /// runs over the combined list before it is written.
    pub fn save(&mut self, results: Vec<ParsedResult>, name: Option<String>) -> StoreResult<ScanId> {
        let now = self.clock.now_ms();
        let id = ScanId::generate(now);

        let mut results = results;
        sort_results(&mut results);
        let region_count = results.len();

        let scan = SavedScan {
            id: id.clone(),
            timestamp: now,
            results,
            name,
        };

        let mut scans = self.load();
        scans.insert(0, scan);

        let retention = self.retention;
        scans.retain(|s| retention.keeps(s.timestamp, now));

        self.persist(&scans)?;
        info!(scan_id = %id, regions = region_count, "Scan saved");

        Ok(id)
    }

    /// Load the stored collection, reporting how it was obtained.
    pub fn load_outcome(&self) -> LoadOutcome {
        match self.read_raw() {
            Ok(Some(raw)) => self.decode(&raw),
            Ok(None) => LoadOutcome::Missing,
            Err(reason) => {
                warn!(key = %self.key, %reason, "Failed to read saved scans");
                LoadOutcome::Recovered { reason }
            }
        }
    }

    /// Load the stored collection, most recent first.
    ///
    /// Never fails: an absent or unreadable value yields an empty list.
    pub fn load(&self) -> Vec<SavedScan> {
        self.load_outcome().into_scans()
    }

    /// Get a scan by id.
    pub fn get(&self, id: &ScanId) -> Option<SavedScan> {
        self.load().into_iter().find(|s| s.id == *id)
    }

    /// Find a scan by id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> StoreResult<SavedScan> {
        let mut matches: Vec<_> = self
            .load()
            .into_iter()
            .filter(|s| s.id.as_str().starts_with(prefix))
            .collect();

        if let Some(exact) = matches.iter().position(|s| s.id.as_str() == prefix) {
            return Ok(matches.swap_remove(exact));
        }

        match matches.len() {
            0 => Err(StoreError::ScanNotFound(prefix.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(StoreError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches: n,
            }),
        }
    }

    /// Delete every scan with the given id. Always rewrites the collection.
    pub fn delete_scan(&mut self, id: &ScanId) -> StoreResult<()> {
        let mut scans = self.load();
        scans.retain(|s| s.id != *id);

        self.persist(&scans)?;
        info!(scan_id = %id, "Scan deleted");

        Ok(())
    }

    /// Remove all results of one source file from a scan.
    ///
    /// A scan left without results is removed entirely. Unknown ids are a
    /// no-op and nothing is written.
    pub fn delete_result(&mut self, scan_id: &ScanId, file_index: u32) -> StoreResult<()> {
        let mut scans = self.load();
        let Some(pos) = scans.iter().position(|s| s.id == *scan_id) else {
            debug!(scan_id = %scan_id, "No scan to delete results from");
            return Ok(());
        };

        scans[pos].results.retain(|r| r.file_index != file_index);
        if scans[pos].results.is_empty() {
            scans.remove(pos);
        }

        self.persist(&scans)?;
        info!(scan_id = %scan_id, file_index, "Result rows deleted from scan");

        Ok(())
    }

    /// Replace the text of one result region.
    ///
    /// Nothing is written when either the scan or the region is unknown.
    pub fn update_result_text(
        &mut self,
        scan_id: &ScanId,
        file_index: u32,
        rectangle_index: u32,
        new_text: &str,
    ) -> StoreResult<()> {
        let mut scans = self.load();
        let Some(result) = scans
            .iter_mut()
            .find(|s| s.id == *scan_id)
            .and_then(|s| {
                s.results
                    .iter_mut()
                    .find(|r| r.is_region(file_index, rectangle_index))
            })
        else {
            debug!(scan_id = %scan_id, file_index, rectangle_index, "No result region to update");
            return Ok(());
        };

        result.text = new_text.to_string();

        self.persist(&scans)?;
        info!(scan_id = %scan_id, file_index, rectangle_index, "Result text updated");

        Ok(())
    }

    /// Set or clear a scan's name. Returns whether a scan was renamed.
    pub fn rename_scan(&mut self, id: &ScanId, name: Option<String>) -> StoreResult<bool> {
        let mut scans = self.load();
        let Some(scan) = scans.iter_mut().find(|s| s.id == *id) else {
            debug!(scan_id = %id, "No scan to rename");
            return Ok(false);
        };

        scan.name = name;

        self.persist(&scans)?;
        info!(scan_id = %id, "Scan renamed");

        Ok(true)
    }

    /// Scans created between `start_ms` and the last millisecond of the day
    /// starting at `end_ms`, both inclusive.
    pub fn scans_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<SavedScan> {
        let end = end_ms.saturating_add(DAY_MS - 1);

        self.load()
            .into_iter()
            .filter(|s| s.timestamp >= start_ms && s.timestamp <= end)
            .collect()
    }

    /// Remove scans older than the retention window.
    ///
    /// Writes only when something was removed. Returns the number removed.
    pub fn cleanup_old_scans(&mut self) -> StoreResult<usize> {
        let now = self.clock.now_ms();
        let retention = self.retention;

        let mut scans = self.load();
        let before = scans.len();
        scans.retain(|s| retention.keeps(s.timestamp, now));

        let removed = before - scans.len();
        if removed > 0 {
            self.persist(&scans)?;
            info!(removed, "Cleaned up old scans");
        }

        Ok(removed)
    }

    /// Get storage statistics.
    pub fn stats(&self) -> StorageStats {
        let raw = self.read_raw().ok().flatten().unwrap_or_default();
        let scans = self.decode(&raw).into_scans();

        StorageStats {
            scan_count: scans.len(),
            result_count: scans.iter().map(|s| s.results.len()).sum(),
            total_size_bytes: raw.len(),
            oldest_scan: scans.iter().map(|s| s.timestamp).min(),
            newest_scan: scans.iter().map(|s| s.timestamp).max(),
        }
    }

    fn read_raw(&self) -> Result<Option<String>, String> {
        self.backend.get(&self.key).map_err(|e| e.to_string())
    }

    fn decode(&self, raw: &str) -> LoadOutcome {
        if raw.trim().is_empty() {
            return LoadOutcome::Missing;
        }

        match serde_json::from_str::<Vec<SavedScan>>(raw) {
            Ok(scans) => LoadOutcome::Loaded(scans),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to load saved scans");
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn persist(&mut self, scans: &[SavedScan]) -> StoreResult<()> {
        let content = serde_json::to_string(scans)?;
        self.backend.set(&self.key, &content)?;

        Ok(())
    }
}

/// Storage statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of stored scans.
    pub scan_count: usize,
    /// Number of stored result regions across all scans.
    pub result_count: usize,
    /// Size of the serialized collection in bytes.
    pub total_size_bytes: usize,
    /// Oldest scan timestamp.
    pub oldest_scan: Option<i64>,
    /// Newest scan timestamp.
    pub newest_scan: Option<i64>,
}
