//! Scan store behaviour over the file backend.

use scanshelf::storage::{
    FileBackend, FixedClock, KeyValueBackend, LoadOutcome, SavedScan, ScanStore, DAY_MS,
    DEFAULT_STORAGE_KEY,
};
use scanshelf::types::{ParsedResult, Rectangle};
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

const NOW: i64 = 1_760_000_000_000;

fn region(file_index: u32, rectangle_index: u32, text: &str, confidence: f64) -> ParsedResult {
    ParsedResult::new(
        file_index,
        format!("scan-{}.jpg", file_index),
        rectangle_index,
        Rectangle::new(12.0, 40.5, 220.0, 31.25),
        text,
        confidence,
    )
}

fn tuples(results: &[ParsedResult]) -> BTreeSet<(u32, u32, String, u64)> {
    results
        .iter()
        .map(|r| (r.file_index, r.rectangle_index, r.text.clone(), r.confidence.to_bits()))
        .collect()
}

fn open(dir: &std::path::Path, clock: &FixedClock) -> ScanStore<FileBackend, FixedClock> {
    ScanStore::new(FileBackend::open(dir).unwrap()).with_clock(clock.clone())
}

#[test]
fn test_saved_results_survive_reopen() {
    let dir = tempdir().unwrap();
    let clock = FixedClock::new(NOW);
    let results = vec![
        region(1, 0, "HEX M8", 0.91),
        region(0, 2, "", 0.0),
        region(0, 1, "ボルト", 0.55),
    ];

    let id = open(dir.path(), &clock).save(results.clone(), None).unwrap();

    let reopened = open(dir.path(), &clock);
    let scan = reopened.get(&id).expect("scan should persist");
    assert_eq!(tuples(&scan.results), tuples(&results));
}

#[test]
fn test_collection_stored_under_one_key() {
    let dir = tempdir().unwrap();
    let clock = FixedClock::new(NOW);
    let mut store = open(dir.path(), &clock);

    store.save(vec![region(0, 0, "a", 1.0)], None).unwrap();
    store.save(vec![region(0, 0, "b", 1.0)], None).unwrap();

    let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", DEFAULT_STORAGE_KEY))).unwrap();
    let stored: Vec<SavedScan> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 2);
}

#[test]
fn test_retention_sweep_after_reopen() {
    let dir = tempdir().unwrap();
    let clock = FixedClock::new(NOW - 91 * DAY_MS);

    let stale = open(dir.path(), &clock)
        .save(vec![region(0, 0, "stale", 1.0)], None)
        .unwrap();
    clock.set(NOW - 89 * DAY_MS);
    let fresh = open(dir.path(), &clock)
        .save(vec![region(0, 0, "fresh", 1.0)], None)
        .unwrap();

    clock.set(NOW);
    let mut store = open(dir.path(), &clock);
    assert_eq!(store.cleanup_old_scans().unwrap(), 1);
    let once = store.load();
    assert_eq!(store.cleanup_old_scans().unwrap(), 0);

    assert_eq!(store.load(), once);
    assert!(store.get(&stale).is_none());
    assert!(store.get(&fresh).is_some());
}

#[test]
fn test_corrupted_file_loads_empty() {
    let dir = tempdir().unwrap();
    let clock = FixedClock::new(NOW);
    fs::write(
        dir.path().join(format!("{}.json", DEFAULT_STORAGE_KEY)),
        "[{\"id\":\"scan-1\",\"timestamp\":",
    )
    .unwrap();

    let mut store = open(dir.path(), &clock);
    assert!(matches!(store.load_outcome(), LoadOutcome::Recovered { .. }));
    assert!(store.load().is_empty());

    // Saving over a corrupted value starts a fresh collection.
    let id = store.save(vec![region(0, 0, "a", 1.0)], None).unwrap();
    let scans = store.load();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].id, id);
}

#[test]
fn test_edit_flow() {
    let dir = tempdir().unwrap();
    let clock = FixedClock::new(NOW);
    let mut store = open(dir.path(), &clock);

    let id = store
        .save(
            vec![
                region(0, 0, "a", 0.9),
                region(0, 1, "b", 0.9),
                region(1, 0, "c", 0.9),
                region(2, 5, "wrnog", 0.4),
            ],
            Some("delivery note".to_string()),
        )
        .unwrap();

    store.update_result_text(&id, 2, 5, "corrected").unwrap();
    store.delete_result(&id, 0).unwrap();

    let scan = open(dir.path(), &clock).get(&id).unwrap();
    let keys: Vec<_> = scan
        .results
        .iter()
        .map(|r| (r.file_index, r.rectangle_index, r.text.as_str()))
        .collect();
    assert_eq!(keys, vec![(1, 0, "c"), (2, 5, "corrected")]);
    assert_eq!(scan.name.as_deref(), Some("delivery note"));
}

#[test]
fn test_scans_in_range_by_day() {
    let dir = tempdir().unwrap();
    let day = 20_000 * DAY_MS;
    let clock = FixedClock::new(day - 1);
    let mut store = open(dir.path(), &clock);

    store.save(vec![region(0, 0, "eve", 1.0)], None).unwrap();
    clock.set(day);
    let first = store.save(vec![region(0, 0, "first", 1.0)], None).unwrap();
    clock.set(day + DAY_MS - 1);
    let last = store.save(vec![region(0, 0, "last", 1.0)], None).unwrap();
    clock.set(day + DAY_MS);
    store.save(vec![region(0, 0, "next", 1.0)], None).unwrap();

    let ids: Vec<_> = store
        .scans_in_range(day, day)
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![last, first]);
}

#[test]
fn test_backend_is_shared_contract() {
    let dir = tempdir().unwrap();
    let mut backend = FileBackend::open(dir.path()).unwrap();
    backend.set("other", "kept").unwrap();

    let clock = FixedClock::new(NOW);
    let mut store = ScanStore::new(backend).with_clock(clock);
    store.save(vec![region(0, 0, "a", 1.0)], None).unwrap();

    let backend = store.into_backend();
    assert_eq!(backend.get("other").unwrap().as_deref(), Some("kept"));
}
