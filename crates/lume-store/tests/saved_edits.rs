//! Saved-edit persistence scenarios over the file-backed store.
//!
//! Run with: `cargo test -p lume-store`

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use lume_core::{AdjustmentVector, MediaKind, MediaRef, NewSavedEdit, SavedEdit};
use lume_store::{FileStore, KeyValueStore, MemoryStore, SAVED_EDITS_KEY, SavedEditRepository};

fn temp_dir(tag: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("lume-it-{tag}-{}-{n}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn edit(id: i64, preset: &str, kind: MediaKind) -> SavedEdit {
    NewSavedEdit {
        source: MediaRef::new(format!("file:///media/{id}")),
        preset_id: preset.to_string(),
        intensity: (id % 101) as f32,
        manual: AdjustmentVector {
            brightness: 12.5,
            contrast: -30.0,
            saturation: 7.0,
            warmth: -100.0,
            highlights: 100.0,
            shadows: -0.5,
            ..AdjustmentVector::ZERO
        },
        media_kind: kind,
    }
    .into_saved(id.to_string(), Utc.timestamp_millis_opt(id).unwrap())
}

/// Most-recent-first list of `n` edits.
fn sample_list(n: i64) -> Vec<SavedEdit> {
    (0..n)
        .rev()
        .map(|i| {
            let kind = if i % 2 == 0 { MediaKind::Photo } else { MediaKind::Video };
            edit(1_700_000_000_000 + i, "cinematic", kind)
        })
        .collect()
}

#[test]
fn test_save_load_round_trip_preserves_fields_and_order() {
    let dir = temp_dir("round-trip");
    let repo = SavedEditRepository::new(FileStore::new(&dir));
    let edits = sample_list(6);

    repo.save_all(&edits).unwrap();

    // A fresh repository over the same directory sees the same list.
    let reopened = SavedEditRepository::new(FileStore::new(&dir));
    assert_eq!(reopened.try_load().unwrap(), edits);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_delete_removes_exactly_one() {
    let repo = SavedEditRepository::new(MemoryStore::new());
    let edits = sample_list(5);
    repo.save_all(&edits).unwrap();

    let victim = edits[2].id.clone();
    let removed = repo.delete(&victim).unwrap().expect("edit exists");
    assert_eq!(removed, edits[2]);

    let expected: Vec<_> = edits.iter().filter(|e| e.id != victim).cloned().collect();
    assert_eq!(repo.load(), expected);
}

#[test]
fn test_commit_is_most_recent_first() {
    let repo = SavedEditRepository::new(MemoryStore::new());
    repo.save_all(&sample_list(2)).unwrap();

    let saved = repo
        .commit(NewSavedEdit {
            source: MediaRef::new("content://media/external/images/9"),
            preset_id: "warm-glow".into(),
            intensity: 55.0,
            manual: AdjustmentVector::ZERO,
            media_kind: MediaKind::Photo,
        })
        .unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0], saved);
    assert_eq!(loaded[1..], sample_list(2)[..]);
}

#[test]
fn test_unreadable_file_defaults_to_empty() {
    let dir = temp_dir("corrupt");
    let store = FileStore::new(&dir);
    store.set(SAVED_EDITS_KEY, "[{\"id\": 1").unwrap();

    let repo = SavedEditRepository::new(store);
    assert!(repo.load().is_empty());
    assert!(repo.try_load().is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_json_layout_on_disk() {
    let dir = temp_dir("layout");
    let repo = SavedEditRepository::new(FileStore::new(&dir));
    repo.save_all(&sample_list(1)).unwrap();

    let raw = std::fs::read_to_string(dir.join("lume_saved_edits.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["presetId"], "cinematic");
    assert_eq!(first["mediaKind"], "photo");
    assert_eq!(first["createdAt"], 1_700_000_000_000_i64);
    assert_eq!(first["manual"]["warmth"], -100.0);

    let _ = std::fs::remove_dir_all(&dir);
}
