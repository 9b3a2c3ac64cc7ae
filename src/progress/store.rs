//! Persisted volunteer progress document
//!
//! The progress document is a single JSON file mapping speaker id to the set
//! of completed prompt indices plus a cumulative recording duration. It is
//! always loaded and written whole. A missing or unparsable document degrades
//! to an empty map so the portal stays usable; any other I/O failure surfaces.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Full persisted mapping, keyed by speaker id.
/// BTreeMap keeps key order stable so repeated saves serialize identically.
pub type ProgressMap = BTreeMap<String, VolunteerProgress>;

/// Completion state for one volunteer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerProgress {
    /// Completed prompt indices. A BTreeSet is deduplicated and iterates in
    /// ascending order, which is exactly the normalized on-disk representation.
    pub completed_prompts: BTreeSet<usize>,
    /// Sum of recording durations, counting each prompt index once.
    pub total_duration_seconds: f64,
}

impl VolunteerProgress {
    /// Record a completion. Returns true when the index was newly inserted;
    /// a repeat of an already-completed index leaves both the set and the
    /// duration accumulator untouched.
    pub fn record(&mut self, prompt_index: usize, duration_seconds: f64) -> bool {
        if self.completed_prompts.insert(prompt_index) {
            self.total_duration_seconds += duration_seconds;
            true
        } else {
            false
        }
    }

    pub fn has_completed(&self, prompt_index: usize) -> bool {
        self.completed_prompts.contains(&prompt_index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_prompts.len()
    }
}

/// Durable store for the progress document.
///
/// Injected into the tracker so tests and embedders can substitute an
/// in-memory implementation for the JSON file.
pub trait ProgressStore: Send + Sync {
    /// Load the full mapping. Absent or corrupt backing content yields an
    /// empty map; only genuine I/O failures (permissions, disk) are errors.
    fn load(&self) -> Result<ProgressMap, PortalError>;

    /// Persist the full mapping, replacing prior content atomically from the
    /// reader's perspective. Creates the parent directory if absent.
    fn save(&self, map: &ProgressMap) -> Result<(), PortalError>;
}

/// File-backed store writing pretty-printed JSON.
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<ProgressMap, PortalError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<ProgressMap>(&contents) {
                Ok(map) => Ok(map),
                Err(e) => {
                    log::warn!(
                        "Progress: failed to parse {:?}, treating as empty: {}",
                        self.path,
                        e
                    );
                    Ok(ProgressMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProgressMap::new()),
            Err(e) => Err(PortalError::Storage(format!(
                "read progress {:?}: {}",
                self.path, e
            ))),
        }
    }

    fn save(&self, map: &ProgressMap) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PortalError::Storage(format!("create progress dir {:?}: {}", parent, e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| PortalError::Storage(format!("serialize progress: {}", e)))?;

        // Write to a temp file in the same directory, then rename, so readers
        // never observe a partially written document.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &contents).map_err(|e| {
            PortalError::Storage(format!("write temp progress {:?}: {}", tmp_path, e))
        })?;

        // On Unix, rename atomically replaces the destination. On Windows,
        // rename fails if the destination exists, so remove it first.
        if cfg!(windows) && self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(PortalError::Storage(format!(
                        "remove existing progress {:?}: {}",
                        self.path, e
                    )));
                }
            }
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            PortalError::Storage(format!(
                "rename temp progress {:?} to {:?}: {}",
                tmp_path, self.path, e
            ))
        })?;

        log::debug!("Progress: saved {} speaker(s) to {:?}", map.len(), self.path);
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryProgressStore {
    map: Mutex<ProgressMap>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<ProgressMap, PortalError> {
        Ok(self.map.lock().unwrap().clone())
    }

    fn save(&self, map: &ProgressMap) -> Result<(), PortalError> {
        *self.map.lock().unwrap() = map.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonProgressStore {
        JsonProgressStore::new(dir.path().join("progress.json"))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json at all").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut map = ProgressMap::new();
        let mut record = VolunteerProgress::default();
        record.record(2, 3.0);
        record.record(0, 2.5);
        map.insert("jdoe".to_string(), record);

        store.save(&map).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, map);

        // save(load()) is a semantic no-op
        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProgressStore::new(dir.path().join("nested").join("progress.json"));
        store.save(&ProgressMap::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&ProgressMap::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["progress.json".to_string()]);
    }

    #[test]
    fn test_serialized_indices_ascending() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut map = ProgressMap::new();
        let mut record = VolunteerProgress::default();
        record.record(5, 1.0);
        record.record(1, 1.0);
        record.record(3, 1.0);
        map.insert("s".to_string(), record);
        store.save(&map).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let pos1 = raw.find('1').unwrap();
        let pos3 = raw.find('3').unwrap();
        let pos5 = raw.find('5').unwrap();
        assert!(pos1 < pos3 && pos3 < pos5, "indices not ascending: {}", raw);
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut record = VolunteerProgress::default();

        assert!(record.record(0, 2.5));
        assert!(!record.record(0, 2.5));

        assert_eq!(record.completed_count(), 1);
        assert!((record.total_duration_seconds - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryProgressStore::new();
        let mut map = ProgressMap::new();
        map.insert("a".to_string(), VolunteerProgress::default());

        store.save(&map).unwrap();
        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let record: VolunteerProgress = serde_json::from_str("{}").unwrap();
        assert!(record.completed_prompts.is_empty());
        assert_eq!(record.total_duration_seconds, 0.0);
    }
}
