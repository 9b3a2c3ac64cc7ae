//! Progress merging
//!
//! The tracker owns the store and serializes every read-modify-write cycle
//! behind a mutex. The document is loaded and saved whole, so without the
//! lock two concurrent submissions for the same speaker could each load the
//! old map and the later save would drop the earlier completion.

use std::sync::Mutex;

use crate::error::PortalError;
use crate::progress::store::{ProgressStore, VolunteerProgress};

pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    merge_lock: Mutex<()>,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self {
            store,
            merge_lock: Mutex::new(()),
        }
    }

    /// Record a completed recording for a speaker and persist the result.
    ///
    /// Idempotent per prompt index: re-recording an already-completed prompt
    /// neither re-inserts the index nor double-counts the duration. Returns
    /// the speaker's updated record.
    pub fn record_completion(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        duration_seconds: f64,
    ) -> Result<VolunteerProgress, PortalError> {
        let _guard = self.merge_lock.lock().unwrap();

        let mut map = self.store.load()?;
        let record = map.entry(speaker_id.to_string()).or_default();

        if record.record(prompt_index, duration_seconds) {
            log::info!(
                "Progress: {} completed prompt {} ({:.1}s, {} prompt(s) total)",
                speaker_id,
                prompt_index,
                duration_seconds,
                record.completed_count()
            );
        } else {
            log::info!(
                "Progress: {} re-recorded prompt {}, counters unchanged",
                speaker_id,
                prompt_index
            );
        }

        let updated = record.clone();
        self.store.save(&map)?;
        Ok(updated)
    }

    /// Read-only lookup. A never-seen speaker has an empty record.
    pub fn progress_for(&self, speaker_id: &str) -> Result<VolunteerProgress, PortalError> {
        let map = self.store.load()?;
        Ok(map.get(speaker_id).cloned().unwrap_or_default())
    }
}
