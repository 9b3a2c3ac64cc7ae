//! Recording persistence
//!
//! Recordings land under `{root}/raw/{speaker}/` as
//! `{speaker}_{prompt:03}_{YYYYmmdd-HHMMSS}.wav`. The store reports the
//! persisted location and the recording's duration; duration always comes
//! from the WAV header of what was stored, never from the caller.

use std::path::{Path, PathBuf};

use crate::audio::wav;
use crate::error::PortalError;

/// A recording the store has persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecording {
    /// Where the bytes ended up, in a form suitable for the metadata log.
    pub location: String,
    pub duration_seconds: f64,
}

/// Persists captured recordings and exposes their duration.
///
/// A remote object store would be a second implementation with the same key
/// scheme under a `raw/{speaker}/` prefix.
pub trait RecordingStore: Send + Sync {
    fn save(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        wav_bytes: &[u8],
    ) -> Result<StoredRecording, PortalError>;
}

/// Local-filesystem store rooted at the portal data directory.
pub struct LocalRecordingStore {
    root: PathBuf,
}

impl LocalRecordingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn recording_path(&self, speaker_id: &str, prompt_index: usize, timestamp: &str) -> PathBuf {
        let filename = format!("{}_{:03}_{}.wav", speaker_id, prompt_index, timestamp);
        self.root.join("raw").join(speaker_id).join(filename)
    }
}

impl RecordingStore for LocalRecordingStore {
    fn save(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        wav_bytes: &[u8],
    ) -> Result<StoredRecording, PortalError> {
        // Probe before touching disk: a payload that isn't valid WAV must not
        // leave an artifact behind.
        let duration_seconds = wav::duration_seconds(wav_bytes)?;

        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        let path = self.recording_path(speaker_id, prompt_index, &timestamp);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortalError::Storage(format!("create recording dir {:?}: {}", parent, e))
            })?;
        }
        std::fs::write(&path, wav_bytes)
            .map_err(|e| PortalError::Storage(format!("write recording {:?}: {}", path, e)))?;

        log::info!("Recording: saved {:?} ({:.1}s)", path, duration_seconds);

        Ok(StoredRecording {
            location: path.to_string_lossy().into_owned(),
            duration_seconds,
        })
    }
}
