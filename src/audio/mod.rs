//! Audio handling for the recording portal
//!
//! Payload adapters behind the `AudioSource` trait, WAV duration probing,
//! and the recording store that persists submitted clips.

pub mod storage;
pub mod wav;

pub use storage::{LocalRecordingStore, RecordingStore, StoredRecording};
pub use wav::{duration_seconds, AudioSource, PcmSource, WavBytesSource, WavFileSource};
