//! Core library for the voice-recording portal
//!
//! Volunteers read a fixed list of sentence prompts; each submitted recording
//! is stored as WAV, logged to the metadata CSV, and merged into the
//! per-speaker progress document so sessions can resume where they left off.
//! The UI and capture widget are external collaborators driving
//! [`SessionController`].

pub mod audio;
pub mod error;
pub mod metadata;
pub mod progress;
pub mod prompts;
pub mod sequencer;
pub mod session;

pub use audio::{
    duration_seconds, AudioSource, LocalRecordingStore, PcmSource, RecordingStore,
    StoredRecording, WavBytesSource, WavFileSource,
};
pub use error::PortalError;
pub use metadata::{CsvMetadataLog, MetadataLog};
pub use progress::{
    JsonProgressStore, MemoryProgressStore, ProgressMap, ProgressStore, ProgressTracker,
    VolunteerProgress,
};
pub use prompts::PromptList;
pub use sequencer::{all_complete, completed_count, next_prompt, NextPrompt};
pub use session::{ResumeState, SessionController, SubmitResult};
