//! Session orchestration
//!
//! The controller reacts to the two UI triggers: the volunteer id changing
//! (read-only resume) and a recording being submitted (persist, log, merge,
//! sequence). Collaborators are injected so hosts and tests can swap the
//! storage backends.

use crate::audio::{AudioSource, RecordingStore};
use crate::error::PortalError;
use crate::metadata::MetadataLog;
use crate::progress::ProgressTracker;
use crate::prompts::PromptList;
use crate::sequencer::{self, NextPrompt};

/// Where a volunteer should resume, plus their progress so far.
#[derive(Debug, Clone)]
pub struct ResumeState {
    pub prompt_text: String,
    pub prompt_index: usize,
    pub completed: usize,
    pub total: usize,
    pub all_complete: bool,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    /// Human-readable confirmation, e.g. "Saved to data/raw/jdoe/….wav"
    pub status: String,
    /// Next prompt to present
    pub prompt_text: String,
    pub prompt_index: usize,
    /// "completed X/N"
    pub progress_summary: String,
    /// "total duration …s"
    pub duration_summary: String,
    pub all_complete: bool,
}

pub struct SessionController {
    prompts: PromptList,
    tracker: ProgressTracker,
    recordings: Box<dyn RecordingStore>,
    metadata: Box<dyn MetadataLog>,
}

impl SessionController {
    pub fn new(
        prompts: PromptList,
        tracker: ProgressTracker,
        recordings: Box<dyn RecordingStore>,
        metadata: Box<dyn MetadataLog>,
    ) -> Self {
        Self {
            prompts,
            tracker,
            recordings,
            metadata,
        }
    }

    pub fn prompts(&self) -> &PromptList {
        &self.prompts
    }

    /// Volunteer id entered or changed. Blank ids get the first prompt with
    /// no store access; known ids resume at their lowest uncompleted prompt.
    pub fn on_speaker_changed(&self, speaker_id: &str) -> Result<ResumeState, PortalError> {
        let speaker_id = speaker_id.trim();
        if speaker_id.is_empty() {
            return Ok(ResumeState {
                prompt_text: self.prompts.first().to_string(),
                prompt_index: 0,
                completed: 0,
                total: self.prompts.len(),
                all_complete: false,
            });
        }

        let progress = self.tracker.progress_for(speaker_id)?;
        let next = sequencer::next_prompt(&self.prompts, &progress.completed_prompts);
        let completed = sequencer::completed_count(&self.prompts, &progress.completed_prompts);

        log::info!(
            "Session: {} resumes at prompt {} ({}/{} completed)",
            speaker_id,
            next.index,
            completed,
            self.prompts.len()
        );

        Ok(ResumeState {
            prompt_text: next.text,
            prompt_index: next.index,
            completed,
            total: self.prompts.len(),
            all_complete: completed == self.prompts.len(),
        })
    }

    /// Recording submitted. Validates, persists the audio, appends the
    /// metadata row, merges progress, and sequences the next prompt.
    ///
    /// Operation order matters: nothing is written until the payload decodes,
    /// and the progress merge comes last so a failure partway through never
    /// claims a completion without a recording on disk.
    pub fn on_submit(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        audio: Option<&dyn AudioSource>,
    ) -> Result<SubmitResult, PortalError> {
        let speaker_id = speaker_id.trim();
        if speaker_id.is_empty() {
            return Err(PortalError::EmptySpeakerId);
        }
        let audio = audio.ok_or(PortalError::MissingAudio)?;
        let prompt_text =
            self.prompts
                .get(prompt_index)
                .ok_or(PortalError::PromptIndexOutOfRange {
                    index: prompt_index,
                    len: self.prompts.len(),
                })?;

        let wav_bytes = audio.wav_bytes()?;
        let stored = self.recordings.save(speaker_id, prompt_index, &wav_bytes)?;
        self.metadata
            .append(speaker_id, prompt_index, prompt_text, &stored.location)?;

        let progress =
            self.tracker
                .record_completion(speaker_id, prompt_index, stored.duration_seconds)?;

        let NextPrompt { text, index } =
            sequencer::next_prompt(&self.prompts, &progress.completed_prompts);
        let completed = sequencer::completed_count(&self.prompts, &progress.completed_prompts);

        Ok(SubmitResult {
            status: format!("Saved to {}", stored.location),
            prompt_text: text,
            prompt_index: index,
            progress_summary: format!("completed {}/{}", completed, self.prompts.len()),
            duration_summary: format!(
                "total duration {:.1}s",
                progress.total_duration_seconds
            ),
            all_complete: completed == self.prompts.len(),
        })
    }
}
