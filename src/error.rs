//! Error taxonomy for the recording portal
//!
//! Validation and audio-decode failures are volunteer-facing warnings: the UI
//! shows them and the session stays on the current prompt. Storage failures
//! abort the submission and must leave prior persisted state untouched.

/// Errors surfaced by the portal core.
#[derive(Debug)]
pub enum PortalError {
    /// Volunteer id missing or blank at submit/resume time
    EmptySpeakerId,
    /// Submit received no recorded audio
    MissingAudio,
    /// Submitted prompt index does not exist in the prompt list
    PromptIndexOutOfRange { index: usize, len: usize },
    /// Audio payload could not be read or is not valid WAV/PCM
    AudioDecode(String),
    /// Progress store, recording store, or metadata log failure
    Storage(String),
    /// Prompt source contained no usable lines
    EmptyPromptList,
}

impl std::fmt::Display for PortalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortalError::EmptySpeakerId => {
                write!(f, "Please enter a Speaker ID first.")
            }
            PortalError::MissingAudio => {
                write!(f, "Please record the sentence before submitting.")
            }
            PortalError::PromptIndexOutOfRange { index, len } => {
                write!(f, "Prompt index {} is out of range (0..{})", index, len)
            }
            PortalError::AudioDecode(e) => write!(f, "Audio processing error: {}", e),
            PortalError::Storage(e) => write!(f, "Storage error: {}", e),
            PortalError::EmptyPromptList => {
                write!(f, "Prompt list is empty; nothing to present")
            }
        }
    }
}

impl std::error::Error for PortalError {}

impl PortalError {
    /// Whether the error should be shown to the volunteer as a warning
    /// (session continues on the same prompt) rather than failing the request.
    pub fn is_volunteer_facing(&self) -> bool {
        matches!(
            self,
            PortalError::EmptySpeakerId
                | PortalError::MissingAudio
                | PortalError::PromptIndexOutOfRange { .. }
                | PortalError::AudioDecode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_context() {
        let errors = vec![
            (PortalError::EmptySpeakerId, "Speaker ID"),
            (PortalError::MissingAudio, "record"),
            (
                PortalError::PromptIndexOutOfRange { index: 7, len: 3 },
                "7",
            ),
            (
                PortalError::AudioDecode("bad RIFF header".to_string()),
                "bad RIFF header",
            ),
            (
                PortalError::Storage("disk full".to_string()),
                "disk full",
            ),
        ];

        for (err, expected_substring) in errors {
            let display = err.to_string();
            assert!(
                display.contains(expected_substring),
                "Error display '{}' should contain '{}'",
                display,
                expected_substring
            );
        }
    }

    #[test]
    fn test_volunteer_facing_classification() {
        assert!(PortalError::EmptySpeakerId.is_volunteer_facing());
        assert!(PortalError::MissingAudio.is_volunteer_facing());
        assert!(PortalError::AudioDecode("x".to_string()).is_volunteer_facing());
        assert!(!PortalError::Storage("x".to_string()).is_volunteer_facing());
        assert!(!PortalError::EmptyPromptList.is_volunteer_facing());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PortalError>();
    }
}
