//! Prompt sequencing
//!
//! Pure functions of the prompt list and a speaker's completed set. The
//! sequencer returns the lowest uncompleted index; once every prompt has been
//! recorded it wraps back to index 0 so the portal stays usable for
//! re-recording. Completion itself is reported separately via `all_complete`.

use std::collections::BTreeSet;

use crate::prompts::PromptList;

/// The prompt the volunteer should see next.
#[derive(Debug, Clone, PartialEq)]
pub struct NextPrompt {
    pub text: String,
    pub index: usize,
}

/// First index in ascending order not yet completed; index 0 when all are.
pub fn next_prompt(prompts: &PromptList, completed: &BTreeSet<usize>) -> NextPrompt {
    for (index, text) in prompts.iter().enumerate() {
        if !completed.contains(&index) {
            return NextPrompt {
                text: text.to_string(),
                index,
            };
        }
    }

    NextPrompt {
        text: prompts.first().to_string(),
        index: 0,
    }
}

/// Number of completed indices that are valid for this prompt list.
/// Stale indices (a shrunk prompt file) are not counted.
pub fn completed_count(prompts: &PromptList, completed: &BTreeSet<usize>) -> usize {
    completed.iter().filter(|&&index| index < prompts.len()).count()
}

/// Whether every prompt in the list has been recorded at least once.
pub fn all_complete(prompts: &PromptList, completed: &BTreeSet<usize>) -> bool {
    completed_count(prompts, completed) == prompts.len()
}
