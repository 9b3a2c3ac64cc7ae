//! Prompt list loading
//!
//! The prompt list is the fixed, ordered set of sentences every volunteer
//! reads. It is loaded once at startup and shared read-only afterwards.

use std::path::Path;

use crate::error::PortalError;

/// Ordered, immutable list of prompt sentences, indexed 0..N-1.
#[derive(Debug, Clone)]
pub struct PromptList {
    prompts: Vec<String>,
}

impl PromptList {
    /// Build a prompt list from text lines, skipping blank lines and trimming
    /// surrounding whitespace. An input with no usable lines is an error.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, PortalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prompts: Vec<String> = lines
            .into_iter()
            .filter_map(|line| {
                let trimmed = line.as_ref().trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();

        if prompts.is_empty() {
            return Err(PortalError::EmptyPromptList);
        }

        Ok(Self { prompts })
    }

    /// Load the prompt list from a text file with one sentence per line.
    pub fn from_file(path: &Path) -> Result<Self, PortalError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PortalError::Storage(format!("read prompts {:?}: {}", path, e)))?;
        Self::from_lines(contents.lines())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.prompts.get(index).map(String::as_str)
    }

    /// First prompt. The constructor guarantees at least one entry.
    pub fn first(&self) -> &str {
        &self.prompts[0]
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_and_whitespace_dropped() {
        let list =
            PromptList::from_lines(["  The quick brown fox.  ", "", "   ", "Second line."])
                .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some("The quick brown fox."));
        assert_eq!(list.get(1), Some("Second line."));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let result = PromptList::from_lines(["", "   ", "\t"]);
        assert!(matches!(result, Err(PortalError::EmptyPromptList)));
    }

    #[test]
    fn test_from_file_missing_is_storage_error() {
        let result = PromptList::from_file(Path::new("/nonexistent/prompts.txt"));
        assert!(matches!(result, Err(PortalError::Storage(_))));
    }

    #[test]
    fn test_order_preserved() {
        let list = PromptList::from_lines(["A", "B", "C"]).unwrap();
        let collected: Vec<&str> = list.iter().collect();
        assert_eq!(collected, vec!["A", "B", "C"]);
        assert_eq!(list.first(), "A");
    }
}
