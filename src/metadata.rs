//! Recording metadata log
//!
//! Append-only row store: one `(speaker_id, prompt_index, prompt_text,
//! location)` line per submitted recording. Rows are advisory; the WAV files
//! are ground truth.

use std::io::Write;
use std::path::PathBuf;

use crate::error::PortalError;

pub trait MetadataLog: Send + Sync {
    fn append(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        prompt_text: &str,
        location: &str,
    ) -> Result<(), PortalError>;
}

/// CSV-backed log, appending to a single `meta.csv`.
pub struct CsvMetadataLog {
    path: PathBuf,
}

impl CsvMetadataLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataLog for CsvMetadataLog {
    fn append(
        &self,
        speaker_id: &str,
        prompt_index: usize,
        prompt_text: &str,
        location: &str,
    ) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PortalError::Storage(format!("create metadata dir {:?}: {}", parent, e))
                })?;
            }
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PortalError::Storage(format!("open metadata {:?}: {}", self.path, e)))?;

        writeln!(
            file,
            "{},{},{},{}",
            csv_field(speaker_id),
            prompt_index,
            csv_field(prompt_text),
            csv_field(location)
        )
        .map_err(|e| PortalError::Storage(format!("append metadata {:?}: {}", self.path, e)))?;

        Ok(())
    }
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_and_accumulates_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvMetadataLog::new(dir.path().join("meta.csv"));

        log.append("jdoe", 0, "The quick brown fox.", "data/raw/jdoe/a.wav")
            .unwrap();
        log.append("jdoe", 1, "Second sentence.", "data/raw/jdoe/b.wav")
            .unwrap();

        let contents = std::fs::read_to_string(dir.path().join("meta.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "jdoe,0,The quick brown fox.,data/raw/jdoe/a.wav");
        assert_eq!(lines[1], "jdoe,1,Second sentence.,data/raw/jdoe/b.wav");
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvMetadataLog::new(dir.path().join("meta.csv"));

        log.append("jdoe", 2, "Hello, \"world\".", "data/raw/jdoe/c.wav")
            .unwrap();

        let contents = std::fs::read_to_string(dir.path().join("meta.csv")).unwrap();
        assert_eq!(
            contents.trim_end(),
            "jdoe,2,\"Hello, \"\"world\"\".\",data/raw/jdoe/c.wav"
        );
    }

    #[test]
    fn test_parent_directory_created() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvMetadataLog::new(dir.path().join("nested").join("meta.csv"));
        log.append("s", 0, "p", "loc").unwrap();
        assert!(dir.path().join("nested").join("meta.csv").exists());
    }
}
