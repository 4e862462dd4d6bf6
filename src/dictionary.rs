//! Word list loading.
//!
//! The word list is a UTF-8 text file with one word per line. Lines are
//! whitespace-trimmed and lowercased; blank lines are skipped.

use derive_more::{Display, Error};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use strictly_wordgrid::Dictionary;
use tracing::{debug, info, instrument, warn};

/// Loads a [`Dictionary`] from a newline-delimited word list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Reads the word list at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the file cannot be opened or read, or
    /// holds no words.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Dictionary, DictionaryError> {
        let path = path.as_ref();
        info!("Loading dictionary");

        let file = File::open(path).map_err(|e| {
            DictionaryError::new(format!(
                "Failed to open word list {}: {}",
                path.display(),
                e
            ))
        })?;

        let dictionary = Self::from_reader(BufReader::new(file))?;
        info!(words = dictionary.len(), "Dictionary loaded");
        Ok(dictionary)
    }

    /// Reads a word list from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] on an I/O error or if no words were read.
    #[instrument(skip(reader))]
    pub fn from_reader(reader: impl BufRead) -> Result<Dictionary, DictionaryError> {
        let mut lines = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                warn!(line = number + 1, error = %e, "Failed to read word list");
                DictionaryError::new(format!("Failed to read line {}: {}", number + 1, e))
            })?;
            lines.push(line);
        }
        debug!(lines = lines.len(), "Read word list");

        let dictionary = Dictionary::from_words(lines);
        if dictionary.is_empty() {
            return Err(DictionaryError::new("Word list contains no words".to_string()));
        }
        Ok(dictionary)
    }
}

/// Error loading a word list.
#[derive(Debug, Clone, Display, Error)]
#[display("Dictionary error: {} at {}:{}", message, file, line)]
pub struct DictionaryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DictionaryError {
    /// Creates a new dictionary error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_wordgrid::Lexicon;

    #[test]
    fn test_from_reader_trims_and_lowercases() {
        let input = "cat\n  Dog  \r\n\n\tbird\n";
        let dict = DictionaryLoader::from_reader(input.as_bytes()).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("cat"));
        assert!(dict.contains("dog"));
        assert!(dict.contains("bird"));
    }

    #[test]
    fn test_from_reader_rejects_empty() {
        let err = DictionaryLoader::from_reader("\n   \n".as_bytes()).unwrap_err();
        assert!(err.message.contains("no words"));
    }
}
