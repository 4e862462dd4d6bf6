//! Tests for word list loading.

use std::fs;
use tempfile::{NamedTempFile, TempDir};

use strictly_boggle::{DictionaryLoader, Lexicon};

/// Writes `content` to a temporary word list; the handle keeps the file alive.
fn word_list(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write word list");
    file
}

#[test]
fn test_load_one_word_per_line() {
    let file = word_list("cat\ndog\nimpossible\n");
    let dict = DictionaryLoader::from_file(file.path()).expect("Load failed");
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("impossible"));
}

#[test]
fn test_load_trims_whitespace_and_case() {
    let file = word_list("  Cat  \r\nDOG\n\n\n");
    let dict = DictionaryLoader::from_file(file.path()).expect("Load failed");
    assert_eq!(dict.len(), 2);
    assert!(dict.contains("cat"));
    assert!(dict.contains("dog"));
}

#[test]
fn test_load_without_trailing_newline() {
    let file = word_list("cat\ndog");
    let dict = DictionaryLoader::from_file(file.path()).expect("Load failed");
    assert!(dict.contains("dog"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = DictionaryLoader::from_file(dir.path().join("nope.txt"));
    let err = result.expect_err("Missing file should fail");
    assert!(err.message.contains("nope.txt"));
}

#[test]
fn test_empty_file_fails() {
    let file = word_list("");
    assert!(DictionaryLoader::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_utf8_fails() {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    fs::write(file.path(), [b'c', b'a', b't', b'\n', 0xff, 0xfe, b'\n']).expect("Write failed");
    assert!(DictionaryLoader::from_file(file.path()).is_err());
}
