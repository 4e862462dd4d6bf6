//! Dictionary membership.
//!
//! The classifier only needs to ask "is this a word?". [`Lexicon`] is that
//! seam; [`Dictionary`] is the set the server loads once at startup.

use std::collections::HashSet;

/// A read-only collection of valid words.
pub trait Lexicon {
    /// Whether `word` is a valid word, compared exactly as given.
    fn contains(&self, word: &str) -> bool;
}

impl<T: Lexicon + ?Sized> Lexicon for &T {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }
}

impl Lexicon for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

impl Lexicon for [&str] {
    fn contains(&self, word: &str) -> bool {
        self.iter().any(|w| *w == word)
    }
}

/// An immutable set of lowercase words.
///
/// Entries are trimmed and lowercased on construction; blank entries are
/// dropped. Lookups compare the query exactly, so callers lowercase user
/// input first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary from any sequence of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words.into_iter().collect()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}

impl Lexicon for Dictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
