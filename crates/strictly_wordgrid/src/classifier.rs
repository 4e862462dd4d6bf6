//! Three-way classification of a submitted word.

use crate::finder::exists_on_board;
use crate::lexicon::Lexicon;
use crate::types::Grid;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of checking a word against the dictionary and the board.
///
/// Serialized as `"ok"`, `"not-on-board"` or `"not-word"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum Verdict {
    /// In the dictionary and traceable on the board.
    #[serde(rename = "ok")]
    #[strum(serialize = "ok")]
    Ok,
    /// In the dictionary but not traceable on the board.
    #[serde(rename = "not-on-board")]
    #[strum(serialize = "not-on-board")]
    NotOnBoard,
    /// Not in the dictionary.
    #[serde(rename = "not-word")]
    #[strum(serialize = "not-word")]
    NotAWord,
}

impl Verdict {
    /// Whether the word scores.
    pub fn is_ok(self) -> bool {
        self == Verdict::Ok
    }
}

/// Classifies `word` against `dictionary` and `grid`.
///
/// Dictionary membership is tested with `word` exactly as given; the board
/// is searched case-insensitively. The board is not searched at all when
/// the word is not in the dictionary.
#[instrument(skip(grid, dictionary))]
pub fn classify<L: Lexicon + ?Sized>(grid: &Grid, word: &str, dictionary: &L) -> Verdict {
    let verdict = if !dictionary.contains(word) {
        Verdict::NotAWord
    } else if exists_on_board(grid, word) {
        Verdict::Ok
    } else {
        Verdict::NotOnBoard
    };

    debug!(%verdict, "Classified word");
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Dictionary;

    #[test]
    fn test_decision_table() {
        let grid: Grid = "CA/TX".parse().unwrap();
        let dict = Dictionary::from_words(["cat", "dog"]);

        assert_eq!(classify(&grid, "cat", &dict), Verdict::Ok);
        assert_eq!(classify(&grid, "dog", &dict), Verdict::NotOnBoard);
        assert_eq!(classify(&grid, "tax", &dict), Verdict::NotAWord);
        assert_eq!(classify(&grid, "zzz", &dict), Verdict::NotAWord);
    }

    #[test]
    fn test_empty_word_is_not_a_word() {
        let grid: Grid = "CA/TX".parse().unwrap();
        let dict = Dictionary::from_words(["cat"]);
        assert_eq!(classify(&grid, "", &dict), Verdict::NotAWord);
    }

    #[test]
    fn test_only_ok_scores() {
        assert!(Verdict::Ok.is_ok());
        assert!(!Verdict::NotOnBoard.is_ok());
        assert!(!Verdict::NotAWord.is_ok());
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Verdict::Ok.to_string(), "ok");
        assert_eq!(Verdict::NotOnBoard.as_ref(), "not-on-board");
        assert_eq!("not-word".parse::<Verdict>().unwrap(), Verdict::NotAWord);
        assert_eq!(
            serde_json::to_string(&Verdict::NotOnBoard).unwrap(),
            r#""not-on-board""#
        );
    }
}
