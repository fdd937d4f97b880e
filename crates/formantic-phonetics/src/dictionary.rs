//! CMU-format pronunciation dictionaries.
//!
//! Entries look like `HELLO  HH AH0 L OW1`: an uppercase word, two spaces, then
//! whitespace-separated ARPAbet phones. Lines starting with `;;;` are comments.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PhoneticsResult;
use crate::phoneme::{parse_phonemes, Phoneme};

const COMMENT_PREFIX: &str = ";;;";
const SEPARATOR: &str = "  ";

/// Word to pronunciation lookup.
///
/// Lookups are case-insensitive. Implementations return `None` for words
/// they do not know.
pub trait Lexicon {
    /// Returns the phonemes of `word`, if known.
    fn lookup(&self, word: &str) -> Option<Vec<Phoneme>>;
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn lookup(&self, word: &str) -> Option<Vec<Phoneme>> {
        (**self).lookup(word)
    }
}

/// An in-memory pronunciation dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, Vec<Phoneme>>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses dictionary text.
    ///
    /// Malformed lines and lines containing unknown phones are skipped. The
    /// first entry for a word wins.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let Some((word, phones)) = line.split_once(SEPARATOR) else {
                debug!(line = index + 1, "skipping dictionary line without separator");
                continue;
            };

            let word = word.trim();
            if word.is_empty() {
                continue;
            }

            match parse_phonemes(phones) {
                Ok(phonemes) if !phonemes.is_empty() => {
                    entries.entry(word.to_uppercase()).or_insert(phonemes);
                }
                Ok(_) => {
                    debug!(line = index + 1, word, "skipping entry with no phones");
                }
                Err(err) => {
                    debug!(line = index + 1, word, error = %err, "skipping unparsable entry");
                }
            }
        }

        Self { entries }
    }

    /// Reads and parses a dictionary file.
    pub fn load(path: impl AsRef<Path>) -> PhoneticsResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let dictionary = Self::parse(&text);
        debug!(
            path = %path.as_ref().display(),
            entries = dictionary.len(),
            "loaded pronunciation dictionary"
        );
        Ok(dictionary)
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, word: &str, phonemes: Vec<Phoneme>) {
        self.entries.insert(word.to_uppercase(), phonemes);
    }

    /// Returns the phonemes of `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> Option<&[Phoneme]> {
        self.entries.get(&word.to_uppercase()).map(Vec::as_slice)
    }

    /// Returns the textual pronunciation of `word` (e.g. `"HH AH0 L OW1"`).
    pub fn lookup_raw(&self, word: &str) -> Option<String> {
        self.lookup(word).map(|phonemes| {
            phonemes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for Dictionary {
    fn lookup(&self, word: &str) -> Option<Vec<Phoneme>> {
        Dictionary::lookup(self, word).map(<[Phoneme]>::to_vec)
    }
}

/// Result of translating text to IPA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// IPA words joined by single spaces.
    pub ipa: String,
    /// Normalized words the lexicon did not know, in input order.
    pub missing: Vec<String>,
}

impl Translation {
    /// Returns true if every word was found.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Translates English text to IPA through a lexicon.
///
/// Each whitespace-separated word is lowercased and stripped of punctuation
/// before lookup. Unknown words are recorded in [`Translation::missing`] and
/// left out of the IPA.
pub fn translate_to_ipa<L: Lexicon + ?Sized>(lexicon: &L, text: &str) -> Translation {
    let mut words = Vec::new();
    let mut missing = Vec::new();

    for raw in text.split_whitespace() {
        let word = normalize_word(raw);
        if word.is_empty() {
            continue;
        }
        match lexicon.lookup(&word) {
            Some(phonemes) => words.push(phonemes.iter().map(Phoneme::ipa).collect::<String>()),
            None => {
                debug!(word = %word, "word not in lexicon");
                missing.push(word);
            }
        }
    }

    Translation {
        ipa: words.join(" "),
        missing,
    }
}

fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim_matches('\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = ";;; sample dictionary
HELLO  HH AH0 L OW1
WORLD  W ER1 L D
HELLO  HH EH0 L OW1
BROKEN  B R OW1 XX AH0 N
NOSEPARATOR HH AY1
";

    #[test]
    fn test_parse_skips_comments_and_bad_lines() {
        let dict = Dictionary::parse(SAMPLE);
        assert_eq!(dict.len(), 2);
        assert!(dict.lookup("broken").is_none());
        assert!(dict.lookup("noseparator").is_none());
    }

    #[test]
    fn test_first_entry_wins() {
        let dict = Dictionary::parse(SAMPLE);
        assert_eq!(dict.lookup_raw("hello").as_deref(), Some("HH AH0 L OW1"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = Dictionary::parse(SAMPLE);
        assert_eq!(dict.lookup("World"), dict.lookup("WORLD"));
        assert!(dict.lookup("world").is_some());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Hello,"), "hello");
        assert_eq!(normalize_word("\"don't\""), "don't");
        assert_eq!(normalize_word("'quoted'"), "quoted");
        assert_eq!(normalize_word("--"), "");
    }

    #[test]
    fn test_translate_collects_missing_words() {
        let dict = Dictionary::parse(SAMPLE);
        let translation = translate_to_ipa(&dict, "Hello, brave world!");
        assert_eq!(translation.ipa, "həloʊ wɝld");
        assert_eq!(translation.missing, vec!["brave".to_string()]);
        assert!(!translation.is_complete());
    }

    #[test]
    fn test_translate_empty_text() {
        let dict = Dictionary::new();
        let translation = translate_to_ipa(&dict, "   ");
        assert_eq!(translation, Translation::default());
        assert!(translation.is_complete());
    }
}
