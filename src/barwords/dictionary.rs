//! The word list barcodes index into.
//!
//! Indices are positions in load order and never change for the life of a
//! [`WordDictionary`]. The dictionary is read-only once built, so it can be
//! shared freely between concurrent conversions.

use crate::error::DictionaryError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    words: Vec<String>,
    index: HashMap<String, usize>,
    sources: Vec<usize>,
}

impl WordDictionary {
    /// Builds a dictionary from words in index order. Duplicates are rejected.
    pub fn new<I, W>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let mut dict = Self::default();
        for word in words {
            dict.push(word.into(), None)?;
        }
        Ok(dict)
    }

    /// Parses newline-delimited text: each line is trimmed, blank lines are skipped.
    pub fn from_lines(text: &str) -> Result<Self, DictionaryError> {
        let mut dict = Self::default();
        for (line_no, line) in text.lines().enumerate() {
            let word = line.trim();
            if !word.is_empty() {
                dict.push(word.to_string(), Some(line_no + 1))?;
            }
        }
        if dict.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(dict)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_lines(&text)
    }

    // `source` is where the word came from: a 1-based line number or an index.
    fn push(&mut self, word: String, source: Option<usize>) -> Result<(), DictionaryError> {
        let position = self.words.len();
        let source = source.unwrap_or(position);
        if let Some(&first) = self.index.get(&word) {
            return Err(DictionaryError::DuplicateWord {
                word,
                first: self.sources[first],
                second: source,
            });
        }
        self.index.insert(word.clone(), position);
        self.words.push(word);
        self.sources.push(source);
        Ok(())
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_follow_load_order() {
        let dict = WordDictionary::from_lines("  apple \n\nbanana\ncherry\n").unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.index_of("apple"), Some(0));
        assert_eq!(dict.index_of("banana"), Some(1));
        assert_eq!(dict.word_at(2), Some("cherry"));
        assert_eq!(dict.word_at(3), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let dict = WordDictionary::new(["apple"]).unwrap();
        assert_eq!(dict.index_of("Apple"), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = WordDictionary::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::DuplicateWord { first: 0, second: 2, .. }
        ));
        assert!(WordDictionary::from_lines("a\nb\na\n").is_err());
    }

    #[test]
    fn blank_text_is_empty_error() {
        assert!(matches!(
            WordDictionary::from_lines("\n  \n").unwrap_err(),
            DictionaryError::Empty
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordDictionary::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, DictionaryError::Unreadable { .. }));
    }
}
