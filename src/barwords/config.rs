use crate::error::{BarwordsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DICTIONARY_FILE: &str = "words.txt";
const DEFAULT_LAYOUTS_FILE: &str = "layouts.json";
const DEFAULT_MIN_WORD_LENGTH: usize = 4;
// Keeps every index within four digits.
const DEFAULT_MAX_WORDS: usize = 9999;

pub const KEYS: &[&str] = &["dictionary-file", "layouts-file", "min-word-length", "max-words"];

/// Configuration for barwords, stored in <home>/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarwordsConfig {
    /// Word list, one word per line. Relative paths resolve against the home dir.
    #[serde(default = "default_dictionary_file")]
    pub dictionary_file: String,

    /// Layout store file. Relative paths resolve against the home dir.
    #[serde(default = "default_layouts_file")]
    pub layouts_file: String,

    /// Shortest word kept by `words build`
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Most words kept by `words build`
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_dictionary_file() -> String {
    DEFAULT_DICTIONARY_FILE.to_string()
}

fn default_layouts_file() -> String {
    DEFAULT_LAYOUTS_FILE.to_string()
}

fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

impl Default for BarwordsConfig {
    fn default() -> Self {
        Self {
            dictionary_file: default_dictionary_file(),
            layouts_file: default_layouts_file(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl BarwordsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BarwordsError::Io)?;
        let config: BarwordsConfig =
            serde_json::from_str(&content).map_err(BarwordsError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BarwordsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BarwordsError::Serialization)?;
        fs::write(config_path, content).map_err(BarwordsError::Io)?;
        Ok(())
    }

    pub fn exists<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    pub fn dictionary_path(&self, home: &Path) -> PathBuf {
        home.join(&self.dictionary_file)
    }

    pub fn layouts_path(&self, home: &Path) -> PathBuf {
        home.join(&self.layouts_file)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "dictionary-file" => Some(self.dictionary_file.clone()),
            "layouts-file" => Some(self.layouts_file.clone()),
            "min-word-length" => Some(self.min_word_length.to_string()),
            "max-words" => Some(self.max_words.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "dictionary-file" => self.dictionary_file = non_empty(key, value)?,
            "layouts-file" => self.layouts_file = non_empty(key, value)?,
            "min-word-length" => self.min_word_length = positive(key, value)?,
            "max-words" => self.max_words = positive(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> std::result::Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} cannot be empty", key));
    }
    Ok(value.to_string())
}

fn positive(key: &str, value: &str) -> std::result::Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive number, got '{}'", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BarwordsConfig::default();
        assert_eq!(config.dictionary_file, "words.txt");
        assert_eq!(config.layouts_file, "layouts.json");
        assert_eq!(config.max_words, 9999);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = BarwordsConfig::load(dir.path()).unwrap();
        assert_eq!(config, BarwordsConfig::default());
        assert!(!BarwordsConfig::exists(dir.path()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BarwordsConfig::default();
        config.set("dictionary-file", "lists/short.txt").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = BarwordsConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.dictionary_file, "lists/short.txt");
        assert_eq!(
            loaded.dictionary_path(dir.path()),
            dir.path().join("lists/short.txt")
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: BarwordsConfig = serde_json::from_str(r#"{"max_words": 99}"#).unwrap();
        assert_eq!(config.max_words, 99);
        assert_eq!(config.layouts_file, "layouts.json");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = BarwordsConfig::default();
        assert!(config.set("max-words", "0").is_err());
        assert!(config.set("min-word-length", "four").is_err());
        assert!(config.set("layouts-file", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, BarwordsConfig::default());
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = BarwordsConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "{}", key);
        }
    }
}
