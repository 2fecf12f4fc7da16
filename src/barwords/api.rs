//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! barwords operation, whichever front end is driving it.
//!
//! The facade dispatches to `commands/*.rs`, fills in defaults from
//! [`BarwordsConfig`](crate::config::BarwordsConfig), and returns structured
//! results. It does no printing and holds no conversion logic.
//!
//! ## Generic Over LayoutStore
//!
//! - Production: `BarwordsApi<FileStore>`
//! - Testing: `BarwordsApi<InMemoryStore>`
//!
//! ## The Dictionary Is Optional
//!
//! Layout and config commands work before a word list exists. Conversions
//! without one fail with [`BarwordsError::DictionaryNotLoaded`], which the
//! request handler reports as a server-side error.

use crate::commands;
use crate::config::BarwordsConfig;
use crate::dictionary::WordDictionary;
use crate::error::{BarwordsError, Result};
use crate::protocol::{ConversionRequest, ConversionResponse};
use crate::store::LayoutStore;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct BarwordsApi<S: LayoutStore> {
    store: S,
    dictionary: Option<WordDictionary>,
    paths: commands::BarwordsPaths,
}

impl<S: LayoutStore> BarwordsApi<S> {
    pub fn new(store: S, paths: commands::BarwordsPaths) -> Self {
        Self {
            store,
            dictionary: None,
            paths,
        }
    }

    pub fn with_dictionary(mut self, dictionary: WordDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Loads the word list from `path` if it is there. A missing file leaves
    /// the API without a dictionary; an unreadable or invalid one is an error.
    pub fn load_dictionary(&mut self, path: &Path) -> Result<bool> {
        if !path.exists() {
            warn!(path = %path.display(), "word list not found");
            return Ok(false);
        }
        self.dictionary = Some(WordDictionary::load(path)?);
        Ok(true)
    }

    pub fn dictionary(&self) -> Result<&WordDictionary> {
        self.dictionary
            .as_ref()
            .ok_or(BarwordsError::DictionaryNotLoaded)
    }

    pub fn encode<W: AsRef<str>>(
        &self,
        layout: Option<&str>,
        words: &[W],
    ) -> Result<commands::CmdResult> {
        commands::convert::encode(&self.store, self.dictionary()?, layout, words)
    }

    pub fn decode(&self, layout: Option<&str>, barcode: &str) -> Result<commands::CmdResult> {
        commands::convert::decode(&self.store, self.dictionary()?, layout, barcode)
    }

    /// Answers a conversion request. Never fails; errors become error responses.
    pub fn handle(&self, request: &ConversionRequest) -> ConversionResponse {
        match self.dictionary() {
            Ok(dictionary) => commands::convert::handle(&self.store, dictionary, request),
            Err(e) => e.into(),
        }
    }

    pub fn list_layouts(&self) -> Result<commands::CmdResult> {
        commands::layouts::list(&self.store)
    }

    pub fn show_layout(&self, name: &str) -> Result<commands::CmdResult> {
        commands::layouts::show(&self.store, name)
    }

    pub fn import_layouts(&mut self, json: &str) -> Result<commands::CmdResult> {
        commands::layouts::import(&mut self.store, json)
    }

    pub fn delete_layout(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::layouts::delete(&mut self.store, name)
    }

    /// Builds a word list from `input`. Unset options fall back to the config;
    /// the output defaults to the configured dictionary file.
    pub fn build_words(
        &self,
        input: &Path,
        output: Option<PathBuf>,
        min_length: Option<usize>,
        max_words: Option<usize>,
    ) -> Result<commands::CmdResult> {
        let config = BarwordsConfig::load(&self.paths.home)?;
        let output = output.unwrap_or_else(|| config.dictionary_path(&self.paths.home));
        commands::words::run(
            input,
            &output,
            min_length.unwrap_or(config.min_word_length),
            max_words.unwrap_or(config.max_words),
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, &mut self.store)
    }

    pub fn paths(&self) -> &commands::BarwordsPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{BarwordsPaths, CmdMessage, CmdResult, MessageLevel};
