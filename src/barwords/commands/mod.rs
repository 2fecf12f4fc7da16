use crate::config::BarwordsConfig;
use crate::layout::Layout;
use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod convert;
pub mod init;
pub mod layouts;
pub mod words;

#[derive(Debug, Clone)]
pub struct BarwordsPaths {
    pub home: PathBuf,
}

impl BarwordsPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub barcode: Option<String>,
    pub words: Vec<String>,
    pub layouts: Vec<Arc<Layout>>,
    pub written_paths: Vec<PathBuf>,
    pub config: Option<BarwordsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_barcode(mut self, barcode: String) -> Self {
        self.barcode = Some(barcode);
        self
    }

    pub fn with_words(mut self, words: Vec<String>) -> Self {
        self.words = words;
        self
    }

    pub fn with_layouts(mut self, layouts: Vec<Arc<Layout>>) -> Self {
        self.layouts = layouts;
        self
    }

    pub fn with_config(mut self, config: BarwordsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
