use crate::segment::SegmentKind;
use thiserror::Error;

/// A segment rule or layout could not be built from the given shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Only NUMERIC segments can be mapped to a word (rule order {order} is {kind})")]
    WordMappedNotNumeric { order: i64, kind: SegmentKind },

    #[error("Segment length must be positive (rule order {order})")]
    ZeroLength { order: i64 },

    #[error("Segment length {length} exceeds the maximum of {max} (rule order {order})")]
    LengthTooLarge { order: i64, length: usize, max: usize },

    #[error("Static value cannot be missing or empty for a STATIC segment (rule order {order})")]
    MissingStaticValue { order: i64 },

    #[error(
        "Static value '{value}' has length {actual} but the segment length is {expected} (rule order {order})"
    )]
    StaticValueLength {
        order: i64,
        value: String,
        actual: usize,
        expected: usize,
    },

    #[error("Allowed values cannot be missing or empty for a STATIC_OR segment (rule order {order})")]
    MissingStaticOrValues { order: i64 },

    #[error("Allowed values of a STATIC_OR segment cannot be empty (rule order {order})")]
    EmptyStaticOrValue { order: i64 },

    #[error(
        "Allowed value '{value}' has length {actual} but the segment length is {expected} (rule order {order})"
    )]
    StaticOrValueLength {
        order: i64,
        value: String,
        actual: usize,
        expected: usize,
    },

    #[error("Layout name cannot be empty")]
    EmptyLayoutName,

    #[error("Layout '{name}' must contain at least one rule")]
    EmptyRuleList { name: String },

    #[error("Layout '{name}' has a missing rule at position {position}")]
    MissingRule { name: String, position: usize },
}

/// A constructed layout violates one of its semantic invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate order number {order} in layout '{layout}'")]
    DuplicateOrder { layout: String, order: i64 },

    #[error("Non-sequential order number in layout '{layout}': expected {expected}, got {found}")]
    NonSequentialOrder {
        layout: String,
        expected: i64,
        found: i64,
    },

    #[error("Layout '{layout}' must have exactly {expected} word-mapped rules, found {found}")]
    WordArity {
        layout: String,
        expected: usize,
        found: usize,
    },

    #[error("Total barcode length must be positive for layout '{layout}'")]
    NonPositiveLength { layout: String },

    #[error("Total barcode length of layout '{layout}' does not fit in memory")]
    LengthOverflow { layout: String },
}

/// Encoding or decoding failed for the given input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Exactly {expected} words are required, got {found}")]
    WordCount { expected: usize, found: usize },

    #[error("Layout '{layout}' has not been validated")]
    LayoutNotValidated { layout: String },

    #[error("Layout '{layout}' is not configured for {expected} word mappings (found {found})")]
    WordMappedArity {
        layout: String,
        expected: usize,
        found: usize,
    },

    #[error("Word not found in dictionary: {word}")]
    UnknownWord { word: String },

    #[error(
        "Word index {index} for word '{word}' does not fit in {length} characters (rule order {order})"
    )]
    IndexTooWide {
        word: String,
        index: usize,
        order: i64,
        length: usize,
    },

    #[error("Barcode cannot be empty")]
    EmptyBarcode,

    #[error("Barcode length ({found}) does not match the layout length ({expected})")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Barcode is too short for rule order {order} at position {position}")]
    Truncated { order: i64, position: usize },

    #[error("Rule order {order} maps to a word but is not NUMERIC")]
    WordMappedNotNumeric { order: i64 },

    #[error("Segment (rule order {order}) marked for word mapping is not a valid number: '{value}'")]
    NotAnIndex { order: i64, value: String },

    #[error(
        "Word index {index} from segment (rule order {order}) is out of bounds for dictionary size {size}"
    )]
    IndexOutOfRange {
        order: i64,
        index: String,
        size: usize,
    },

    #[error("Static segment mismatch (rule order {order}): expected '{expected}', got '{found}'")]
    StaticMismatch {
        order: i64,
        expected: String,
        found: String,
    },

    #[error("Segment value '{found}' (rule order {order}) is not one of the allowed values {allowed:?}")]
    StaticOrMismatch {
        order: i64,
        found: String,
        allowed: Vec<String>,
    },

    #[error("Numeric segment (rule order {order}) contains non-numeric characters: '{value}'")]
    NotNumeric { order: i64, value: String },

    #[error("Base64 segment (rule order {order}) contains invalid Base64 content '{value}': {reason}")]
    NotBase64 {
        order: i64,
        value: String,
        reason: String,
    },

    #[error("Decoded {found} words, expected {expected}")]
    DecodedWordCount { expected: usize, found: usize },
}

impl ConversionError {
    /// True when the failure comes from a malformed layout rather than the caller's input.
    pub fn is_layout_fault(&self) -> bool {
        matches!(
            self,
            ConversionError::LayoutNotValidated { .. }
                | ConversionError::WordMappedArity { .. }
                | ConversionError::WordMappedNotNumeric { .. }
                | ConversionError::DecodedWordCount { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Word '{word}' appears twice (at {first} and {second})")]
    DuplicateWord {
        word: String,
        first: usize,
        second: usize,
    },

    #[error("Word dictionary is empty")]
    Empty,

    #[error("Cannot read word dictionary {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum BarwordsError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("Layout '{0}' not found")]
    LayoutNotFound(String),

    #[error("No layouts are loaded")]
    NoLayouts,

    #[error("Word dictionary is not loaded")]
    DictionaryNotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BarwordsError {
    /// Whether the caller can fix this by correcting its input.
    pub fn is_client_error(&self) -> bool {
        match self {
            BarwordsError::Build(_)
            | BarwordsError::Validation(_)
            | BarwordsError::LayoutNotFound(_)
            | BarwordsError::Api(_) => true,
            BarwordsError::Conversion(e) => !e.is_layout_fault(),
            BarwordsError::Dictionary(_)
            | BarwordsError::NoLayouts
            | BarwordsError::DictionaryNotLoaded
            | BarwordsError::Io(_)
            | BarwordsError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BarwordsError>;
