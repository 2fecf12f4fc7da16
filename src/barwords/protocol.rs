//! Request and response bodies for a conversion call.
//!
//! ```json
//! { "layout_name": "default-20char", "words": ["able", "acid", "aged", "also"] }
//! { "status": "success", "message": "Barcode generated successfully.", "barcode": "0000T0001E0002AA0003T" }
//! { "status": "error", "message": "Word not found in dictionary: zebra" }
//! ```

use crate::error::BarwordsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default, alias = "ruleSetName", skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
}

impl ConversionRequest {
    pub fn encode<W: Into<String>>(words: impl IntoIterator<Item = W>) -> Self {
        Self {
            words: Some(words.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn decode(barcode: impl Into<String>) -> Self {
        Self {
            barcode: Some(barcode.into()),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, name: impl Into<String>) -> Self {
        self.layout_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Who is at fault for a failed conversion; lets a transport pick its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(skip)]
    pub error_class: Option<ErrorClass>,
}

impl ConversionResponse {
    pub fn success_barcode(barcode: String) -> Self {
        Self {
            status: Status::Success,
            message: Some("Barcode generated successfully.".to_string()),
            barcode: Some(barcode),
            words: None,
            error_class: None,
        }
    }

    pub fn success_words(words: Vec<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some("Words generated successfully.".to_string()),
            barcode: None,
            words: Some(words),
            error_class: None,
        }
    }

    pub fn error(message: impl Into<String>, class: ErrorClass) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            barcode: None,
            words: None,
            error_class: Some(class),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

impl From<BarwordsError> for ConversionResponse {
    fn from(err: BarwordsError) -> Self {
        let class = if err.is_client_error() {
            ErrorClass::Client
        } else {
            ErrorClass::Server
        };
        Self::error(err.to_string(), class)
    }
}
