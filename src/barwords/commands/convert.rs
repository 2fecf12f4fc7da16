use crate::commands::CmdResult;
use crate::dictionary::WordDictionary;
use crate::engine::ConversionEngine;
use crate::error::{BarwordsError, Result};
use crate::layout::WORD_COUNT;
use crate::protocol::{ConversionRequest, ConversionResponse, ErrorClass};
use crate::store::LayoutStore;
use tracing::debug;

pub fn encode<S: LayoutStore, W: AsRef<str>>(
    store: &S,
    dictionary: &WordDictionary,
    layout_name: Option<&str>,
    words: &[W],
) -> Result<CmdResult> {
    let layout = store.resolve(layout_name)?;
    let barcode = ConversionEngine::new(dictionary).encode(words, &layout)?;
    debug!(layout = layout.name(), %barcode, "encoded");
    Ok(CmdResult::default()
        .with_barcode(barcode)
        .with_layouts(vec![layout]))
}

pub fn decode<S: LayoutStore>(
    store: &S,
    dictionary: &WordDictionary,
    layout_name: Option<&str>,
    barcode: &str,
) -> Result<CmdResult> {
    let layout = store.resolve(layout_name)?;
    let words = ConversionEngine::new(dictionary).decode(barcode, &layout)?;
    debug!(layout = layout.name(), ?words, "decoded");
    Ok(CmdResult::default()
        .with_words(words)
        .with_layouts(vec![layout]))
}

/// Answers one request. Failures come back as error responses, never as `Err`.
///
/// A non-blank barcode wins over words when both are sent.
pub fn handle<S: LayoutStore>(
    store: &S,
    dictionary: &WordDictionary,
    request: &ConversionRequest,
) -> ConversionResponse {
    match dispatch(store, dictionary, request) {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "conversion request failed");
            e.into()
        }
    }
}

fn dispatch<S: LayoutStore>(
    store: &S,
    dictionary: &WordDictionary,
    request: &ConversionRequest,
) -> Result<ConversionResponse> {
    let layout = store.resolve(request.layout_name.as_deref())?;
    let engine = ConversionEngine::new(dictionary);

    if let Some(barcode) = request.barcode.as_deref().filter(|b| !b.trim().is_empty()) {
        let words = engine.decode(barcode, &layout)?;
        return Ok(ConversionResponse::success_words(words));
    }

    match request.words.as_deref() {
        Some(words) if !words.is_empty() => {
            if words.len() != WORD_COUNT {
                return Ok(ConversionResponse::error(
                    format!(
                        "Exactly {} words are required for conversion to barcode.",
                        WORD_COUNT
                    ),
                    ErrorClass::Client,
                ));
            }
            let barcode = engine.encode(words, &layout)?;
            Ok(ConversionResponse::success_barcode(barcode))
        }
        _ => Err(BarwordsError::Api(
            "Either 'barcode' or 'words' must be provided in the request.".to_string(),
        )),
    }
}
