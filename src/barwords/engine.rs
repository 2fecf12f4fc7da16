//! # Conversion Engine
//!
//! Turns four dictionary words into a barcode and back, following one
//! validated [`Layout`] per call.
//!
//! ## Words to barcode
//!
//! Each word-mapped rule takes the next input word, in rule order, and writes
//! its dictionary index as zero-padded decimal. Every other rule emits a fixed
//! value, because nothing in the input says what should go there:
//!
//! - `Static`: its value
//! - `StaticOr`: its first allowed value
//! - `Numeric`: `length` zeros
//! - `Base64`: `length` `A`s
//!
//! ## Barcode to words
//!
//! The barcode is cut into one slice per rule. Word-mapped slices are parsed
//! as indices and resolved; every other slice is checked against its rule and
//! then dropped.
//!
//! The engine holds no state between calls; a single engine (and the
//! dictionary it borrows) can serve any number of layouts and threads.

use crate::dictionary::WordDictionary;
use crate::error::ConversionError;
use crate::layout::{Layout, WORD_COUNT};
use crate::segment::{SegmentKind, SegmentRule};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine as _};

const NUMERIC_FILLER: &str = "0";
const BASE64_FILLER: &str = "A";

// Padding optional, trailing bits ignored: only the characters are judged.
const BASE64_CHECK: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'d> {
    dictionary: &'d WordDictionary,
}

impl<'d> ConversionEngine<'d> {
    pub fn new(dictionary: &'d WordDictionary) -> Self {
        Self { dictionary }
    }

    /// Encodes exactly four words into a barcode of `layout.total_length()` characters.
    pub fn encode<W: AsRef<str>>(
        &self,
        words: &[W],
        layout: &Layout,
    ) -> Result<String, ConversionError> {
        if words.len() != WORD_COUNT {
            return Err(ConversionError::WordCount {
                expected: WORD_COUNT,
                found: words.len(),
            });
        }
        ensure_validated(layout)?;

        let word_rules: Vec<&SegmentRule> = layout.word_rules().collect();
        if word_rules.len() != WORD_COUNT {
            return Err(ConversionError::WordMappedArity {
                layout: layout.name().to_string(),
                expected: WORD_COUNT,
                found: word_rules.len(),
            });
        }

        let mut encoded_words = Vec::with_capacity(WORD_COUNT);
        for (rule, word) in word_rules.iter().zip(words) {
            encoded_words.push(self.encode_word(word.as_ref(), rule)?);
        }

        let mut encoded_words = encoded_words.into_iter();
        let mut barcode = String::with_capacity(layout.total_length());
        for rule in layout.rules() {
            if rule.maps_to_word() {
                // Counted above: one encoded word per word rule.
                if let Some(value) = encoded_words.next() {
                    barcode.push_str(&value);
                }
                continue;
            }
            match rule.kind() {
                SegmentKind::Static => barcode.push_str(rule.static_value().unwrap_or_default()),
                SegmentKind::StaticOr => {
                    let first = rule
                        .static_or_values()
                        .and_then(|values| values.first())
                        .map(String::as_str)
                        .unwrap_or_default();
                    barcode.push_str(first);
                }
                SegmentKind::Numeric => barcode.push_str(&NUMERIC_FILLER.repeat(rule.length())),
                SegmentKind::Base64 => barcode.push_str(&BASE64_FILLER.repeat(rule.length())),
            }
        }

        Ok(barcode)
    }

    fn encode_word(&self, word: &str, rule: &SegmentRule) -> Result<String, ConversionError> {
        let index = self
            .dictionary
            .index_of(word)
            .ok_or_else(|| ConversionError::UnknownWord {
                word: word.to_string(),
            })?;
        let digits = format!("{:0width$}", index, width = rule.length());
        if digits.len() > rule.length() {
            return Err(ConversionError::IndexTooWide {
                word: word.to_string(),
                index,
                order: rule.order(),
                length: rule.length(),
            });
        }
        Ok(digits)
    }

    /// Decodes a barcode into its four words, checking every segment on the way.
    pub fn decode(&self, barcode: &str, layout: &Layout) -> Result<Vec<String>, ConversionError> {
        if barcode.is_empty() {
            return Err(ConversionError::EmptyBarcode);
        }
        ensure_validated(layout)?;

        let chars: Vec<char> = barcode.chars().collect();
        let expected = layout.total_length();
        if chars.len() != expected {
            return Err(ConversionError::LengthMismatch {
                expected,
                found: chars.len(),
            });
        }

        let mut words = Vec::with_capacity(WORD_COUNT);
        let mut cursor = 0;
        for rule in layout.rules() {
            let end = cursor + rule.length();
            if end > chars.len() {
                return Err(ConversionError::Truncated {
                    order: rule.order(),
                    position: cursor,
                });
            }
            let slice: String = chars[cursor..end].iter().collect();
            cursor = end;

            if rule.maps_to_word() {
                words.push(self.decode_word(&slice, rule)?);
            } else {
                check_segment(&slice, rule)?;
            }
        }

        if words.len() != WORD_COUNT {
            return Err(ConversionError::DecodedWordCount {
                expected: WORD_COUNT,
                found: words.len(),
            });
        }
        Ok(words)
    }

    fn decode_word(&self, slice: &str, rule: &SegmentRule) -> Result<String, ConversionError> {
        if rule.kind() != SegmentKind::Numeric {
            return Err(ConversionError::WordMappedNotNumeric {
                order: rule.order(),
            });
        }
        if !is_digits(slice) {
            return Err(ConversionError::NotAnIndex {
                order: rule.order(),
                value: slice.to_string(),
            });
        }

        let size = self.dictionary.len();
        let out_of_range = || ConversionError::IndexOutOfRange {
            order: rule.order(),
            index: slice.trim_start_matches('0').to_string(),
            size,
        };
        // Digits only, so a parse failure means the value overflowed.
        let index: usize = slice.parse().map_err(|_| out_of_range())?;
        self.dictionary
            .word_at(index)
            .map(str::to_string)
            .ok_or_else(|| ConversionError::IndexOutOfRange {
                order: rule.order(),
                index: index.to_string(),
                size,
            })
    }
}

fn ensure_validated(layout: &Layout) -> Result<(), ConversionError> {
    if layout.is_validated() {
        Ok(())
    } else {
        Err(ConversionError::LayoutNotValidated {
            layout: layout.name().to_string(),
        })
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn check_segment(slice: &str, rule: &SegmentRule) -> Result<(), ConversionError> {
    let order = rule.order();
    match rule.kind() {
        SegmentKind::Static => {
            let expected = rule.static_value().unwrap_or_default();
            if slice != expected {
                return Err(ConversionError::StaticMismatch {
                    order,
                    expected: expected.to_string(),
                    found: slice.to_string(),
                });
            }
        }
        SegmentKind::StaticOr => {
            let allowed = rule.static_or_values().unwrap_or_default();
            if !allowed.iter().any(|value| value == slice) {
                return Err(ConversionError::StaticOrMismatch {
                    order,
                    found: slice.to_string(),
                    allowed: allowed.to_vec(),
                });
            }
        }
        SegmentKind::Numeric => {
            if !is_digits(slice) {
                return Err(ConversionError::NotNumeric {
                    order,
                    value: slice.to_string(),
                });
            }
        }
        SegmentKind::Base64 => match BASE64_CHECK.decode(slice) {
            // The decoded payload size is not checked, only the characters.
            Ok(_) | Err(DecodeError::InvalidLength(_)) => {}
            Err(e) => {
                return Err(ConversionError::NotBase64 {
                    order,
                    value: slice.to_string(),
                    reason: e.to_string(),
                })
            }
        },
    }
    Ok(())
}
