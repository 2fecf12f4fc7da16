//! # Segment Rules
//!
//! A [`SegmentRule`] describes one fixed-width slice of a barcode: where it sits
//! (`order`), how many characters it takes (`length`) and what it may contain
//! ([`SegmentKind`]).
//!
//! Rules are values. Every kind-specific check runs inside [`SegmentRule::new`],
//! so a rule that exists is a rule that is well formed; there are no setters.
//!
//! | Kind        | Payload                         | Word-mapped? |
//! |-------------|---------------------------------|--------------|
//! | `Numeric`   | none                            | allowed      |
//! | `Base64`    | none                            | no           |
//! | `Static`    | one value, exactly `length`     | no           |
//! | `StaticOr`  | ordered values, each `length`   | no           |
//!
//! Lengths are counted in characters, not bytes.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest segment a rule may declare, in characters.
pub const MAX_SEGMENT_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentKind {
    Numeric,
    Base64,
    Static,
    StaticOr,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Numeric => "NUMERIC",
            SegmentKind::Base64 => "BASE64",
            SegmentKind::Static => "STATIC",
            SegmentKind::StaticOr => "STATIC_OR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRule {
    order: i64,
    length: usize,
    kind: SegmentKind,
    static_value: Option<String>,
    static_or_values: Option<Vec<String>>,
    maps_to_word: bool,
}

impl SegmentRule {
    /// Builds a rule, rejecting any shape that does not fit its kind.
    ///
    /// Payload that does not belong to `kind` (a static value on a numeric
    /// rule, say) is dropped.
    pub fn new(
        order: i64,
        length: usize,
        kind: SegmentKind,
        static_value: Option<String>,
        static_or_values: Option<Vec<String>>,
        maps_to_word: bool,
    ) -> Result<Self, BuildError> {
        if maps_to_word && kind != SegmentKind::Numeric {
            return Err(BuildError::WordMappedNotNumeric { order, kind });
        }
        if length == 0 {
            return Err(BuildError::ZeroLength { order });
        }
        if length > MAX_SEGMENT_LENGTH {
            return Err(BuildError::LengthTooLarge {
                order,
                length,
                max: MAX_SEGMENT_LENGTH,
            });
        }

        let (static_value, static_or_values) = match kind {
            SegmentKind::Static => {
                let value = static_value
                    .filter(|v| !v.is_empty())
                    .ok_or(BuildError::MissingStaticValue { order })?;
                let actual = value.chars().count();
                if actual != length {
                    return Err(BuildError::StaticValueLength {
                        order,
                        value,
                        actual,
                        expected: length,
                    });
                }
                (Some(value), None)
            }
            SegmentKind::StaticOr => {
                let values = static_or_values
                    .filter(|v| !v.is_empty())
                    .ok_or(BuildError::MissingStaticOrValues { order })?;
                for value in &values {
                    if value.is_empty() {
                        return Err(BuildError::EmptyStaticOrValue { order });
                    }
                    let actual = value.chars().count();
                    if actual != length {
                        return Err(BuildError::StaticOrValueLength {
                            order,
                            value: value.clone(),
                            actual,
                            expected: length,
                        });
                    }
                }
                (None, Some(values))
            }
            SegmentKind::Numeric | SegmentKind::Base64 => (None, None),
        };

        Ok(Self {
            order,
            length,
            kind,
            static_value,
            static_or_values,
            maps_to_word,
        })
    }

    /// A numeric segment whose digits index the word dictionary.
    pub fn word(order: i64, length: usize) -> Result<Self, BuildError> {
        Self::new(order, length, SegmentKind::Numeric, None, None, true)
    }

    pub fn numeric(order: i64, length: usize) -> Result<Self, BuildError> {
        Self::new(order, length, SegmentKind::Numeric, None, None, false)
    }

    pub fn base64(order: i64, length: usize) -> Result<Self, BuildError> {
        Self::new(order, length, SegmentKind::Base64, None, None, false)
    }

    pub fn fixed(order: i64, length: usize, value: impl Into<String>) -> Result<Self, BuildError> {
        Self::new(
            order,
            length,
            SegmentKind::Static,
            Some(value.into()),
            None,
            false,
        )
    }

    /// A segment limited to `values`; the first one is the default emitted on encode.
    pub fn one_of<I, V>(order: i64, length: usize, values: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(
            order,
            length,
            SegmentKind::StaticOr,
            None,
            Some(values),
            false,
        )
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn static_value(&self) -> Option<&str> {
        self.static_value.as_deref()
    }

    pub fn static_or_values(&self) -> Option<&[String]> {
        self.static_or_values.as_deref()
    }

    pub fn maps_to_word(&self) -> bool {
        self.maps_to_word
    }
}

impl fmt::Display for SegmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}[{}]", self.order, self.kind, self.length)?;
        if let Some(value) = &self.static_value {
            write!(f, " '{}'", value)?;
        }
        if let Some(values) = &self.static_or_values {
            write!(f, " {}", values.join("|"))?;
        }
        if self.maps_to_word {
            f.write_str(" -> word")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_kind() {
        let word = SegmentRule::word(0, 4).unwrap();
        assert!(word.maps_to_word());
        assert_eq!(word.kind(), SegmentKind::Numeric);

        let fixed = SegmentRule::fixed(1, 1, "T").unwrap();
        assert_eq!(fixed.static_value(), Some("T"));
        assert_eq!(fixed.static_or_values(), None);

        let choice = SegmentRule::one_of(2, 1, ["E", "X", "Y"]).unwrap();
        assert_eq!(
            choice.static_or_values().unwrap(),
            &["E".to_string(), "X".to_string(), "Y".to_string()]
        );

        let b64 = SegmentRule::base64(3, 2).unwrap();
        assert!(!b64.maps_to_word());
    }

    #[test]
    fn word_mapping_requires_numeric() {
        for kind in [SegmentKind::Base64, SegmentKind::Static, SegmentKind::StaticOr] {
            let err = SegmentRule::new(7, 1, kind, Some("T".into()), Some(vec!["T".into()]), true)
                .unwrap_err();
            assert_eq!(err, BuildError::WordMappedNotNumeric { order: 7, kind });
        }
    }

    #[test]
    fn static_value_must_be_present_and_fit() {
        assert_eq!(
            SegmentRule::new(0, 1, SegmentKind::Static, None, None, false).unwrap_err(),
            BuildError::MissingStaticValue { order: 0 }
        );
        assert_eq!(
            SegmentRule::fixed(0, 1, "").unwrap_err(),
            BuildError::MissingStaticValue { order: 0 }
        );
        assert_eq!(
            SegmentRule::fixed(0, 2, "T").unwrap_err(),
            BuildError::StaticValueLength {
                order: 0,
                value: "T".into(),
                actual: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn static_or_values_must_be_present_and_fit() {
        assert_eq!(
            SegmentRule::new(3, 1, SegmentKind::StaticOr, None, None, false).unwrap_err(),
            BuildError::MissingStaticOrValues { order: 3 }
        );
        assert_eq!(
            SegmentRule::one_of(3, 1, Vec::<String>::new()).unwrap_err(),
            BuildError::MissingStaticOrValues { order: 3 }
        );
        assert_eq!(
            SegmentRule::one_of(3, 1, ["E", ""]).unwrap_err(),
            BuildError::EmptyStaticOrValue { order: 3 }
        );
        assert!(matches!(
            SegmentRule::one_of(3, 1, ["E", "XY"]).unwrap_err(),
            BuildError::StaticOrValueLength { actual: 2, expected: 1, .. }
        ));
    }

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(
            SegmentRule::numeric(4, 0).unwrap_err(),
            BuildError::ZeroLength { order: 4 }
        );
    }

    #[test]
    fn oversized_length_is_rejected() {
        assert_eq!(
            SegmentRule::word(0, usize::MAX).unwrap_err(),
            BuildError::LengthTooLarge {
                order: 0,
                length: usize::MAX,
                max: MAX_SEGMENT_LENGTH,
            }
        );
        assert!(SegmentRule::word(0, MAX_SEGMENT_LENGTH).is_ok());
    }

    #[test]
    fn foreign_payload_is_dropped() {
        let rule = SegmentRule::new(0, 4, SegmentKind::Numeric, Some("ABCD".into()), None, false)
            .unwrap();
        assert_eq!(rule.static_value(), None);
    }

    #[test]
    fn length_counts_characters() {
        let rule = SegmentRule::fixed(0, 2, "éé").unwrap();
        assert_eq!(rule.length(), 2);
    }
}
