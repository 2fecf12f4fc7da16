//! # Layouts
//!
//! A [`Layout`] is a named barcode format: an ordered list of [`SegmentRule`]s.
//!
//! Building and validating are separate steps. [`Layout::new`] only checks the
//! shape (a name, at least one rule) and sorts the rules by `order`;
//! [`Layout::validate`] checks the cross-rule invariants, in this order:
//!
//! 1. no two rules share an `order`
//! 2. orders run without gaps from the lowest one
//! 3. exactly [`WORD_COUNT`] rules map to a word
//! 4. the total length is positive
//!
//! A layout is never edited in place. To change one, build a new layout,
//! validate it, and swap it into the store (see [`crate::store`]).

use crate::error::{BuildError, ValidationError};
use crate::segment::SegmentRule;
use std::collections::HashSet;

/// Number of words every barcode reconciles to.
pub const WORD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: String,
    rules: Vec<SegmentRule>,
    validated: bool,
    total_length: Option<usize>,
}

impl Layout {
    pub fn new(name: impl Into<String>, rules: Vec<SegmentRule>) -> Result<Self, BuildError> {
        Self::from_slots(name, rules.into_iter().map(Some).collect())
    }

    /// Like [`Layout::new`], for rule lists that may have holes (e.g. `null`
    /// entries in a layout file). Any hole rejects the whole layout.
    pub fn from_slots(
        name: impl Into<String>,
        slots: Vec<Option<SegmentRule>>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BuildError::EmptyLayoutName);
        }
        if slots.is_empty() {
            return Err(BuildError::EmptyRuleList { name });
        }

        let mut rules = Vec::with_capacity(slots.len());
        for (position, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(rule) => rules.push(rule),
                None => return Err(BuildError::MissingRule { name, position }),
            }
        }
        // Stable, so equal orders keep their input order for the duplicate check.
        rules.sort_by_key(SegmentRule::order);

        Ok(Self {
            name,
            rules,
            validated: false,
            total_length: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules sorted by ascending `order`.
    pub fn rules(&self) -> &[SegmentRule] {
        &self.rules
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Word-mapped rules in ascending order.
    pub fn word_rules(&self) -> impl Iterator<Item = &SegmentRule> {
        self.rules.iter().filter(|r| r.maps_to_word())
    }

    /// Sum of all rule lengths. Cached once the layout validates; computed
    /// fresh (saturating, without marking anything) before that.
    pub fn total_length(&self) -> usize {
        match self.total_length {
            Some(total) => total,
            None => self
                .rules
                .iter()
                .fold(0, |sum, rule| sum.saturating_add(rule.length())),
        }
    }

    /// Checks the layout invariants, stopping at the first violation.
    ///
    /// Succeeds at most once; later calls on a validated layout return early.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.validated {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !seen.insert(rule.order()) {
                return Err(ValidationError::DuplicateOrder {
                    layout: self.name.clone(),
                    order: rule.order(),
                });
            }
        }

        for pair in self.rules.windows(2) {
            let (prev, next) = (pair[0].order(), pair[1].order());
            // Sorted and distinct, so `prev` is below `next` and cannot be i64::MAX.
            let expected = prev.checked_add(1).unwrap_or(prev);
            if next != expected {
                return Err(ValidationError::NonSequentialOrder {
                    layout: self.name.clone(),
                    expected,
                    found: next,
                });
            }
        }

        let word_rules = self.word_rules().count();
        if word_rules != WORD_COUNT {
            return Err(ValidationError::WordArity {
                layout: self.name.clone(),
                expected: WORD_COUNT,
                found: word_rules,
            });
        }

        let total = self
            .rules
            .iter()
            .try_fold(0usize, |sum, rule| sum.checked_add(rule.length()))
            .ok_or_else(|| ValidationError::LengthOverflow {
                layout: self.name.clone(),
            })?;
        if total == 0 {
            return Err(ValidationError::NonPositiveLength {
                layout: self.name.clone(),
            });
        }

        self.total_length = Some(total);
        self.validated = true;
        Ok(())
    }

    /// Builds and validates in one go.
    pub fn validated(name: impl Into<String>, rules: Vec<SegmentRule>) -> crate::error::Result<Self> {
        let mut layout = Self::new(name, rules)?;
        layout.validate()?;
        Ok(layout)
    }
}

/// The bundled 21-character layout: four 4-digit words separated by
/// `T`, `E|X|Y`, two Base64 characters, and a trailing `T`.
pub fn default_20char() -> Result<Layout, BuildError> {
    Layout::new(
        "default-20char",
        vec![
            SegmentRule::word(0, 4)?,
            SegmentRule::fixed(1, 1, "T")?,
            SegmentRule::word(2, 4)?,
            SegmentRule::one_of(3, 1, ["E", "X", "Y"])?,
            SegmentRule::word(4, 4)?,
            SegmentRule::base64(5, 2)?,
            SegmentRule::word(6, 4)?,
            SegmentRule::fixed(7, 1, "T")?,
        ],
    )
}
