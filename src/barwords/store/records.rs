//! On-disk shape of layouts.
//!
//! Field names follow the layout files the web editor has always written
//! (`staticValue`, `mapsToWord`, ...). `type` is accepted for `kind`.

use crate::error::BuildError;
use crate::layout::Layout;
use crate::segment::{SegmentKind, SegmentRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub order: i64,
    pub length: usize,
    #[serde(alias = "type")]
    pub kind: SegmentKind,
    #[serde(default)]
    pub static_value: Option<String>,
    #[serde(default)]
    pub static_or_values: Option<Vec<String>>,
    #[serde(default)]
    pub maps_to_word: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Option<RuleRecord>>,
}

impl RuleRecord {
    pub fn build(self) -> Result<SegmentRule, BuildError> {
        SegmentRule::new(
            self.order,
            self.length,
            self.kind,
            self.static_value,
            self.static_or_values,
            self.maps_to_word,
        )
    }
}

impl From<&SegmentRule> for RuleRecord {
    fn from(rule: &SegmentRule) -> Self {
        Self {
            order: rule.order(),
            length: rule.length(),
            kind: rule.kind(),
            static_value: rule.static_value().map(str::to_string),
            static_or_values: rule.static_or_values().map(<[String]>::to_vec),
            maps_to_word: rule.maps_to_word(),
        }
    }
}

impl LayoutRecord {
    /// Builds the layout (unvalidated). The first bad rule rejects the record.
    pub fn build(self) -> Result<Layout, BuildError> {
        let slots = self
            .rules
            .into_iter()
            .map(|slot| slot.map(RuleRecord::build).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        Layout::from_slots(self.name, slots)
    }
}

impl From<&Layout> for LayoutRecord {
    fn from(layout: &Layout) -> Self {
        Self {
            name: layout.name().to_string(),
            rules: layout
                .rules()
                .iter()
                .map(|r| Some(RuleRecord::from(r)))
                .collect(),
        }
    }
}

/// Parses a JSON array of layout records.
pub fn parse(json: &str) -> serde_json::Result<Vec<LayoutRecord>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_20char;

    const SAMPLE: &str = r#"[
      {
        "name": "legacy",
        "rules": [
          {"order": 1, "length": 1, "type": "STATIC", "staticValue": "T", "mapsToWord": false},
          {"order": 0, "length": 4, "type": "NUMERIC", "staticValue": null, "mapsToWord": true},
          {"order": 2, "length": 1, "kind": "STATIC_OR", "staticOrValues": ["E", "X"]}
        ]
      }
    ]"#;

    #[test]
    fn parses_legacy_field_names() {
        let records = parse(SAMPLE).unwrap();
        let layout = records.into_iter().next().unwrap().build().unwrap();
        assert_eq!(layout.name(), "legacy");
        assert_eq!(layout.rules()[0].order(), 0);
        assert!(layout.rules()[0].maps_to_word());
        assert_eq!(layout.rules()[1].static_value(), Some("T"));
        assert_eq!(layout.rules()[2].kind(), SegmentKind::StaticOr);
    }

    #[test]
    fn null_rule_rejects_layout() {
        let json = r#"[{"name": "holes", "rules": [null]}]"#;
        let record = parse(json).unwrap().remove(0);
        assert_eq!(
            record.build().unwrap_err(),
            BuildError::MissingRule {
                name: "holes".into(),
                position: 0
            }
        );
    }

    #[test]
    fn bad_rule_rejects_layout() {
        let json = r#"[{"name": "bad", "rules": [
            {"order": 0, "length": 2, "kind": "BASE64", "mapsToWord": true}
        ]}]"#;
        let record = parse(json).unwrap().remove(0);
        assert!(matches!(
            record.build().unwrap_err(),
            BuildError::WordMappedNotNumeric { .. }
        ));
    }

    #[test]
    fn record_preserves_layout() {
        let layout = default_20char().unwrap();
        let json = serde_json::to_string(&vec![LayoutRecord::from(&layout)]).unwrap();
        assert!(json.contains("\"kind\":\"STATIC_OR\""));
        assert!(json.contains("\"mapsToWord\":true"));
        let rebuilt = parse(&json).unwrap().remove(0).build().unwrap();
        assert_eq!(rebuilt, layout);
    }
}
