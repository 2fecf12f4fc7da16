use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BarwordsError, Result};
use crate::layout::Layout;
use crate::store::records;
use crate::store::LayoutStore;
use tracing::info;

pub fn list<S: LayoutStore>(store: &S) -> Result<CmdResult> {
    let layouts = store.list()?;
    let mut result = CmdResult::default();
    if layouts.is_empty() {
        result.add_message(CmdMessage::info("No layouts found."));
    }
    Ok(result.with_layouts(layouts))
}

pub fn show<S: LayoutStore>(store: &S, name: &str) -> Result<CmdResult> {
    let layout = store
        .get(name)?
        .ok_or_else(|| BarwordsError::LayoutNotFound(name.to_string()))?;
    Ok(CmdResult::default().with_layouts(vec![layout]))
}

/// Saves every layout in a JSON array, replacing same-named ones.
///
/// All layouts are built and validated before any is saved, so a bad entry
/// leaves the store untouched.
pub fn import<S: LayoutStore>(store: &mut S, json: &str) -> Result<CmdResult> {
    let records = records::parse(json)?;
    if records.is_empty() {
        return Err(BarwordsError::Api("No layouts to import".to_string()));
    }

    let mut layouts = Vec::with_capacity(records.len());
    for record in records {
        let mut layout: Layout = record.build()?;
        layout.validate()?;
        layouts.push(layout);
    }

    let mut result = CmdResult::default();
    for layout in layouts {
        let replaced = store.get(layout.name())?.is_some();
        let saved = store.save(layout)?;
        let verb = if replaced { "replaced" } else { "added" };
        result.add_message(CmdMessage::success(format!(
            "Layout {}: {} ({} characters)",
            verb,
            saved.name(),
            saved.total_length()
        )));
        result.layouts.push(saved);
    }
    info!(count = result.layouts.len(), "layouts imported");
    Ok(result)
}

pub fn delete<S: LayoutStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.delete(name)? {
        result.add_message(CmdMessage::success(format!("Layout deleted: {}", name)));
    } else {
        result.add_message(CmdMessage::warning(format!("Layout not found: {}", name)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_20char;
    use crate::store::memory::InMemoryStore;

    const TWO: &str = r#"[
      {"name": "b", "rules": [
        {"order": 0, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 1, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 2, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 3, "length": 2, "kind": "NUMERIC", "mapsToWord": true}
      ]},
      {"name": "a", "rules": [
        {"order": 0, "length": 3, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 1, "length": 3, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 2, "length": 3, "kind": "NUMERIC", "mapsToWord": true},
        {"order": 3, "length": 3, "kind": "NUMERIC", "mapsToWord": true}
      ]}
    ]"#;

    #[test]
    fn import_then_list_sorted() {
        let mut store = InMemoryStore::new();
        let result = import(&mut store, TWO).unwrap();
        assert_eq!(result.layouts.len(), 2);

        let listed = list(&store).unwrap();
        let names: Vec<&str> = listed.layouts.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn import_is_all_or_nothing() {
        let mut store = InMemoryStore::new();
        let json = r#"[
          {"name": "ok", "rules": [
            {"order": 0, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 1, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 2, "length": 2, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 3, "length": 2, "kind": "NUMERIC", "mapsToWord": true}
          ]},
          {"name": "short", "rules": [
            {"order": 0, "length": 2, "kind": "NUMERIC", "mapsToWord": true}
          ]}
        ]"#;
        let err = import(&mut store, json).unwrap_err();
        assert!(matches!(err, BarwordsError::Validation(_)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn import_replaces_by_name() {
        let mut store = InMemoryStore::with_layouts([{
            let mut l = default_20char().unwrap();
            l.validate().unwrap();
            l
        }])
        .unwrap();
        let json = r#"[{"name": "default-20char", "rules": [
            {"order": 0, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 1, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 2, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 3, "length": 1, "kind": "NUMERIC", "mapsToWord": true}
        ]}]"#;
        let result = import(&mut store, json).unwrap();
        assert!(result.messages[0].content.contains("replaced"));
        assert_eq!(
            store.get("default-20char").unwrap().unwrap().total_length(),
            4
        );
    }

    #[test]
    fn import_accepts_orders_up_to_i64_max() {
        let mut store = InMemoryStore::new();
        let json = r#"[{"name": "top", "rules": [
            {"order": 9223372036854775804, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 9223372036854775805, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 9223372036854775806, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 9223372036854775807, "length": 1, "kind": "NUMERIC", "mapsToWord": true}
        ]}]"#;
        import(&mut store, json).unwrap();
        assert_eq!(store.get("top").unwrap().unwrap().total_length(), 4);

        let lone = r#"[{"name": "lone", "rules": [
            {"order": 9223372036854775807, "length": 1, "kind": "NUMERIC", "mapsToWord": true}
        ]}]"#;
        assert!(matches!(
            import(&mut store, lone).unwrap_err(),
            BarwordsError::Validation(_)
        ));
    }

    #[test]
    fn import_rejects_huge_lengths() {
        let mut store = InMemoryStore::new();
        let json = r#"[{"name": "huge", "rules": [
            {"order": 0, "length": 18446744073709551615, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 1, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 2, "length": 1, "kind": "NUMERIC", "mapsToWord": true},
            {"order": 3, "length": 1, "kind": "NUMERIC", "mapsToWord": true}
        ]}]"#;
        let err = import(&mut store, json).unwrap_err();
        assert!(matches!(
            err,
            BarwordsError::Build(crate::error::BuildError::LengthTooLarge { .. })
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn show_unknown_layout() {
        let store = InMemoryStore::new();
        assert!(matches!(
            show(&store, "x").unwrap_err(),
            BarwordsError::LayoutNotFound(_)
        ));
    }

    #[test]
    fn delete_missing_is_warning() {
        let mut store = InMemoryStore::new();
        let result = delete(&mut store, "x").unwrap();
        assert_eq!(
            result.messages[0].level,
            crate::commands::MessageLevel::Warning
        );
    }
}
