use super::{validated, LayoutStore};
use crate::error::Result;
use crate::layout::Layout;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    layouts: BTreeMap<String, Arc<Layout>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `layouts`, each validated on the way in.
    pub fn with_layouts(layouts: impl IntoIterator<Item = Layout>) -> Result<Self> {
        let mut store = Self::new();
        for layout in layouts {
            store.save(layout)?;
        }
        Ok(store)
    }
}

impl LayoutStore for InMemoryStore {
    fn get(&self, name: &str) -> Result<Option<Arc<Layout>>> {
        Ok(self.layouts.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<Arc<Layout>>> {
        Ok(self.layouts.values().cloned().collect())
    }

    fn save(&mut self, layout: Layout) -> Result<Arc<Layout>> {
        let layout = validated(layout)?;
        self.layouts
            .insert(layout.name().to_string(), Arc::clone(&layout));
        Ok(layout)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        Ok(self.layouts.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BarwordsError;
    use crate::segment::SegmentRule;

    fn words_layout(name: &str, width: usize) -> Layout {
        Layout::new(
            name,
            (0..4).map(|o| SegmentRule::word(o, width).unwrap()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn save_validates_before_storing() {
        let mut store = InMemoryStore::new();
        let three = Layout::new(
            "three",
            (0..3).map(|o| SegmentRule::word(o, 4).unwrap()).collect(),
        )
        .unwrap();
        let err = store.save(three).unwrap_err();
        assert!(matches!(err, BarwordsError::Validation(_)));
        assert!(store.get("three").unwrap().is_none());
    }

    #[test]
    fn save_swaps_by_name() {
        let mut store = InMemoryStore::new();
        let before = store.save(words_layout("a", 2)).unwrap();
        store.save(words_layout("a", 3)).unwrap();

        // Holders of the old layout keep it intact.
        assert_eq!(before.total_length(), 8);
        assert_eq!(store.get("a").unwrap().unwrap().total_length(), 12);
        assert_eq!(store.names().unwrap(), vec!["a"]);
    }

    #[test]
    fn resolve_defaults_to_smallest_name() {
        let store =
            InMemoryStore::with_layouts([words_layout("zeta", 4), words_layout("alpha", 4)])
                .unwrap();
        assert_eq!(store.resolve(None).unwrap().name(), "alpha");
        assert_eq!(store.resolve(Some("  ")).unwrap().name(), "alpha");
        assert_eq!(store.resolve(Some("zeta")).unwrap().name(), "zeta");
    }

    #[test]
    fn resolve_errors() {
        let empty = InMemoryStore::new();
        assert!(matches!(
            empty.resolve(None).unwrap_err(),
            BarwordsError::NoLayouts
        ));

        let store = InMemoryStore::with_layouts([words_layout("alpha", 4)]).unwrap();
        assert!(matches!(
            store.resolve(Some("beta")).unwrap_err(),
            BarwordsError::LayoutNotFound(name) if name == "beta"
        ));
    }

    #[test]
    fn delete_reports_whether_removed() {
        let mut store = InMemoryStore::with_layouts([words_layout("alpha", 4)]).unwrap();
        assert!(store.delete("alpha").unwrap());
        assert!(!store.delete("alpha").unwrap());
    }
}
