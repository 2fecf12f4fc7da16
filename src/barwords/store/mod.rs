//! # Storage Layer
//!
//! The [`LayoutStore`] trait is the registry of named layouts. Conversions
//! never reach into a store themselves: callers resolve one [`Layout`] and hand
//! it to the engine.
//!
//! ## Swapping, not editing
//!
//! Stores hand out `Arc<Layout>`. Saving a layout validates it first and then
//! replaces the `Arc` under its name, so a conversion that already holds the
//! old layout keeps a complete, consistent rule list until it finishes.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a JSON file of layout records (`layouts.json`)
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <home>/
//! ├── config.json       # BarwordsConfig
//! ├── layouts.json      # [ { "name": ..., "rules": [ ... ] }, ... ]
//! └── words.txt         # one word per line, index = line order
//! ```

use crate::error::{BarwordsError, Result};
use crate::layout::{self, Layout};
use std::sync::Arc;

pub mod fs;
pub mod memory;
pub mod records;

/// A layout that could not be loaded, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLayout {
    pub name: String,
    pub reason: String,
}

pub trait LayoutStore {
    /// Get a layout by exact name
    fn get(&self, name: &str) -> Result<Option<Arc<Layout>>>;

    /// All layouts, sorted by name
    fn list(&self) -> Result<Vec<Arc<Layout>>>;

    /// Validate `layout` and make it visible under its name, replacing any previous one
    fn save(&mut self, layout: Layout) -> Result<Arc<Layout>>;

    /// Remove a layout. Returns false when nothing had that name.
    fn delete(&mut self, name: &str) -> Result<bool>;

    fn names(&self) -> Result<Vec<String>> {
        Ok(self
            .list()?
            .iter()
            .map(|l| l.name().to_string())
            .collect())
    }

    /// Picks the layout for a request. A blank name means the first layout
    /// by name.
    fn resolve(&self, name: Option<&str>) -> Result<Arc<Layout>> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => self
                .get(name)?
                .ok_or_else(|| BarwordsError::LayoutNotFound(name.to_string())),
            None => {
                let layout = self
                    .list()?
                    .into_iter()
                    .next()
                    .ok_or(BarwordsError::NoLayouts)?;
                tracing::debug!(layout = layout.name(), "no layout requested, using default");
                Ok(layout)
            }
        }
    }
}

/// Layouts written by `init` into an empty store.
pub fn default_layouts() -> Result<Vec<Layout>> {
    let mut layout = layout::default_20char()?;
    layout.validate()?;
    Ok(vec![layout])
}

fn validated(mut layout: Layout) -> Result<Arc<Layout>> {
    layout.validate()?;
    Ok(Arc::new(layout))
}
