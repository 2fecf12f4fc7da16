use super::records::{self, LayoutRecord};
use super::{validated, LayoutStore, SkippedLayout};
use crate::error::{BarwordsError, Result};
use crate::layout::Layout;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Layouts kept in one JSON file, cached in memory.
///
/// Every write rewrites the whole file from the in-memory map. Layouts that
/// failed to load are not written back.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    layouts: BTreeMap<String, Arc<Layout>>,
    skipped: Vec<SkippedLayout>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            layouts: BTreeMap::new(),
            skipped: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Layouts from the last load that failed to build or validate.
    pub fn skipped(&self) -> &[SkippedLayout] {
        &self.skipped
    }

    /// Re-reads the file, replacing everything held in memory.
    pub fn reload(&mut self) -> Result<()> {
        self.layouts.clear();
        self.skipped.clear();

        if !self.path.exists() {
            debug!(path = %self.path.display(), "layout file not found, store is empty");
            return Ok(());
        }

        let content = fs::read_to_string(&self.path).map_err(BarwordsError::Io)?;
        let records = records::parse(&content).map_err(BarwordsError::Serialization)?;

        for record in records {
            let name = record.name.clone();
            match record.build().map_err(BarwordsError::from).and_then(validated) {
                Ok(layout) => {
                    if self.layouts.insert(name.clone(), layout).is_some() {
                        debug!(layout = %name, "layout listed twice, keeping the later one");
                    }
                }
                Err(e) => {
                    warn!(layout = %name, error = %e, "skipping layout");
                    self.skipped.push(SkippedLayout {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            path = %self.path.display(),
            loaded = self.layouts.len(),
            skipped = self.skipped.len(),
            "layouts loaded"
        );
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(BarwordsError::Io)?;
            }
        }
        let records: Vec<LayoutRecord> = self
            .layouts
            .values()
            .map(|l| LayoutRecord::from(l.as_ref()))
            .collect();
        let content =
            serde_json::to_string_pretty(&records).map_err(BarwordsError::Serialization)?;
        fs::write(&self.path, content).map_err(BarwordsError::Io)?;
        debug!(path = %self.path.display(), count = records.len(), "layouts written");
        Ok(())
    }
}

impl LayoutStore for FileStore {
    fn get(&self, name: &str) -> Result<Option<Arc<Layout>>> {
        Ok(self.layouts.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<Arc<Layout>>> {
        Ok(self.layouts.values().cloned().collect())
    }

    fn save(&mut self, layout: Layout) -> Result<Arc<Layout>> {
        let layout = validated(layout)?;
        let previous = self
            .layouts
            .insert(layout.name().to_string(), Arc::clone(&layout));
        if let Err(e) = self.persist() {
            // Keep memory in line with the file we failed to write.
            match previous {
                Some(old) => self.layouts.insert(layout.name().to_string(), old),
                None => self.layouts.remove(layout.name()),
            };
            return Err(e);
        }
        info!(layout = layout.name(), "layout saved");
        Ok(layout)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let Some(removed) = self.layouts.remove(name) else {
            debug!(layout = name, "nothing to delete");
            return Ok(false);
        };
        if let Err(e) = self.persist() {
            self.layouts.insert(name.to_string(), removed);
            return Err(e);
        }
        info!(layout = name, "layout deleted");
        Ok(true)
    }
}
