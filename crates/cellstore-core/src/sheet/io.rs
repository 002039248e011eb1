use super::Sheet;
use crate::error::{CellstoreError, Result};
use crate::storage::{SnapshotEntry, parse_grd, parse_grd_content, write_grd, write_grd_content};
use cellstore_engine::engine::MemoryStore;
use std::path::Path;
use tracing::info;

impl Sheet<MemoryStore> {
    /// Load a .grd snapshot into the store, replacing its contents.
    /// Returns the number of entries read.
    pub fn load_snapshot(&self, path: &Path) -> Result<usize> {
        let entries = parse_grd(path)?;
        let count = self.apply_entries(entries)?;
        info!(path = %path.display(), cells = count, "snapshot loaded");
        Ok(count)
    }

    pub fn load_snapshot_content(&self, content: &str) -> Result<usize> {
        self.apply_entries(parse_grd_content(content)?)
    }

    /// Write every record, placeholders included, to a .grd snapshot.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        write_grd(path, &self.store)?;
        info!(path = %path.display(), cells = self.store.len(), "snapshot saved");
        Ok(())
    }

    pub fn snapshot_content(&self) -> String {
        write_grd_content(&self.store)
    }

    fn apply_entries(&self, entries: Vec<SnapshotEntry>) -> Result<usize> {
        self.store.clear();
        let count = entries.len();
        // Dependencies are recomputed from content; a snapshot may hold cycles,
        // which are reported when the cells are read, as for any other write.
        for entry in entries {
            self.write_cell(entry.id.as_str(), &entry.content, false)
                .map_err(|e| CellstoreError::Parse {
                    line: entry.line,
                    message: e.to_string(),
                })?;
        }
        Ok(count)
    }
}
