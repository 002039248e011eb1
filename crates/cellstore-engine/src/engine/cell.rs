//! Cell records and the store they live in.
//!
//! - [`CellRecord`] - A cell with its raw content and outgoing dependency edges
//! - [`CellStore`] - The key-value repository the engine reads and writes through
//! - [`MemoryStore`] - Thread-safe sparse storage for records (backed by `DashMap`)

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use super::cell_ref::CellId;

/// A cell as persisted in the store.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    pub id: CellId,
    /// Raw text as last written: a literal, or a formula starting with '='.
    pub content: String,
    /// Ids referenced by `content`, in first-occurrence order.
    pub dependencies: Vec<CellId>,
}

impl CellRecord {
    pub fn new(id: CellId, content: &str) -> CellRecord {
        CellRecord {
            id,
            content: content.to_string(),
            dependencies: vec![],
        }
    }

    /// An empty record created because another formula referenced `id`.
    pub fn placeholder(id: CellId) -> CellRecord {
        CellRecord::new(id, "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.content.is_empty()
    }

    /// The formula text without its leading '=', if this cell holds a formula.
    pub fn formula_body(&self) -> Option<&str> {
        self.content.strip_prefix('=')
    }
}

/// Key-value repository for cell records.
///
/// Implementations must make each `save` atomic per key: a concurrent `find`
/// sees either the old record or the new one, never a mix.
pub trait CellStore {
    fn find(&self, id: &CellId) -> Option<CellRecord>;

    /// Insert or replace the record stored under `record.id`.
    fn save(&self, record: CellRecord) -> CellRecord;

    /// Insert `record` only if nothing is stored under its id yet.
    /// Returns true if it was inserted.
    ///
    /// The default is a find followed by a save; stores shared between
    /// threads should override it with an atomic insert.
    fn save_if_absent(&self, record: CellRecord) -> bool {
        if self.find(&record.id).is_some() {
            return false;
        }
        self.save(record);
        true
    }
}

impl<S: CellStore + ?Sized> CellStore for &S {
    fn find(&self, id: &CellId) -> Option<CellRecord> {
        (**self).find(id)
    }

    fn save(&self, record: CellRecord) -> CellRecord {
        (**self).save(record)
    }

    fn save_if_absent(&self, record: CellRecord) -> bool {
        (**self).save_if_absent(record)
    }
}

impl<S: CellStore + ?Sized> CellStore for Arc<S> {
    fn find(&self, id: &CellId) -> Option<CellRecord> {
        (**self).find(id)
    }

    fn save(&self, record: CellRecord) -> CellRecord {
        (**self).save(record)
    }

    fn save_if_absent(&self, record: CellRecord) -> bool {
        (**self).save_if_absent(record)
    }
}

/// In-memory store. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    cells: Arc<DashMap<CellId, CellRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.cells.contains_key(id)
    }

    /// Snapshot of every record, sorted by id.
    pub fn records(&self) -> Vec<CellRecord> {
        let mut records: Vec<CellRecord> =
            self.cells.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    pub fn clear(&self) {
        self.cells.clear();
    }
}

impl CellStore for MemoryStore {
    fn find(&self, id: &CellId) -> Option<CellRecord> {
        self.cells.get(id).map(|r| r.clone())
    }

    fn save(&self, record: CellRecord) -> CellRecord {
        self.cells.insert(record.id.clone(), record.clone());
        record
    }

    fn save_if_absent(&self, record: CellRecord) -> bool {
        match self.cells.entry(record.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }
}
