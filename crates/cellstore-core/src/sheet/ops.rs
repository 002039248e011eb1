use super::{RawValue, Sheet};
use crate::config::CyclePolicy;
use cellstore_engine::engine::{
    CellError, CellId, CellRecord, CellResult, CellStore, ensure_placeholders, evaluate,
    extract_dependencies, find_cycle, format_number, resolve,
};
use tracing::debug;

/// Store view with one record replaced, for checking a write before it lands.
struct Pending<'a, S> {
    store: &'a S,
    record: &'a CellRecord,
}

impl<S: CellStore> CellStore for Pending<'_, S> {
    fn find(&self, id: &CellId) -> Option<CellRecord> {
        if *id == self.record.id {
            Some(self.record.clone())
        } else {
            self.store.find(id)
        }
    }

    fn save(&self, record: CellRecord) -> CellRecord {
        self.store.save(record)
    }

    fn save_if_absent(&self, record: CellRecord) -> bool {
        self.store.save_if_absent(record)
    }
}

fn parse_id(id: &str) -> CellResult<CellId> {
    CellId::parse(id).ok_or_else(|| CellError::InvalidIdentifier(id.to_string()))
}

impl<S: CellStore> Sheet<S> {
    /// Write a literal or formula into a cell, replacing its previous content
    /// and dependency list. Referenced cells that don't exist yet are created
    /// as empty placeholders.
    pub fn set_cell_value(&self, id: &str, value: impl Into<RawValue>) -> CellResult<()> {
        let check_cycles = self.policy == CyclePolicy::Write;
        self.write_cell(id, &value.into().to_string(), check_cycles)
    }

    pub(crate) fn write_cell(&self, id: &str, content: &str, check_cycles: bool) -> CellResult<()> {
        let cell_id = parse_id(id)?;

        let dependencies = match content.strip_prefix('=') {
            Some(formula) => extract_dependencies(cell_id.as_str(), formula)?,
            None => Vec::new(),
        };

        let mut record = self
            .store
            .find(&cell_id)
            .unwrap_or_else(|| CellRecord::placeholder(cell_id.clone()));
        record.content = content.to_string();
        record.dependencies = dependencies;

        // The owner is only written once every check has passed.
        if check_cycles {
            let pending = Pending {
                store: &self.store,
                record: &record,
            };
            if find_cycle(&record, &pending).is_some() {
                return Err(CellError::CircularDependency(cell_id));
            }
        }

        ensure_placeholders(&self.store, &record.dependencies);
        debug!(cell = %cell_id, deps = record.dependencies.len(), "cell written");
        self.store.save(record);
        Ok(())
    }

    /// Read a cell's value. Formulas are resolved and evaluated; literals are
    /// returned verbatim.
    pub fn get_cell_value(&self, id: &str) -> CellResult<String> {
        let cell_id = parse_id(id)?;
        let record = self
            .store
            .find(&cell_id)
            .ok_or_else(|| CellError::CellNotFound(cell_id.clone()))?;

        if find_cycle(&record, &self.store).is_some() {
            return Err(CellError::CircularDependency(cell_id));
        }

        let Some(formula) = record.formula_body() else {
            return Ok(record.content.clone());
        };
        let expression = resolve(formula, &self.store)?;
        let value = evaluate(&expression)?;
        Ok(format_number(value))
    }
}
