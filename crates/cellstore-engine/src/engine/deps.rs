//! Dependency extraction from formula strings.
//!
//! Finds every cell reference a formula names. The resulting ordered list
//! becomes the cell's outgoing edges in the dependency graph, which the
//! cycle detector walks at read time.

use tracing::debug;

use super::cell::{CellRecord, CellStore};
use super::cell_ref::CellId;
use super::error::{CellError, CellResult};
use super::tokenize::tokenize;

/// Extract all cell references from a formula body owned by `owner`.
///
/// A leading '=' is tolerated. References are uppercased; duplicates are
/// kept in first-occurrence order. Fails if the formula references `owner`.
pub fn extract_dependencies(owner: &str, formula: &str) -> CellResult<Vec<CellId>> {
    let owner = CellId::parse(owner).ok_or_else(|| CellError::InvalidIdentifier(owner.into()))?;
    let formula = formula.strip_prefix('=').unwrap_or(formula);

    let mut deps = Vec::new();
    for token in tokenize(formula) {
        let Some(reference) = CellId::from_reference(token) else {
            continue;
        };
        if reference == owner {
            return Err(CellError::SelfReference(owner));
        }
        deps.push(reference);
    }

    Ok(deps)
}

/// Create an empty placeholder record for every dependency missing from `store`.
/// Existing records, including ones written concurrently, are never replaced.
/// Returns the ids that were created.
pub fn ensure_placeholders<S: CellStore + ?Sized>(store: &S, deps: &[CellId]) -> Vec<CellId> {
    let mut created = Vec::new();
    for dep in deps {
        if created.contains(dep) {
            continue;
        }
        if store.save_if_absent(CellRecord::placeholder(dep.clone())) {
            created.push(dep.clone());
        }
    }
    if !created.is_empty() {
        debug!(count = created.len(), "created placeholder cells");
    }
    created
}
