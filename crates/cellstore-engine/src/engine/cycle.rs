//! Circular dependency detection for formula cells.
//!
//! Cycles are not rejected when a formula is written; they are found when a
//! cell is read (e.g., A1 references A3, A3 references B2, B2 references A1).
//! This module walks the persisted dependency edges depth-first, colouring
//! each cell as in-path or done, before any evaluation is attempted.
//!
//! The walk keeps its own stack instead of recursing, so long reference
//! chains cannot overflow the call stack.

use std::collections::HashMap;

use tracing::info;

use super::cell::{CellRecord, CellStore};
use super::cell_ref::CellId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path.
    InPath,
    /// Fully explored, no cycle through it.
    Done,
}

struct Frame {
    id: CellId,
    deps: Vec<CellId>,
    next: usize,
}

/// True if a circular reference is reachable from `start`.
pub fn has_cycle<S: CellStore + ?Sized>(start: &CellRecord, store: &S) -> bool {
    find_cycle(start, store).is_some()
}

/// Detect circular dependencies reachable from a cell.
/// Returns Some(cycle_path) if a cycle is found, None otherwise. The path
/// starts and ends with the same id.
pub fn find_cycle<S: CellStore + ?Sized>(start: &CellRecord, store: &S) -> Option<Vec<CellId>> {
    let mut marks: HashMap<CellId, Mark> = HashMap::new();

    for dep in &start.dependencies {
        if let Some(cycle) = walk(dep, store, &mut marks) {
            info!(cell = %start.id, cycle = ?cycle, "circular dependency found");
            return Some(cycle);
        }
    }
    None
}

fn walk<S: CellStore + ?Sized>(
    root: &CellId,
    store: &S,
    marks: &mut HashMap<CellId, Mark>,
) -> Option<Vec<CellId>> {
    if marks.contains_key(root) {
        // Roots are walked one at a time, so a marked root is always Done.
        return None;
    }

    let mut stack = vec![enter(root, store, marks)];

    loop {
        let next = match stack.last_mut() {
            Some(frame) if frame.next < frame.deps.len() => {
                frame.next += 1;
                Some(frame.deps[frame.next - 1].clone())
            }
            Some(_) => None,
            None => return None,
        };

        match next {
            Some(dep) => match marks.get(&dep) {
                Some(Mark::InPath) => return Some(cycle_path(&stack, dep)),
                Some(Mark::Done) => {}
                None => {
                    let frame = enter(&dep, store, marks);
                    stack.push(frame);
                }
            },
            None => {
                if let Some(done) = stack.pop() {
                    marks.insert(done.id, Mark::Done);
                }
            }
        }
    }
}

fn enter<S: CellStore + ?Sized>(
    id: &CellId,
    store: &S,
    marks: &mut HashMap<CellId, Mark>,
) -> Frame {
    marks.insert(id.clone(), Mark::InPath);
    // A reference with no record has no outgoing edges.
    let deps = store
        .find(id)
        .map(|record| record.dependencies)
        .unwrap_or_default();
    Frame {
        id: id.clone(),
        deps,
        next: 0,
    }
}

fn cycle_path(stack: &[Frame], closing: CellId) -> Vec<CellId> {
    let from = stack
        .iter()
        .position(|frame| frame.id == closing)
        .unwrap_or(0);
    let mut path: Vec<CellId> = stack[from..].iter().map(|frame| frame.id.clone()).collect();
    path.push(closing);
    path
}
