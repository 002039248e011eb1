//! Reference substitution.
//!
//! Turns a formula such as `A4-(A2+A3)` into a purely literal arithmetic
//! expression by replacing each reference with the referenced cell's
//! content. Formula cells are resolved in turn and their expanded body is
//! spliced in verbatim.
//!
//! Each top-level call owns a memo of already resolved ids, so a cell shared
//! by several branches of the graph is loaded and resolved once per call.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use tracing::debug;

use super::cell::CellStore;
use super::cell_ref::CellId;
use super::error::{CellError, CellResult};
use super::tokenize::tokenize;

/// Literal spliced in for referenced cells that have no content yet.
pub const EMPTY_CELL_LITERAL: &str = "0.00";

/// Resolve a formula body (leading '=' optional) into a literal expression.
///
/// The dependency graph reachable from the formula must be acyclic; a cycle
/// met during resolution is reported as [`CellError::CircularDependency`].
pub fn resolve<S: CellStore + ?Sized>(formula: &str, store: &S) -> CellResult<String> {
    let expression = Resolver::new(store).resolve(formula)?;
    debug!(len = expression.len(), "resolved formula");
    Ok(expression)
}

struct Frame {
    /// Cell whose body this frame resolves; None for the top-level formula.
    id: Option<CellId>,
    tokens: Vec<String>,
    next: usize,
    /// Offset in the output where this frame's expansion begins.
    start: usize,
}

impl Frame {
    fn new(id: Option<CellId>, formula: &str, start: usize) -> Frame {
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        Frame {
            id,
            tokens: tokenize(formula).into_iter().map(str::to_string).collect(),
            next: 0,
            start,
        }
    }
}

struct Resolver<'s, S: ?Sized> {
    store: &'s S,
    out: String,
    /// Where each resolved cell's expansion sits in `out`.
    memo: HashMap<CellId, Range<usize>>,
    active: HashSet<CellId>,
}

impl<'s, S: CellStore + ?Sized> Resolver<'s, S> {
    fn new(store: &'s S) -> Self {
        Resolver {
            store,
            out: String::new(),
            memo: HashMap::new(),
            active: HashSet::new(),
        }
    }

    /// Append an earlier expansion again.
    fn splice(&mut self, range: Range<usize>) {
        let copied = self.out[range].to_string();
        self.out.push_str(&copied);
    }

    fn resolve(mut self, formula: &str) -> CellResult<String> {
        let mut stack = vec![Frame::new(None, formula, 0)];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.tokens.len() {
                let Some(done) = stack.pop() else { break };
                match done.id {
                    None => return Ok(self.out),
                    Some(id) => {
                        self.active.remove(&id);
                        self.memo.insert(id, done.start..self.out.len());
                    }
                }
                continue;
            }

            let token = &frame.tokens[frame.next];
            let Some(reference) = CellId::from_reference(token) else {
                self.out.push_str(token);
                frame.next += 1;
                continue;
            };
            // A formula reference is finished by the frame pushed below.
            frame.next += 1;

            if let Some(range) = self.memo.get(&reference).cloned() {
                self.splice(range);
                continue;
            }

            let record = self
                .store
                .find(&reference)
                .ok_or_else(|| CellError::UnknownReference(reference.clone()))?;

            match record.formula_body() {
                Some(body) => {
                    if !self.active.insert(reference.clone()) {
                        return Err(CellError::CircularDependency(reference));
                    }
                    stack.push(Frame::new(Some(reference), body, self.out.len()));
                }
                None => {
                    let start = self.out.len();
                    if record.is_placeholder() {
                        self.out.push_str(EMPTY_CELL_LITERAL);
                    } else {
                        self.out.push_str(&record.content);
                    }
                    self.memo.insert(reference, start..self.out.len());
                }
            }
        }

        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CellRecord, MemoryStore};
    use std::cell::RefCell;

    fn id(s: &str) -> CellId {
        CellId::parse(s).unwrap()
    }

    fn put(store: &MemoryStore, name: &str, content: &str) {
        store.save(CellRecord::new(id(name), content));
    }

    /// Counts lookups per id.
    struct CountingStore {
        inner: MemoryStore,
        finds: RefCell<HashMap<CellId, usize>>,
    }

    impl CellStore for CountingStore {
        fn find(&self, id: &CellId) -> Option<crate::engine::CellRecord> {
            *self.finds.borrow_mut().entry(id.clone()).or_default() += 1;
            self.inner.find(id)
        }

        fn save(&self, record: CellRecord) -> CellRecord {
            self.inner.save(record)
        }
    }

    #[test]
    fn test_resolve_literal_references() {
        let store = MemoryStore::new();
        put(&store, "A2", "12");
        put(&store, "A3", "13");
        put(&store, "A4", "14");
        assert_eq!(resolve("A4-(A2+A3)", &store).unwrap(), "14-(12+13)");
    }

    #[test]
    fn test_resolve_diamond_loads_each_cell_once() {
        let inner = MemoryStore::new();
        put(&inner, "A1", "=A4+A2+A3");
        put(&inner, "A2", "=12");
        put(&inner, "A3", "=13");
        put(&inner, "A4", "=14");
        let store = CountingStore {
            inner,
            finds: RefCell::new(HashMap::new()),
        };

        assert_eq!(resolve("=A4+A2+A3", &store).unwrap(), "14+12+13");
        assert_eq!(resolve("A2+A2*A2", &store).unwrap(), "12+12*12");
        // one lookup per resolve call
        assert_eq!(store.finds.borrow()[&id("A2")], 2);
        assert_eq!(store.finds.borrow()[&id("A4")], 1);
    }

    #[test]
    fn test_resolve_shared_formula_resolved_once() {
        let inner = MemoryStore::new();
        put(&inner, "B1", "=C1+C1");
        put(&inner, "B2", "=C1*2");
        put(&inner, "C1", "=D1");
        put(&inner, "D1", "5");
        let store = CountingStore {
            inner,
            finds: RefCell::new(HashMap::new()),
        };

        assert_eq!(resolve("B1-B2", &store).unwrap(), "5+5-5*2");
        assert_eq!(store.finds.borrow()[&id("C1")], 1);
        assert_eq!(store.finds.borrow()[&id("D1")], 1);
    }

    #[test]
    fn test_resolve_splices_formula_bodies_verbatim() {
        let store = MemoryStore::new();
        put(&store, "A2", "=1+2");
        put(&store, "A3", "=-12.0");
        assert_eq!(resolve("A2*3", &store).unwrap(), "1+2*3");
        assert_eq!(resolve("A3", &store).unwrap(), "-12.0");
        assert_eq!(resolve("(A3)", &store).unwrap(), "(-12.0)");
    }

    #[test]
    fn test_resolve_long_chain() {
        let store = MemoryStore::new();
        let n = 20_000;
        for i in 1..n {
            put(&store, &format!("B{}", i), &format!("=B{}+1", i + 1));
        }
        store.save(CellRecord::placeholder(id(&format!("B{}", n))));

        let expression = resolve("B1", &store).unwrap();
        assert!(expression.starts_with("0.00+1+1"));
        assert_eq!(expression.matches("+1").count(), n - 1);
    }

    #[test]
    fn test_resolve_placeholder_as_zero() {
        let store = MemoryStore::new();
        store.save(CellRecord::placeholder(id("B5")));
        assert_eq!(resolve("B5+1", &store).unwrap(), "0.00+1");
    }

    #[test]
    fn test_resolve_unknown_reference() {
        let store = MemoryStore::new();
        put(&store, "A2", "1");
        let err = resolve("A5+A2+A3", &store).unwrap_err();
        assert_eq!(err, CellError::UnknownReference(id("A5")));
    }

    #[test]
    fn test_resolve_lowercase_reference() {
        let store = MemoryStore::new();
        put(&store, "B2", "7");
        assert_eq!(resolve("b2*2", &store).unwrap(), "7*2");
    }

    #[test]
    fn test_resolve_cycle_terminates() {
        let store = MemoryStore::new();
        put(&store, "A1", "=B1");
        put(&store, "B1", "=A1");
        assert!(matches!(
            resolve("A1", &store),
            Err(CellError::CircularDependency(_))
        ));
    }

    #[test]
    fn test_resolve_without_references() {
        let store = MemoryStore::new();
        assert_eq!(resolve("12+23.03+(10-5)", &store).unwrap(), "12+23.03+(10-5)");
        assert_eq!(resolve("", &store).unwrap(), "");
    }
}
