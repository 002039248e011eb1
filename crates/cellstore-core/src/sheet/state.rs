use cellstore_engine::engine::{CellStore, MemoryStore, format_number};
use std::fmt;

use crate::config::{Config, CyclePolicy};

/// A value as received from a client, before it is stored as text.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Number(n) => f.write_str(&format_number(*n)),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Integer(n.into())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Integer(n)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// Cell operations bound to a store.
///
/// Operations take `&self`; concurrent use is safe as long as the store is
/// (the bundled [`MemoryStore`] is).
#[derive(Clone, Debug)]
pub struct Sheet<S = MemoryStore> {
    pub(crate) store: S,
    pub(crate) policy: CyclePolicy,
}

impl Sheet<MemoryStore> {
    /// Create an empty in-memory sheet with lazy (read-time) cycle checks.
    pub fn in_memory() -> Self {
        Sheet::new(MemoryStore::new())
    }
}

impl Default for Sheet<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: CellStore> Sheet<S> {
    pub fn new(store: S) -> Self {
        Sheet {
            store,
            policy: CyclePolicy::default(),
        }
    }

    pub fn with_policy(store: S, policy: CyclePolicy) -> Self {
        Sheet { store, policy }
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self::with_policy(store, config.cycle_check)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> CyclePolicy {
        self.policy
    }
}
