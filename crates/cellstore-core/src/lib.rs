//! cellstore-core - cell operations over a pluggable store.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod sheet;
pub mod storage;

pub use config::{Config, CyclePolicy};
pub use dispatch::{Request, Response};
pub use error::{CellstoreError, Result};
pub use sheet::{RawValue, Sheet};

pub use cellstore_engine::engine::{CellError, CellId, CellRecord, CellStore, MemoryStore};
