//! cellstore_engine - Formula dependency engine for the cell store.

pub mod engine;
