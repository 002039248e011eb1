//! Snapshot file format (.grd)
//!
//! One `ID: content` line per record, sorted by id. Lines starting with `#`
//! are comments. Placeholders are written with empty content (`B7:`).

mod parser;
mod writer;

pub use parser::{SnapshotEntry, parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};
