//! Formula engine API.
//!
//! This module provides the core computation engine for the cell store:
//!
//! - [`CellId`], [`validate`] - Cell identifier validation (`^[A-Z]\d+$`)
//! - [`CellRecord`], [`CellStore`], [`MemoryStore`] - Records and the store they live in
//! - [`tokenize`] - Split formula text on operator boundaries
//! - [`extract_dependencies`] - Parse formula dependencies
//! - [`has_cycle`], [`find_cycle`] - Circular dependency detection
//! - [`resolve`] - Substitute references with literal content
//! - [`evaluate`], [`format_number`] - Arithmetic evaluation and display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod resolve;
mod tokenize;

pub use cell::{CellRecord, CellStore, MemoryStore};
pub use cell_ref::{CellId, validate};
pub use cycle::{find_cycle, has_cycle};
pub use deps::{ensure_placeholders, extract_dependencies};
pub use error::{CellError, CellResult, ErrorKind};
pub use eval::evaluate;
pub use format::format_number;
pub use resolve::{EMPTY_CELL_LITERAL, resolve};
pub use tokenize::{OPERATORS, is_operator, tokenize};
