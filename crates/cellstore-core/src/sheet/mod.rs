//! Cell operations over a store (transport-agnostic).

mod io;
mod ops;
mod state;

pub use state::{RawValue, Sheet};
