//! Cell identifier validation and formatting.
//!
//! A cell id is a single uppercase letter followed by one or more digits
//! (e.g., "A1", "B12"). Formula references are matched case-insensitively
//! and normalized to the canonical uppercase form.
//!
//! # Examples
//!
//! ```ignore
//! let id = CellId::parse("B3").unwrap();
//! assert_eq!(id.as_str(), "B3");
//! assert!(CellId::parse("b3").is_none());
//! assert_eq!(CellId::from_reference("b3").unwrap().as_str(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Canonical identifier of a cell in the store.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CellId(String);

impl CellId {
    /// Parse a canonical cell id. Returns None unless `name` matches `^[A-Z]\d+$`.
    pub fn parse(name: &str) -> Option<CellId> {
        if validate(name) {
            Some(CellId(name.to_string()))
        } else {
            None
        }
    }

    /// Interpret a formula token as a cell reference.
    /// Surrounding whitespace is ignored and the letter may be lowercase.
    pub fn from_reference(token: &str) -> Option<CellId> {
        let token = token.trim();
        if reference_re().is_match(token) {
            Some(CellId(token.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Column letter of the id.
    pub fn column(&self) -> char {
        self.0.chars().next().unwrap_or('A')
    }

    /// Row digits with leading zeros stripped (may be empty for "A0").
    fn row_digits(&self) -> &str {
        self.0[1..].trim_start_matches('0')
    }
}

/// Ids order by column, then numerically by row.
impl Ord for CellId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.row_digits(), other.row_digits());
        self.column()
            .cmp(&other.column())
            .then(a.len().cmp(&b.len()))
            .then(a.cmp(b))
            .then(self.0.cmp(&other.0))
    }
}

impl PartialOrd for CellId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// True iff `id` is a canonical cell id (`^[A-Z]\d+$`).
pub fn validate(id: &str) -> bool {
    cell_id_re().is_match(id)
}

fn cell_id_re() -> &'static Regex {
    static CELL_ID_RE: OnceLock<Regex> = OnceLock::new();
    CELL_ID_RE
        .get_or_init(|| Regex::new(r"^[A-Z][0-9]+$").expect("cell id regex must compile"))
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z][0-9]+$").expect("reference regex must compile"))
}

impl std::str::FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell id: {}", s))
    }
}

impl TryFrom<String> for CellId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if validate(&s) {
            Ok(CellId(s))
        } else {
            Err(format!("Invalid cell id: {}", s))
        }
    }
}

impl From<CellId> for String {
    fn from(id: CellId) -> String {
        id.0
    }
}

impl AsRef<str> for CellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
