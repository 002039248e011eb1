//! Parser for .grd snapshot files

use crate::error::{CellstoreError, Result};
use cellstore_engine::engine::CellId;
use std::fs;
use std::path::Path;

/// One `ID: content` line of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotEntry {
    pub line: usize,
    pub id: CellId,
    pub content: String,
}

/// Parse a .grd file into its entries, in file order
pub fn parse_grd(path: &Path) -> Result<Vec<SnapshotEntry>> {
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<Vec<SnapshotEntry>> {
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        // Skip empty lines and comments
        let leading = line.trim_start();
        if leading.is_empty() || leading.starts_with('#') {
            continue;
        }

        let Some((id_str, value_str)) = leading.split_once(':') else {
            return Err(CellstoreError::Parse {
                line: line_num + 1,
                message: "Expected 'ID: CONTENT' format".to_string(),
            });
        };

        let id_str = id_str.trim();
        let id = CellId::parse(id_str).ok_or_else(|| CellstoreError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell id: {}", id_str),
        })?;

        entries.push(SnapshotEntry {
            line: line_num + 1,
            id,
            // Only the separator space is dropped; content whitespace is kept.
            content: unescape_grd_text(value_str.strip_prefix(' ').unwrap_or(value_str)),
        });
    }

    Ok(entries)
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
