//! Writer for .grd snapshot files

use crate::error::Result;
use cellstore_engine::engine::MemoryStore;
use std::fs;
use std::path::Path;

/// Write every record of a store to a .grd file
pub fn write_grd(path: &Path, store: &MemoryStore) -> Result<()> {
    let content = write_grd_content(store);
    fs::write(path, content)?;
    Ok(())
}

/// Write a store to a .grd format string, one record per line sorted by id.
/// Placeholders are kept (`B7:`) so referenced-but-unwritten cells survive a reload.
pub fn write_grd_content(store: &MemoryStore) -> String {
    let mut lines = vec!["# Cellstore Snapshot".to_string()];

    for record in store.records() {
        if record.content.is_empty() {
            lines.push(format!("{}:", record.id));
        } else {
            lines.push(format!("{}: {}", record.id, escape_grd_text(&record.content)));
        }
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
