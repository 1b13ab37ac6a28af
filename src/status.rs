//! Current deployment status parsing
//!
//! The status export is an HTML-like report where each data row sits on a
//! single line starting with a record marker, e.g.
//!
//! ```text
//! <tr class="row"><td>Servers</td><td>1,204</td><td>Laptops</td><td>88</td></tr>
//! ```
//!
//! Cells alternate between a computer group name and its count.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Tokens identifying data lines and cell boundaries in the status export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    /// Prefix a line must start with to carry data
    pub record: String,
    /// Token opening a cell
    pub cell_start: String,
    /// Token closing a cell
    pub cell_end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            record: "<tr".to_string(),
            cell_start: "<td>".to_string(),
            cell_end: "</td>".to_string(),
        }
    }
}

/// Load the group → current count map from a status export file
pub fn load_status(path: impl AsRef<Path>, markers: &Markers) -> Result<HashMap<String, u32>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open status file: {}", path.display()))?;

    let current = parse_status(BufReader::new(file), markers)
        .with_context(|| format!("failed to read status file: {}", path.display()))?;

    log::info!("Parsed {} computer groups from {}", current.len(), path.display());
    Ok(current)
}

/// Parse every record line of a status export
///
/// When a group appears more than once, the last count wins. Bytes that are
/// not UTF-8 are replaced rather than failing the file.
pub fn parse_status<R: BufRead>(mut reader: R, markers: &Markers) -> Result<HashMap<String, u32>> {
    let mut current = HashMap::new();
    let mut records = 0usize;

    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("failed to read line {}", line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if !line.starts_with(&markers.record) {
            continue;
        }
        records += 1;
        for (name, count) in parse_line(line, markers) {
            current.insert(name, count);
        }
    }

    log::debug!("Scanned {} record lines", records);
    Ok(current)
}

/// Extract `(group, count)` pairs from a single line
///
/// Returns nothing unless the line starts with the record marker. Pairs with
/// a missing delimiter or a non-numeric count are dropped.
pub fn parse_line(line: &str, markers: &Markers) -> Vec<(String, u32)> {
    let mut pairs = Vec::new();
    if !line.starts_with(&markers.record) {
        return pairs;
    }

    let mut pos = markers.record.len();
    while let Some((name, after_name)) = next_cell(line, pos, markers) {
        let Some((raw_count, after_count)) = next_cell(line, after_name, markers) else {
            log::debug!("Group '{}' has no count cell", name.trim());
            break;
        };
        if after_count <= pos {
            break;
        }
        pos = after_count;

        match parse_count(raw_count) {
            Some(count) => pairs.push((name.trim().to_string(), count)),
            None => log::debug!("Skipping group '{}': invalid count '{}'", name.trim(), raw_count),
        }
    }

    pairs
}

/// Find the next cell at or after `from`, returning its text and the offset past it
fn next_cell<'a>(line: &'a str, from: usize, markers: &Markers) -> Option<(&'a str, usize)> {
    let rest = line.get(from..)?;
    let start = from + rest.find(&markers.cell_start)? + markers.cell_start.len();
    let end = start + line[start..].find(&markers.cell_end)?;
    Some((&line[start..end], end + markers.cell_end.len()))
}

fn parse_count(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
