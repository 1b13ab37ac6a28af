//! Target file loading
//!
//! The target file lists one computer group per line as `name,target`.
//! Only the first delimiter splits a line; everything after it is the count.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load `(group, target)` pairs from a delimited file, in file order
pub fn load_targets(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<(String, u32)>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open target file: {}", path.display()))?;

    let targets = parse_targets(file, delimiter)
        .with_context(|| format!("failed to read target file: {}", path.display()))?;

    log::info!("Loaded {} target groups from {}", targets.len(), path.display());
    Ok(targets)
}

/// Parse `(group, target)` pairs from any reader
///
/// Blank lines are ignored. Lines without a delimiter or with a
/// non-numeric target are skipped with a warning. Quotes are literal text and
/// bytes that are not UTF-8 are replaced, so one bad line never hides the rest.
pub fn parse_targets<R: Read>(reader: R, delimiter: u8) -> Result<Vec<(String, u32)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .quoting(false)
        .from_reader(reader);

    let separator = char::from(delimiter).to_string();
    let mut targets = Vec::new();

    for record in reader.byte_records() {
        let record = record.context("failed to parse target record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }

        let fields: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        let (name, rest) = match fields.split_first() {
            Some((name, rest)) => (&**name, rest),
            None => continue,
        };

        if rest.is_empty() {
            log::warn!("Skipping target line {}: no delimiter after '{}'", line, name);
            continue;
        }

        let raw = rest.join(separator.as_str());
        match raw.trim().parse::<u32>() {
            Ok(target) => targets.push((name.to_string(), target)),
            Err(e) => {
                log::warn!("Skipping target line {}: invalid target '{}': {}", line, raw, e);
            }
        }
    }

    Ok(targets)
}
