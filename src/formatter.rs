//! Confluence wiki table rendering
//!
//! The table is transposed: each computer group is a column and the four
//! rows are the header, current, target, and percent complete. Every column
//! is padded to the width of its widest cell so the raw markup lines up.

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::models::Group;
use crate::report::Report;

const HEADER_PREFIX: &str = "|| Nodes       || ";
const CURRENT_PREFIX: &str = "| *Current*    | ";
const TARGET_PREFIX: &str = "| *Target*     | ";
const PERCENT_PREFIX: &str = "| *% Comp*     | ";

/// Format a number with `,` between each group of three digits
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Header cell: the group name padded to the column width
pub fn name_cell(group: &Group) -> String {
    pad(&group.name, group.widest())
}

pub fn current_cell(group: &Group) -> String {
    pad(&format_count(u64::from(group.current)), group.widest() + 1)
}

pub fn target_cell(group: &Group) -> String {
    pad(&format_count(u64::from(group.target)), group.widest() + 1)
}

/// Percent cell, bolded with `*` wiki markup
pub fn percent_cell(group: &Group) -> String {
    pad(&format!("*{}*", group.percent()), group.widest() + 1)
}

/// Render the four-line wiki table, TOTAL column included
pub fn render_table(report: &Report) -> String {
    let mut header = String::from(HEADER_PREFIX);
    let mut current = String::from(CURRENT_PREFIX);
    let mut target = String::from(TARGET_PREFIX);
    let mut percent = String::from(PERCENT_PREFIX);

    for group in report.rows() {
        header.push_str(&name_cell(&group));
        header.push_str(" || ");
        current.push_str(&current_cell(&group));
        current.push_str(" | ");
        target.push_str(&target_cell(&group));
        target.push_str(" | ");
        percent.push_str(&percent_cell(&group));
        percent.push_str(" | ");
    }

    format!("{}\n{}\n{}\n{}\n", header, current, target, percent)
}

/// Render the report rows as JSON, minified unless `pretty`
pub fn render_json(report: &Report, pretty: bool) -> Result<String> {
    let summaries = report.summaries();
    let json = if pretty {
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string(&summaries)?
    };
    Ok(json)
}
