//! User-facing output utilities for clean, colored terminal messages
//!
//! Diagnostics go to stderr so that stdout carries only the rendered table,
//! ready to paste into a Confluence page.

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow with padding
///
/// Format: blank line + yellow message + blank line
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Display an error message to the user in red with padding
///
/// Format: blank line + red message + blank line
///
/// # Example
/// ```ignore
/// output::error("Error: Could not open file targets.csv");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}
