//! bfstats: BigFix deployment reports to Confluence wiki tables
//!
//! Reads a comma-delimited file of per-group deployment targets and a
//! BigFix web-report export of current deployment counts, merges them by
//! computer group, and renders a wiki table with current, target and
//! percent-complete rows plus a TOTAL column.
//!
//! # Architecture
//!
//! - **Targets**: `name,target` lines from the target file
//! - **Status**: record lines of the report export, scanned for cell delimiters
//! - **Report**: merge by group name, remap rules, TOTAL row
//! - **Formatter**: thousands separators, per-column padding, wiki markup
//!
//! # Example Usage
//!
//! ```no_run
//! use bfstats::{config::Config, formatter, report::Report, status, targets};
//!
//! let config = Config::default();
//! let targets = targets::load_targets("targets.csv", config.delimiter).unwrap();
//! let current = status::load_status("report.html", &config.markers).unwrap();
//! let report = Report::build(targets, &current, &config.rules);
//!
//! print!("{}", formatter::render_table(&report));
//! ```

pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod output;
pub mod report;
pub mod status;
pub mod targets;

// Re-export commonly used types
pub use config::Config;
pub use models::Group;
pub use report::{RemapRule, Report};
pub use status::Markers;
