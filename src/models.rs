//! Core data models for bfstats
//!
//! A [`Group`] is one column of the rendered wiki table: a computer group
//! with its observed and expected deployment counts.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::formatter::format_count;

/// Name of the synthetic summary group appended after all others
pub const TOTAL_NAME: &str = "TOTAL";

/// A computer group and its deployment progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Group name as it appears in the target file
    pub name: String,
    /// Observed deployment count
    pub current: u32,
    /// Expected deployment count
    pub target: u32,
}

impl Group {
    pub fn new(name: impl Into<String>, current: u32, target: u32) -> Self {
        Self {
            name: name.into(),
            current,
            target,
        }
    }

    /// Percent complete, rounded half away from zero
    ///
    /// Returns 0 when the target is 0. Over-deployed groups report more than 100.
    pub fn percent(&self) -> u64 {
        if self.target == 0 {
            return 0;
        }
        (f64::from(self.current) / f64::from(self.target) * 100.0).round() as u64
    }

    /// Display width of the widest cell in this group's column
    ///
    /// The percent cell is rendered as `*N*`, hence the extra 2.
    pub fn widest(&self) -> usize {
        [
            self.name.width(),
            format_count(u64::from(self.current)).width(),
            format_count(u64::from(self.target)).width(),
            self.percent().to_string().width() + 2,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// A group as written to JSON output, with its percent resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub current: u32,
    pub target: u32,
    pub percent: u64,
}

impl From<&Group> for GroupSummary {
    fn from(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            current: group.current,
            target: group.target,
            percent: group.percent(),
        }
    }
}
