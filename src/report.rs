//! Merging targets with current counts into a report

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Group, GroupSummary, TOTAL_NAME};

/// Adjustment applied to a group after targets and counts are merged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemapRule {
    /// Add the count of status group `source` to `group`, then rename it
    Merge {
        group: String,
        source: String,
        rename: String,
    },
    /// Set the target of `group` to its current count
    TargetFromCurrent { group: String },
}

impl RemapRule {
    /// Rules used when no configuration overrides them
    pub fn defaults() -> Vec<RemapRule> {
        vec![
            RemapRule::Merge {
                group: "OS".to_string(),
                source: "OS*".to_string(),
                rename: "OS*".to_string(),
            },
            RemapRule::TargetFromCurrent {
                group: "MBDA".to_string(),
            },
        ]
    }
}

/// Ordered collection of computer groups, one per target entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    groups: Vec<Group>,
}

impl Report {
    /// Merge targets (in file order) with the current count map and apply `rules`
    ///
    /// Groups present only in the status export are ignored; groups missing
    /// from it get a current count of 0. A repeated target name keeps its
    /// first position and takes the later target.
    pub fn build(
        targets: Vec<(String, u32)>,
        current: &HashMap<String, u32>,
        rules: &[RemapRule],
    ) -> Self {
        let mut report = Report::default();

        for (name, target) in targets {
            let count = current.get(&name).copied().unwrap_or(0);
            if let Some(existing) = report.find_mut(&name) {
                log::debug!("Duplicate target for '{}', using {}", name, target);
                existing.target = target;
                continue;
            }
            report.groups.push(Group::new(name, count, target));
        }

        for rule in rules {
            report.apply(rule, current);
        }

        report
    }

    fn apply(&mut self, rule: &RemapRule, current: &HashMap<String, u32>) {
        match rule {
            RemapRule::Merge { group, source, rename } => {
                let extra = current.get(source).copied().unwrap_or(0);
                if let Some(g) = self.find_mut(group) {
                    log::debug!("Merging '{}' ({}) into '{}' as '{}'", source, extra, group, rename);
                    g.current = g.current.saturating_add(extra);
                    g.name = rename.clone();
                }
            }
            RemapRule::TargetFromCurrent { group } => {
                if let Some(g) = self.find_mut(group) {
                    log::debug!("Setting target of '{}' to its current count {}", group, g.current);
                    g.target = g.current;
                }
            }
        }
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Groups in target-file order, without the TOTAL row
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Synthetic row summing current and target across all groups
    pub fn total(&self) -> Group {
        let (current, target) = self.groups.iter().fold((0u32, 0u32), |(c, t), g| {
            (c.saturating_add(g.current), t.saturating_add(g.target))
        });
        Group::new(TOTAL_NAME, current, target)
    }

    /// All groups followed by the TOTAL row
    pub fn rows(&self) -> Vec<Group> {
        let mut rows = self.groups.clone();
        rows.push(self.total());
        rows
    }

    /// Rows with resolved percentages, for JSON output
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.rows().iter().map(GroupSummary::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
        pairs.iter().map(|(n, t)| (n.to_string(), *t)).collect()
    }

    fn current(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    #[test]
    fn test_build_merges_by_name() {
        let report = Report::build(
            targets(&[("Servers", 100), ("Laptops", 50)]),
            &current(&[("Laptops", 25), ("Servers", 80), ("Unlisted", 9)]),
            &[],
        );
        assert_eq!(
            report.groups(),
            &[Group::new("Servers", 80, 100), Group::new("Laptops", 25, 50)]
        );
    }

    #[test]
    fn test_build_missing_current_is_zero() {
        let report = Report::build(targets(&[("Kiosks", 10)]), &HashMap::new(), &[]);
        assert_eq!(report.groups(), &[Group::new("Kiosks", 0, 10)]);
    }

    #[test]
    fn test_build_duplicate_target_keeps_position() {
        let report = Report::build(
            targets(&[("A", 1), ("B", 2), ("A", 3)]),
            &current(&[("A", 1)]),
            &[],
        );
        assert_eq!(report.groups(), &[Group::new("A", 1, 3), Group::new("B", 0, 2)]);
    }

    #[test]
    fn test_merge_rule() {
        let report = Report::build(
            targets(&[("OS", 200), ("Servers", 10)]),
            &current(&[("OS", 120), ("OS*", 30), ("Servers", 5)]),
            &RemapRule::defaults(),
        );
        assert_eq!(
            report.groups(),
            &[Group::new("OS*", 150, 200), Group::new("Servers", 5, 10)]
        );
    }

    #[test]
    fn test_target_from_current_rule() {
        let report = Report::build(
            targets(&[("MBDA", 999)]),
            &current(&[("MBDA", 42)]),
            &RemapRule::defaults(),
        );
        assert_eq!(report.groups(), &[Group::new("MBDA", 42, 42)]);
        assert_eq!(report.groups()[0].percent(), 100);
    }

    #[test]
    fn test_rules_ignore_absent_groups() {
        let report = Report::build(
            targets(&[("Servers", 10)]),
            &current(&[("OS", 5), ("OS*", 5), ("MBDA", 5)]),
            &RemapRule::defaults(),
        );
        assert_eq!(report.groups(), &[Group::new("Servers", 0, 10)]);
    }

    fn build_from_text(target_text: &str, status_text: &str) -> Vec<Group> {
        let targets = crate::targets::parse_targets(target_text.as_bytes(), b',').unwrap();
        let current =
            crate::status::parse_status(status_text.as_bytes(), &Default::default()).unwrap();
        let mut groups = Report::build(targets, &current, &RemapRule::defaults())
            .groups()
            .to_vec();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    #[test]
    fn test_rules_independent_of_input_order() {
        let forward = build_from_text(
            "OS,100\nMBDA,7\nServers,10\n",
            "<tr><td>OS*</td><td>20</td><td>Servers</td><td>4</td></tr>\n\
             <tr><td>OS</td><td>60</td></tr>\n\
             <tr><td>MBDA</td><td>3</td></tr>\n",
        );
        let reversed = build_from_text(
            "Servers,10\nMBDA,7\nOS,100\n",
            "<tr><td>MBDA</td><td>3</td></tr>\n\
             <tr><td>OS</td><td>60</td><td>OS*</td><td>20</td></tr>\n\
             <tr><td>Servers</td><td>4</td></tr>\n",
        );

        assert_eq!(forward, reversed);
        assert_eq!(
            forward,
            vec![
                Group::new("MBDA", 3, 3),
                Group::new("OS*", 80, 100),
                Group::new("Servers", 4, 10),
            ]
        );
    }

    #[test]
    fn test_total_sums_independently_of_percent() {
        // 1/3 (33%) and 1/1 (100%) average to 67%, but the total is 2/4 = 50%
        let report = Report::build(
            targets(&[("A", 3), ("B", 1)]),
            &current(&[("A", 1), ("B", 1)]),
            &[],
        );
        let total = report.total();
        assert_eq!(total, Group::new("TOTAL", 2, 4));
        assert_eq!(total.percent(), 50);
    }

    #[test]
    fn test_total_saturates() {
        let report = Report::build(
            targets(&[("A", u32::MAX), ("B", 1)]),
            &HashMap::new(),
            &[],
        );
        assert_eq!(report.total().target, u32::MAX);
    }

    #[test]
    fn test_rows_end_with_total() {
        let report = Report::build(targets(&[("A", 1)]), &current(&[("A", 1)]), &[]);
        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "TOTAL");
    }

    #[test]
    fn test_empty_report_has_zero_total() {
        let report = Report::build(Vec::new(), &HashMap::new(), &RemapRule::defaults());
        assert!(report.is_empty());
        assert_eq!(report.rows(), vec![Group::new("TOTAL", 0, 0)]);
    }
}
