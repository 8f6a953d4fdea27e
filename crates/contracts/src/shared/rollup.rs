//! Client-side aggregation over project rows.
//!
//! A rollup partitions a record set by one grouping key (department,
//! sub-county, ward, financial year or status), counts per canonical status
//! and sums budgets in a single pass over the same materialized records.
//! The grand total is then derived by summing the produced rows, never by a
//! second pass over the raw input, so a table body and its footer can never
//! disagree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::project::ProjectRecord;
use crate::enums::project_status::ProjectStatus;
use crate::stats::StatusCountRow;

/// Bucket id/label for records whose grouping key is missing.
///
/// Dropping such records would make group totals disagree with the overall
/// project count shown elsewhere on the page.
pub const UNASSIGNED_KEY: &str = "unassigned";
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Identity of one group: a stable id for fetches plus a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKey {
    pub id: String,
    pub label: String,
}

impl GroupKey {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    fn unassigned() -> Self {
        Self::new(UNASSIGNED_KEY, UNASSIGNED_LABEL)
    }
}

/// Project counts per canonical status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub completed: u64,
    pub ongoing: u64,
    pub not_started: u64,
    pub stalled: u64,
    pub under_procurement: u64,
    pub other: u64,
}

impl StatusBreakdown {
    pub fn record(&mut self, status: ProjectStatus) {
        self.add(status, 1);
    }

    pub fn add(&mut self, status: ProjectStatus, count: u64) {
        *self.slot(status) += count;
    }

    pub fn get(&self, status: ProjectStatus) -> u64 {
        match status {
            ProjectStatus::Completed => self.completed,
            ProjectStatus::Ongoing => self.ongoing,
            ProjectStatus::NotStarted => self.not_started,
            ProjectStatus::Stalled => self.stalled,
            ProjectStatus::UnderProcurement => self.under_procurement,
            ProjectStatus::Other => self.other,
        }
    }

    fn slot(&mut self, status: ProjectStatus) -> &mut u64 {
        match status {
            ProjectStatus::Completed => &mut self.completed,
            ProjectStatus::Ongoing => &mut self.ongoing,
            ProjectStatus::NotStarted => &mut self.not_started,
            ProjectStatus::Stalled => &mut self.stalled,
            ProjectStatus::UnderProcurement => &mut self.under_procurement,
            ProjectStatus::Other => &mut self.other,
        }
    }

    pub fn total(&self) -> u64 {
        ProjectStatus::all().iter().map(|s| self.get(*s)).sum()
    }

    fn merge(&mut self, other: &StatusBreakdown) {
        for status in ProjectStatus::all() {
            self.add(status, other.get(status));
        }
    }
}

/// One aggregated row: a grouping key with its status counts and budget sum.
///
/// The total count is derived from the breakdown rather than stored, so
/// `total_count == sum(per-status counts)` holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub statuses: StatusBreakdown,
    pub total_budget: f64,
}

impl AggregateRow {
    fn empty(key: GroupKey) -> Self {
        Self {
            key,
            statuses: StatusBreakdown::default(),
            total_budget: 0.0,
        }
    }

    pub fn total_count(&self) -> u64 {
        self.statuses.total()
    }
}

/// Result of one rollup pass: per-group rows in first-seen order plus the
/// grand total summed from those rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
    pub rows: Vec<AggregateRow>,
    pub total: AggregateRow,
}

impl Rollup {
    /// Stable secondary sort by descending project count. First-seen order
    /// is preserved among equal counts, keeping re-renders flicker-free.
    pub fn sort_rows_by_count_desc(&mut self) {
        self.rows
            .sort_by(|a, b| b.total_count().cmp(&a.total_count()));
    }
}

/// Partition `records` by `key_fn` and aggregate each group in one pass.
///
/// Records with no key land in the "Unassigned" bucket. An empty input
/// yields no rows and a zero grand total.
pub fn rollup<F>(records: &[ProjectRecord], key_fn: F) -> Rollup
where
    F: Fn(&ProjectRecord) -> Option<GroupKey>,
{
    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = key_fn(record).unwrap_or_else(GroupKey::unassigned);
        let slot = *index.entry(key.id.clone()).or_insert_with(|| {
            rows.push(AggregateRow::empty(key));
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.statuses.record(record.canonical_status());
        row.total_budget += record.budget_amount();
    }

    let mut total = AggregateRow::empty(GroupKey::new("total", "Total"));
    for row in &rows {
        total.statuses.merge(&row.statuses);
        total.total_budget += row.total_budget;
    }

    Rollup { rows, total }
}

/// Key functions for the standard grouping dimensions.
pub fn by_department(record: &ProjectRecord) -> Option<GroupKey> {
    key_from(record.department_id.as_deref(), record.department_name.as_deref())
}

pub fn by_subcounty(record: &ProjectRecord) -> Option<GroupKey> {
    key_from(record.subcounty_id.as_deref(), record.subcounty_name.as_deref())
}

pub fn by_ward(record: &ProjectRecord) -> Option<GroupKey> {
    key_from(record.ward_id.as_deref(), record.ward_name.as_deref())
}

pub fn by_financial_year(record: &ProjectRecord) -> Option<GroupKey> {
    key_from(record.fin_year_id.as_deref(), record.financial_year.as_deref())
}

/// Groups by canonical status; never yields `None` because normalization is
/// total.
pub fn by_status(record: &ProjectRecord) -> Option<GroupKey> {
    let status = record.canonical_status();
    Some(GroupKey::new(format!("status:{}", status.label()), status.label()))
}

/// Some rows only carry a display name (the projects endpoint joins names,
/// not ids, for geography). Fall back to the name as the key so those rows
/// still group correctly instead of all landing in "Unassigned".
fn key_from(id: Option<&str>, name: Option<&str>) -> Option<GroupKey> {
    let name = name.filter(|n| !n.trim().is_empty());
    match (id, name) {
        (Some(id), Some(name)) => Some(GroupKey::new(id, name)),
        (Some(id), None) => Some(GroupKey::new(id, id)),
        (None, Some(name)) => Some(GroupKey::new(name, name)),
        (None, None) => None,
    }
}

/// Re-normalize backend per-raw-status count rows, merging legacy synonyms
/// into their canonical buckets. Result is ordered by descending count with
/// first-seen order as the tie-break.
pub fn merge_status_counts(rows: &[StatusCountRow]) -> Vec<(ProjectStatus, u64)> {
    let mut order: Vec<ProjectStatus> = Vec::new();
    let mut counts: HashMap<ProjectStatus, u64> = HashMap::new();

    for row in rows {
        let status = ProjectStatus::from_raw(row.status.as_deref());
        if !counts.contains_key(&status) {
            order.push(status);
        }
        *counts.entry(status).or_insert(0) += row.count;
    }

    let mut merged: Vec<(ProjectStatus, u64)> =
        order.into_iter().map(|s| (s, counts[&s])).collect();
    merged.sort_by(|a, b| b.1.cmp(&a.1));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(dept: Option<&str>, status: &str, budget: serde_json::Value) -> ProjectRecord {
        serde_json::from_value(json!({
            "project_name": "p",
            "department_name": dept,
            "status": status,
            "budget": budget
        }))
        .unwrap()
    }

    #[test]
    fn groups_by_department_with_mixed_budget_types() {
        // The worked scenario: two Water rows (string + null budget), one
        // Health row with an upper-cased legacy status.
        let records = vec![
            record(Some("Water"), "ongoing", json!("1000000")),
            record(Some("Water"), "Completed", json!(null)),
            record(Some("Health"), "STALLED", json!(2000000)),
        ];

        let result = rollup(&records, by_department);

        assert_eq!(result.rows.len(), 2);
        let water = &result.rows[0];
        assert_eq!(water.key.label, "Water");
        assert_eq!(water.total_count(), 2);
        assert_eq!(water.statuses.ongoing, 1);
        assert_eq!(water.statuses.completed, 1);
        assert_eq!(water.total_budget, 1000000.0);

        let health = &result.rows[1];
        assert_eq!(health.total_count(), 1);
        assert_eq!(health.statuses.stalled, 1);
        assert_eq!(health.total_budget, 2000000.0);

        assert_eq!(result.total.total_count(), 3);
        assert_eq!(result.total.total_budget, 3000000.0);
    }

    #[test]
    fn grand_total_reconciles_with_per_group_rows() {
        let records: Vec<ProjectRecord> = (0..25)
            .map(|i| {
                record(
                    Some(["A", "B", "C"][i % 3]),
                    ["Completed", "Ongoing", "banana", "At Risk"][i % 4],
                    json!(i as f64 * 1000.0),
                )
            })
            .collect();

        let result = rollup(&records, by_department);

        let row_count: u64 = result.rows.iter().map(|r| r.total_count()).sum();
        let row_budget: f64 = result.rows.iter().map(|r| r.total_budget).sum();
        assert_eq!(result.total.total_count(), row_count);
        assert_eq!(result.total.total_budget, row_budget);

        // Same law against the raw input.
        assert_eq!(row_count, records.len() as u64);
        let input_budget: f64 = records.iter().map(|r| r.budget_amount()).sum();
        assert_eq!(result.total.total_budget, input_budget);
    }

    #[test]
    fn missing_key_goes_to_unassigned_not_dropped() {
        let records = vec![
            record(Some("Water"), "Ongoing", json!(100)),
            record(None, "Ongoing", json!(50)),
            record(None, "Completed", json!(null)),
        ];

        let result = rollup(&records, by_department);

        assert_eq!(result.rows.len(), 2);
        let unassigned = &result.rows[1];
        assert_eq!(unassigned.key.id, UNASSIGNED_KEY);
        assert_eq!(unassigned.key.label, UNASSIGNED_LABEL);
        assert_eq!(unassigned.total_count(), 2);
        assert_eq!(result.total.total_count(), 3);
    }

    #[test]
    fn empty_input_yields_zero_total_not_absence() {
        let result = rollup(&[], by_department);
        assert!(result.rows.is_empty());
        assert_eq!(result.total.total_count(), 0);
        assert_eq!(result.total.total_budget, 0.0);
    }

    #[test]
    fn insertion_order_preserved_and_secondary_sort_is_stable() {
        let records = vec![
            record(Some("Roads"), "Ongoing", json!(1)),
            record(Some("Water"), "Ongoing", json!(1)),
            record(Some("Health"), "Ongoing", json!(1)),
            record(Some("Water"), "Completed", json!(1)),
        ];

        let mut result = rollup(&records, by_department);
        let labels: Vec<&str> = result.rows.iter().map(|r| r.key.label.as_str()).collect();
        assert_eq!(labels, vec!["Roads", "Water", "Health"]);

        result.sort_rows_by_count_desc();
        let labels: Vec<&str> = result.rows.iter().map(|r| r.key.label.as_str()).collect();
        // Water leads with 2; Roads and Health tie at 1 and keep first-seen
        // order.
        assert_eq!(labels, vec!["Water", "Roads", "Health"]);
    }

    #[test]
    fn by_status_grouping_normalizes_first() {
        let records = vec![
            record(Some("W"), "In Progress", json!(10)),
            record(Some("W"), "ongoing", json!(5)),
            record(Some("W"), "mystery", json!(1)),
        ];
        let result = rollup(&records, by_status);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].key.label, "Ongoing");
        assert_eq!(result.rows[0].total_count(), 2);
        assert_eq!(result.rows[1].key.label, "Other");
    }

    #[test]
    fn geography_and_year_keys_fall_back_to_names() {
        // The projects endpoint joins display names but not always ids;
        // such rows must still group rather than land in "Unassigned".
        let by_name: ProjectRecord = serde_json::from_value(json!({
            "project_name": "p",
            "ward_name": "Central",
            "financialYear": "FY2023/2024",
            "status": "Ongoing"
        }))
        .unwrap();
        let by_id: ProjectRecord = serde_json::from_value(json!({
            "project_name": "q",
            "ward_id": 7,
            "finYearId": 5,
            "status": "Completed"
        }))
        .unwrap();

        let wards = rollup(&[by_name.clone(), by_id.clone()], by_ward);
        assert_eq!(wards.rows.len(), 2);
        assert_eq!(wards.rows[0].key.id, "Central");
        assert_eq!(wards.rows[1].key.id, "7");

        let years = rollup(&[by_name, by_id], by_financial_year);
        assert_eq!(years.rows[0].key.label, "FY2023/2024");
        assert_eq!(years.rows[1].key.id, "5");
        assert_eq!(years.total.total_count(), 2);
    }

    #[test]
    fn merge_status_counts_folds_legacy_rows_together() {
        let rows: Vec<StatusCountRow> = serde_json::from_value(json!([
            {"status": "Ongoing", "count": 5},
            {"status": "In Progress", "count": 3},
            {"status": "Completed", "count": 6},
            {"status": null, "count": 2}
        ]))
        .unwrap();

        let merged = merge_status_counts(&rows);
        assert_eq!(
            merged,
            vec![
                (ProjectStatus::Ongoing, 8),
                (ProjectStatus::Completed, 6),
                (ProjectStatus::Other, 2),
            ]
        );
    }
}
