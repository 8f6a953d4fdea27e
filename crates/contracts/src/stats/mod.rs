//! Pre-aggregated statistics rows from the `/stats/*` endpoints.
//!
//! The backend groups and counts per department / sub-county / ward for the
//! selected financial year; the client re-derives anything it displays
//! together (totals rows, drill-down summaries) so that a single screen
//! never mixes numbers from two different fetches.

use serde::{Deserialize, Serialize};

use crate::shared::numeric;

/// Per-status counts as the stats endpoints break them out.
///
/// These counters are matched server-side against the current vocabulary
/// only; rows carrying legacy statuses surface in `total_projects` but in
/// none of the per-status columns, which is why drill-downs re-aggregate
/// client-side through the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusColumns {
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub completed_projects: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub ongoing_projects: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub stalled_projects: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub not_started_projects: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub under_procurement_projects: u64,
}

impl StatusColumns {
    /// Accumulate another row's counters (table footers sum the displayed
    /// rows, never a second fetch).
    pub fn merge(&mut self, other: &StatusColumns) {
        self.completed_projects += other.completed_projects;
        self.ongoing_projects += other.ongoing_projects;
        self.stalled_projects += other.stalled_projects;
        self.not_started_projects += other.not_started_projects;
        self.under_procurement_projects += other.under_procurement_projects;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStatRow {
    #[serde(deserialize_with = "numeric::id_string", default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub department_name: String,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub total_projects: u64,
    #[serde(deserialize_with = "numeric::amount_or_zero", default)]
    pub total_budget: f64,
    #[serde(flatten)]
    pub statuses: StatusColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCountyStatRow {
    #[serde(deserialize_with = "numeric::id_string", default)]
    pub subcounty_id: Option<String>,
    #[serde(default)]
    pub subcounty_name: String,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub total_projects: u64,
    #[serde(deserialize_with = "numeric::amount_or_zero", default)]
    pub total_budget: f64,
    #[serde(flatten)]
    pub statuses: StatusColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardStatRow {
    #[serde(deserialize_with = "numeric::id_string", default)]
    pub ward_id: Option<String>,
    #[serde(default)]
    pub ward_name: String,
    /// Parent sub-county, used to scope the ward table and ward selector.
    #[serde(deserialize_with = "numeric::id_string", default)]
    pub subcounty_id: Option<String>,
    #[serde(default)]
    pub subcounty_name: Option<String>,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub total_projects: u64,
    #[serde(deserialize_with = "numeric::amount_or_zero", default)]
    pub total_budget: f64,
    #[serde(flatten)]
    pub statuses: StatusColumns,
}

/// County-wide totals from `/stats/overview`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub total_projects: u64,
    #[serde(deserialize_with = "numeric::amount_or_zero", default)]
    pub total_budget: f64,
    #[serde(flatten)]
    pub statuses: StatusColumns,
}

/// One raw-status count row, as chart endpoints emit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCountRow {
    #[serde(alias = "name", default)]
    pub status: Option<String>,
    #[serde(alias = "value", deserialize_with = "numeric::count_or_zero", default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn department_row_matches_endpoint_shape() {
        let row: DepartmentStatRow = serde_json::from_value(json!({
            "department_id": 3,
            "department_name": "Water",
            "total_projects": "14",
            "total_budget": "52000000.00",
            "completed_projects": 6,
            "ongoing_projects": 5,
            "stalled_projects": 1,
            "not_started_projects": 2,
            "under_procurement_projects": 0
        }))
        .unwrap();

        assert_eq!(row.department_id.as_deref(), Some("3"));
        assert_eq!(row.total_projects, 14);
        assert_eq!(row.total_budget, 52000000.0);
        assert_eq!(row.statuses.completed_projects, 6);
    }

    #[test]
    fn missing_status_columns_default_to_zero() {
        let row: WardStatRow = serde_json::from_value(json!({
            "ward_id": "7",
            "ward_name": "Central",
            "subcounty_id": "2",
            "total_projects": 3,
            "total_budget": null
        }))
        .unwrap();
        assert_eq!(row.total_budget, 0.0);
        assert_eq!(row.statuses, StatusColumns::default());
    }

    #[test]
    fn status_count_row_accepts_chart_spellings() {
        let row: StatusCountRow =
            serde_json::from_value(json!({"name": "In Progress", "value": 4})).unwrap();
        assert_eq!(row.status.as_deref(), Some("In Progress"));
        assert_eq!(row.count, 4);
    }
}
