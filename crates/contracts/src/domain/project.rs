//! Project rows as served by the `/projects` endpoint.

use serde::{Deserialize, Serialize};

use crate::enums::project_status::ProjectStatus;
use crate::shared::numeric;

/// One project as returned by the projects-list endpoint.
///
/// Owned entirely by the backend; the client never mutates these fields and
/// never sends them back upstream. Anything derived for presentation
/// (canonical status, chip colors) is computed on the fly from accessors.
///
/// Field names follow the endpoint's snake_case spellings with camelCase
/// aliases, because the admin and public endpoints disagree on several
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,

    #[serde(rename = "project_name", alias = "projectName", default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(
        rename = "department_id",
        alias = "departmentId",
        deserialize_with = "numeric::id_string",
        default
    )]
    pub department_id: Option<String>,

    #[serde(rename = "department_name", alias = "departmentName", default)]
    pub department_name: Option<String>,

    #[serde(
        rename = "subcounty_id",
        alias = "subcountyId",
        deserialize_with = "numeric::id_string",
        default
    )]
    pub subcounty_id: Option<String>,

    #[serde(rename = "subcounty_name", alias = "subcountyName", default)]
    pub subcounty_name: Option<String>,

    #[serde(
        rename = "ward_id",
        alias = "wardId",
        deserialize_with = "numeric::id_string",
        default
    )]
    pub ward_id: Option<String>,

    #[serde(rename = "ward_name", alias = "wardName", default)]
    pub ward_name: Option<String>,

    #[serde(
        rename = "finYearId",
        alias = "fin_year_id",
        deserialize_with = "numeric::id_string",
        default
    )]
    pub fin_year_id: Option<String>,

    /// Display label of the financial year ("FY2023/2024").
    #[serde(rename = "financialYear", alias = "fin_year_name", default)]
    pub financial_year: Option<String>,

    /// Raw status string; free text under backend control. Use
    /// [`ProjectRecord::canonical_status`] for any comparison or grouping.
    #[serde(default)]
    pub status: Option<String>,

    /// Monetary budget; number or numeric string on the wire, may be null.
    #[serde(deserialize_with = "numeric::flexible_amount", default)]
    pub budget: Option<f64>,

    #[serde(rename = "start_date", alias = "startDate", default)]
    pub start_date: Option<String>,

    #[serde(rename = "end_date", alias = "endDate", default)]
    pub end_date: Option<String>,

    /// 0-100, may be absent.
    #[serde(
        rename = "completionPercentage",
        alias = "overallProgress",
        deserialize_with = "numeric::flexible_amount",
        default
    )]
    pub completion_percentage: Option<f64>,

    #[serde(rename = "projectType", alias = "project_type", default)]
    pub project_type: Option<String>,

    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}

impl ProjectRecord {
    /// Canonical category for this record's raw status.
    pub fn canonical_status(&self) -> ProjectStatus {
        ProjectStatus::from_raw(self.status.as_deref())
    }

    /// Budget with null/invalid coerced to zero. Every rollup sum uses this
    /// accessor so counts and budgets always come from the same record set.
    pub fn budget_amount(&self) -> f64 {
        self.budget.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub total: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub page: u64,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub limit: u64,
    #[serde(rename = "totalPages", deserialize_with = "numeric::count_or_zero", default)]
    pub total_pages: u64,
}

/// Paginated `/projects` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsPage {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_public_endpoint_row() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": 17,
            "project_name": "Borehole drilling",
            "description": "Ward borehole",
            "budget": "1500000",
            "status": "In Progress",
            "start_date": "2023-09-01",
            "end_date": null,
            "completionPercentage": 40,
            "department_name": "Water",
            "financialYear": "FY2023/2024",
            "subcounty_name": "Nyando",
            "ward_name": "East Kolwa"
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("17"));
        assert_eq!(record.name, "Borehole drilling");
        assert_eq!(record.budget, Some(1500000.0));
        assert_eq!(record.canonical_status(), ProjectStatus::Ongoing);
        assert_eq!(record.completion_percentage, Some(40.0));
    }

    #[test]
    fn null_and_malformed_fields_degrade_quietly() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "project_name": "Unnamed",
            "budget": "pending allocation",
            "status": null
        }))
        .unwrap();

        assert_eq!(record.budget, None);
        assert_eq!(record.budget_amount(), 0.0);
        assert_eq!(record.canonical_status(), ProjectStatus::Other);
        assert_eq!(record.department_id, None);
    }

    #[test]
    fn camel_case_aliases_accepted() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "projectName": "Dispensary",
            "departmentId": "3",
            "subcountyId": 9,
            "startDate": "2022-01-01"
        }))
        .unwrap();

        assert_eq!(record.name, "Dispensary");
        assert_eq!(record.department_id.as_deref(), Some("3"));
        assert_eq!(record.subcounty_id.as_deref(), Some("9"));
        assert_eq!(record.start_date.as_deref(), Some("2022-01-01"));
    }

    #[test]
    fn projects_page_tolerates_missing_pagination() {
        let page: ProjectsPage =
            serde_json::from_value(json!({"projects": []})).unwrap();
        assert!(page.projects.is_empty());
        assert!(page.pagination.is_none());
    }
}
