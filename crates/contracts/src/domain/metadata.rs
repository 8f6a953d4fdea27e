//! Metadata rows for the filter selectors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::numeric;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(alias = "departmentId", deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCounty {
    #[serde(alias = "subcountyId", deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ward {
    #[serde(alias = "wardId", deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,
    #[serde(alias = "ward_name", default)]
    pub name: String,
    /// Parent sub-county; drives the cascading ward selector.
    #[serde(
        rename = "subcountyId",
        alias = "subcounty_id",
        deserialize_with = "numeric::id_string",
        default
    )]
    pub subcounty_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialYear {
    #[serde(alias = "finYearId", deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,
    /// "FY2023/2024"
    #[serde(alias = "finYearName", default)]
    pub name: String,
    #[serde(rename = "startDate", alias = "start_date", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", alias = "end_date", default)]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "numeric::count_or_zero", default)]
    pub project_count: u64,
    #[serde(deserialize_with = "numeric::amount_or_zero", default)]
    pub total_budget: f64,
}

impl FinancialYear {
    /// Start date parsed from the ISO prefix, for chronological sorting.
    /// The backend orders years already; the dashboard re-sorts defensively.
    pub fn start(&self) -> Option<NaiveDate> {
        let raw = self.start_date.as_deref()?;
        let date_part = raw.split('T').next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectType {
    #[serde(alias = "categoryId", deserialize_with = "numeric::id_string", default)]
    pub id: Option<String>,
    #[serde(alias = "categoryName", default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ward_carries_parent_subcounty() {
        let ward: Ward = serde_json::from_value(json!({
            "id": 12, "name": "Ward-12", "subcountyId": 4
        }))
        .unwrap();
        assert_eq!(ward.subcounty_id.as_deref(), Some("4"));

        // Stats endpoints spell it snake_case.
        let ward: Ward = serde_json::from_value(json!({
            "wardId": "12", "ward_name": "Ward-12", "subcounty_id": "4"
        }))
        .unwrap();
        assert_eq!(ward.id.as_deref(), Some("12"));
        assert_eq!(ward.name, "Ward-12");
        assert_eq!(ward.subcounty_id.as_deref(), Some("4"));
    }

    #[test]
    fn financial_year_start_parses_iso_datetime() {
        let fy: FinancialYear = serde_json::from_value(json!({
            "id": 1,
            "name": "FY2017/2018",
            "startDate": "2017-07-01T00:00:00.000Z",
            "project_count": "12",
            "total_budget": "50000000"
        }))
        .unwrap();
        assert_eq!(fy.start(), NaiveDate::from_ymd_opt(2017, 7, 1));
        assert_eq!(fy.project_count, 12);
        assert_eq!(fy.total_budget, 50000000.0);

        let fy: FinancialYear =
            serde_json::from_value(json!({"id": 2, "name": "FY?", "startDate": "soon"})).unwrap();
        assert_eq!(fy.start(), None);
    }
}
