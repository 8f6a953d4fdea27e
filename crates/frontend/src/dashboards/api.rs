//! Clients for the pre-aggregated statistics endpoints.
//!
//! Every call carries the complete combined filter object; the backend
//! scopes its GROUP BY queries accordingly.

use contracts::shared::filter::ProjectFilters;
use contracts::stats::{DepartmentStatRow, OverviewStats, SubCountyStatRow, WardStatRow};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url_with;

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_overview_stats(filters: &ProjectFilters) -> Result<OverviewStats, String> {
    get_json(&api_url_with("/stats/overview", &filters.query_params())).await
}

pub async fn get_department_stats(
    filters: &ProjectFilters,
) -> Result<Vec<DepartmentStatRow>, String> {
    get_json(&api_url_with("/stats/by-department", &filters.query_params())).await
}

pub async fn get_subcounty_stats(
    filters: &ProjectFilters,
) -> Result<Vec<SubCountyStatRow>, String> {
    get_json(&api_url_with("/stats/by-subcounty", &filters.query_params())).await
}

pub async fn get_ward_stats(filters: &ProjectFilters) -> Result<Vec<WardStatRow>, String> {
    get_json(&api_url_with("/stats/by-ward", &filters.query_params())).await
}

/// Overview stats pinned to one financial year, for the yearly trends
/// table. Geography/search filters still apply; the year in `filters` is
/// overridden.
pub async fn get_overview_stats_for_year(
    filters: &ProjectFilters,
    fin_year_id: &str,
) -> Result<OverviewStats, String> {
    let mut params: Vec<(&'static str, String)> = filters
        .query_params()
        .into_iter()
        .filter(|(key, _)| *key != "finYearId")
        .collect();
    params.insert(0, ("finYearId", fin_year_id.to_string()));
    get_json(&api_url_with("/stats/overview", &params)).await
}
