use contracts::domain::metadata::{Department, FinancialYear, ProjectType, SubCounty, Ward};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, api_url_with};

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

pub async fn get_departments() -> Result<Vec<Department>, String> {
    get_json(&api_url("/metadata/departments")).await
}

pub async fn get_subcounties() -> Result<Vec<SubCounty>, String> {
    get_json(&api_url("/metadata/subcounties")).await
}

pub async fn get_financial_years() -> Result<Vec<FinancialYear>, String> {
    get_json(&api_url("/financial-years")).await
}

pub async fn get_project_types() -> Result<Vec<ProjectType>, String> {
    get_json(&api_url("/metadata/project-types")).await
}

/// Ward options scoped to one sub-county. Called on every sub-county
/// transition; never with an empty id (the selector is disabled then).
pub async fn get_wards_for_subcounty(subcounty_id: &str) -> Result<Vec<Ward>, String> {
    get_json(&api_url_with(
        "/metadata/wards",
        &[("subCountyId", subcounty_id.to_string())],
    ))
    .await
}
