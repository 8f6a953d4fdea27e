use contracts::domain::project::{ProjectRecord, ProjectsPage};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url_with;
use contracts::shared::filter::FinYearSelection;

use super::DrillDownScope;

/// Page size for drill-down fetches. Aggregate rows top out far below this;
/// the backend caps harder if asked for more.
const DRILLDOWN_LIMIT: &str = "2000";

/// Fetch the full project list behind one aggregate row.
///
/// The scope key plus the active financial year are the only parameters:
/// the modal re-derives its own statistics from this exact record set, so
/// it must be the same set the user believes they clicked on.
pub async fn get_projects_for_scope(
    scope: &DrillDownScope,
    fin_year: &FinYearSelection,
) -> Result<Vec<ProjectRecord>, String> {
    let mut params: Vec<(&'static str, String)> = Vec::new();
    match scope {
        DrillDownScope::Department { id, .. } => params.push(("departmentId", id.clone())),
        DrillDownScope::SubCounty { id, .. } => params.push(("subCountyId", id.clone())),
        DrillDownScope::Ward { id, .. } => params.push(("wardId", id.clone())),
        DrillDownScope::FinancialYear { id, .. } => params.push(("finYearId", id.clone())),
    }
    // A year-scoped drill-down already pins finYearId; for the others the
    // active selection narrows the fetch to what the summary table showed.
    if !matches!(scope, DrillDownScope::FinancialYear { .. }) {
        if let Some(id) = fin_year.id() {
            params.push(("finYearId", id.to_string()));
        }
    }
    params.push(("limit", DRILLDOWN_LIMIT.to_string()));

    let response = Request::get(&api_url_with("/projects", &params))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let page: ProjectsPage = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(page.projects)
}
