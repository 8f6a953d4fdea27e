use contracts::shared::filter::ProjectFilters;
use leptos::prelude::*;

use crate::dashboards::department_summary::DepartmentSummaryTable;
use crate::dashboards::overview::OverviewCards;
use crate::dashboards::status_distribution::StatusDistribution;
use crate::dashboards::subcounty_summary::SubCountySummaryTable;
use crate::dashboards::ward_summary::WardSummaryTable;
use crate::dashboards::yearly_trends::YearlyTrendsTable;
use crate::shared::components::filter_bar::FilterBar;

/// The dashboard page.
///
/// Owns the combined filter state. The `FilterBar` is the only component
/// with write access; every summary panel receives a read-only signal and
/// re-fetches (under its own stale-response guard) when the complete filter
/// object changes.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let filters = RwSignal::new(ProjectFilters::new());
    let read_filters: Signal<ProjectFilters> = filters.into();

    view! {
        <div class="dashboard-page">
            <FilterBar filters=filters />
            <OverviewCards filters=read_filters />
            <StatusDistribution filters=read_filters />
            <DepartmentSummaryTable filters=read_filters />
            <div class="dashboard-page__split">
                <SubCountySummaryTable filters=read_filters />
                <WardSummaryTable filters=read_filters />
            </div>
            <YearlyTrendsTable filters=read_filters />
        </div>
    }
}
