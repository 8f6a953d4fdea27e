//! Drill-down from an aggregate row to its underlying projects.
//!
//! The modal performs its own, narrower fetch and recomputes every figure it
//! shows from that exact record set. Parent-table totals are never reused:
//! the two fetches can race a backend update, and each view must at least be
//! internally consistent until the next refresh.

pub mod api;

use contracts::domain::project::ProjectRecord;
use contracts::enums::project_status::ProjectStatus;
use contracts::shared::filter::FinYearSelection;
use contracts::shared::rollup::{self, GroupKey};
use contracts::shared::status_style;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::modal::Modal;
use crate::shared::components::status_chip::StatusChip;
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_currency, format_date, format_percentage};

/// The aggregate row a drill-down was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillDownScope {
    Department { id: String, name: String },
    SubCounty { id: String, name: String },
    Ward { id: String, name: String },
    FinancialYear { id: String, name: String },
}

impl DrillDownScope {
    pub fn title(&self) -> String {
        match self {
            DrillDownScope::Department { name, .. }
            | DrillDownScope::SubCounty { name, .. }
            | DrillDownScope::Ward { name, .. }
            | DrillDownScope::FinancialYear { name, .. } => name.clone(),
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            DrillDownScope::Department { .. } => "Department project portfolio",
            DrillDownScope::SubCounty { .. } => "Sub-county project portfolio",
            DrillDownScope::Ward { .. } => "Ward project portfolio",
            DrillDownScope::FinancialYear { .. } => "Financial year project portfolio",
        }
    }

    /// Secondary grouping dimension shown alongside the per-status summary.
    /// Geographic and yearly scopes break down by department; a department
    /// scope breaks down by sub-county.
    pub fn secondary_grouping(
        &self,
    ) -> (&'static str, fn(&ProjectRecord) -> Option<GroupKey>) {
        match self {
            DrillDownScope::Department { .. } => ("Sub-County", rollup::by_subcounty),
            DrillDownScope::SubCounty { .. }
            | DrillDownScope::Ward { .. }
            | DrillDownScope::FinancialYear { .. } => ("Department", rollup::by_department),
        }
    }
}

#[component]
pub fn DrillDownModal(
    scope: DrillDownScope,
    fin_year: FinYearSelection,
    on_close: Callback<()>,
) -> impl IntoView {
    let (state, set_state) = signal(FetchState::<Vec<ProjectRecord>>::Loading);
    let seq = RequestSeq::new();

    let load = {
        let scope = scope.clone();
        let fin_year = fin_year.clone();
        let seq = seq.clone();
        move || {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let scope = scope.clone();
            let fin_year = fin_year.clone();
            let seq = seq.clone();
            spawn_local(async move {
                let result = api::get_projects_for_scope(&scope, &fin_year).await;
                if !seq.is_current(ticket) {
                    // Superseded by a retry, or the modal closed meanwhile.
                    return;
                }
                match result {
                    Ok(projects) => set_state.set(FetchState::Loaded(projects)),
                    Err(err) => {
                        log::error!("Drill-down fetch failed: {}", err);
                        set_state.set(FetchState::Error(err));
                    }
                }
            });
        }
    };

    // Initial fetch; closing the modal cancels interest in the response.
    load();
    {
        let seq = seq.clone();
        on_cleanup(move || seq.invalidate());
    }

    let retry = {
        let load = load.clone();
        move |_| load()
    };

    let secondary = scope.secondary_grouping();

    view! {
        <Modal title=scope.title() subtitle=scope.subtitle().to_string() on_close=on_close>
            {move || match state.get() {
                FetchState::Loading => view! {
                    <div class="drilldown__loading">
                        <span class="spinner"></span>
                        <span>"Loading projects..."</span>
                    </div>
                }
                .into_any(),
                FetchState::Error(err) => {
                    let retry = retry.clone();
                    view! {
                        <div class="alert alert--error drilldown__error">
                            <span>"Failed to load projects: " {err}</span>
                            <button class="button button--small" on:click=retry>
                                "Retry"
                            </button>
                        </div>
                    }
                    .into_any()
                }
                FetchState::Loaded(projects) if projects.is_empty() => view! {
                    <div class="drilldown__empty">
                        <p>"No projects found"</p>
                        <span>"There are no projects recorded for this selection."</span>
                    </div>
                }
                .into_any(),
                FetchState::Loaded(projects) => {
                    view! { <DrillDownContent projects=projects secondary=secondary /> }
                        .into_any()
                }
            }}
        </Modal>
    }
}

#[component]
fn DrillDownContent(
    projects: Vec<ProjectRecord>,
    secondary: (&'static str, fn(&ProjectRecord) -> Option<GroupKey>),
) -> impl IntoView {
    // All figures below come from this one record set, in one pass each.
    let by_status = rollup::rollup(&projects, rollup::by_status);
    let mut by_secondary = rollup::rollup(&projects, secondary.1);
    by_secondary.sort_rows_by_count_desc();
    let (secondary_label, _) = secondary;

    let status_cells: Vec<_> = ProjectStatus::all()
        .into_iter()
        .filter_map(|status| {
            let count = by_status.total.statuses.get(status);
            if count == 0 {
                return None;
            }
            let swatch = format!(
                "background-color: {};",
                status_style::color_for_status(status)
            );
            Some(view! {
                <div class="drilldown__status-cell">
                    <span class="drilldown__status-swatch" style=swatch></span>
                    <span class="drilldown__status-count">{format_count(Some(count as f64))}</span>
                    <span class="drilldown__status-label">{status.label()}</span>
                </div>
            })
        })
        .collect();

    let secondary_rows: Vec<_> = by_secondary
        .rows
        .iter()
        .map(|row| {
            view! {
                <tr>
                    <td>{row.key.label.clone()}</td>
                    <td class="num">{format_count(Some(row.total_count() as f64))}</td>
                    <td class="num">{format_currency(Some(row.total_budget))}</td>
                </tr>
            }
        })
        .collect();

    let project_rows: Vec<_> = projects
        .iter()
        .map(|project| {
            let status = project.status.clone().unwrap_or_default();
            view! {
                <tr>
                    <td class="drilldown__project-name">{project.name.clone()}</td>
                    <td><StatusChip status=status /></td>
                    <td class="num">{format_currency(project.budget)}</td>
                    <td>{format_date(project.start_date.as_deref())}</td>
                    <td class="num">{format_percentage(project.completion_percentage)}</td>
                </tr>
            }
        })
        .collect();

    view! {
        <div class="drilldown">
            <div class="drilldown__summary">
                <div class="drilldown__totals">
                    <div>
                        <span class="drilldown__totals-value">
                            {format_count(Some(by_status.total.total_count() as f64))}
                        </span>
                        <span class="drilldown__totals-label">"Projects"</span>
                    </div>
                    <div>
                        <span class="drilldown__totals-value">
                            {format_currency(Some(by_status.total.total_budget))}
                        </span>
                        <span class="drilldown__totals-label">"Total Budget"</span>
                    </div>
                </div>
                <div class="drilldown__status-strip">{status_cells}</div>
            </div>

            <h3 class="drilldown__section-title">"By " {secondary_label}</h3>
            <table class="data-table data-table--compact">
                <thead>
                    <tr>
                        <th>{secondary_label}</th>
                        <th class="num">"Projects"</th>
                        <th class="num">"Budget"</th>
                    </tr>
                </thead>
                <tbody>{secondary_rows}</tbody>
            </table>

            <h3 class="drilldown__section-title">"Projects"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Project"</th>
                        <th>"Status"</th>
                        <th class="num">"Budget"</th>
                        <th>"Start Date"</th>
                        <th class="num">"Progress"</th>
                    </tr>
                </thead>
                <tbody>{project_rows}</tbody>
            </table>
        </div>
    }
}
