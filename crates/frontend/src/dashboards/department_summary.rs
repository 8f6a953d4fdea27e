//! Summary of projects per department for the active filter selection.

use contracts::shared::filter::ProjectFilters;
use contracts::stats::{DepartmentStatRow, StatusColumns};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::api;
use crate::drilldown::{DrillDownModal, DrillDownScope};
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_currency};

fn totals(rows: &[DepartmentStatRow]) -> (u64, f64, StatusColumns) {
    let mut statuses = StatusColumns::default();
    let mut projects = 0u64;
    let mut budget = 0.0f64;
    for row in rows {
        projects += row.total_projects;
        budget += row.total_budget;
        statuses.merge(&row.statuses);
    }
    (projects, budget, statuses)
}

#[component]
pub fn DepartmentSummaryTable(#[prop(into)] filters: Signal<ProjectFilters>) -> impl IntoView {
    let (state, set_state) = signal(FetchState::<Vec<DepartmentStatRow>>::Loading);
    let (drill, set_drill) = signal(None::<DrillDownScope>);
    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |snapshot: ProjectFilters| {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let seq = seq.clone();
            spawn_local(async move {
                let result = api::get_department_stats(&snapshot).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(rows) => set_state.set(FetchState::Loaded(rows)),
                    Err(err) => {
                        log::error!("Failed to load department stats: {}", err);
                        set_state.set(FetchState::Error(err));
                    }
                }
            });
        }
    };

    // Re-fetch whenever the combined filter object changes.
    Effect::new({
        let load = load.clone();
        move |_| load(filters.get())
    });

    let retry = {
        let load = load.clone();
        move |_| load(filters.get_untracked())
    };

    view! {
        <section class="summary-panel">
            <h2 class="summary-panel__title">"Projects by Department"</h2>
            {move || match state.get() {
                FetchState::Loading => view! {
                    <div class="summary-panel__loading">
                        <span class="spinner"></span>
                    </div>
                }
                .into_any(),
                FetchState::Error(err) => {
                    let retry = retry.clone();
                    view! {
                        <div class="alert alert--error">
                            <span>"Failed to load department summary: " {err}</span>
                            <button class="button button--small" on:click=retry>"Retry"</button>
                        </div>
                    }
                    .into_any()
                }
                FetchState::Loaded(rows) if rows.is_empty() => view! {
                    <p class="summary-panel__empty">"No projects match the current filters."</p>
                }
                .into_any(),
                FetchState::Loaded(rows) => {
                    let (total_projects, total_budget, total_statuses) = totals(&rows);
                    let body: Vec<_> = rows
                        .iter()
                        .map(|row| {
                            let scope = DrillDownScope::Department {
                                id: row.department_id.clone().unwrap_or_default(),
                                name: row.department_name.clone(),
                            };
                            view! {
                                <tr class="data-table__row--clickable" on:click=move |_| set_drill.set(Some(scope.clone()))>
                                    <td>{row.department_name.clone()}</td>
                                    <td class="num">{format_count(Some(row.total_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.completed_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.ongoing_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.not_started_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.stalled_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.under_procurement_projects as f64))}</td>
                                    <td class="num">{format_currency(Some(row.total_budget))}</td>
                                </tr>
                            }
                        })
                        .collect();
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Department"</th>
                                    <th class="num">"Projects"</th>
                                    <th class="num">"Completed"</th>
                                    <th class="num">"Ongoing"</th>
                                    <th class="num">"Not Started"</th>
                                    <th class="num">"Stalled"</th>
                                    <th class="num">"Procurement"</th>
                                    <th class="num">"Budget"</th>
                                </tr>
                            </thead>
                            <tbody>{body}</tbody>
                            <tfoot>
                                <tr class="data-table__totals">
                                    <td>"Total"</td>
                                    <td class="num">{format_count(Some(total_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.completed_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.ongoing_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.not_started_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.stalled_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.under_procurement_projects as f64))}</td>
                                    <td class="num">{format_currency(Some(total_budget))}</td>
                                </tr>
                            </tfoot>
                        </table>
                    }
                    .into_any()
                }
            }}

            {move || {
                drill
                    .get()
                    .map(|scope| {
                        let fin_year = filters.get_untracked().fin_year;
                        view! {
                            <DrillDownModal
                                scope=scope
                                fin_year=fin_year
                                on_close=Callback::new(move |_| set_drill.set(None))
                            />
                        }
                    })
            }}
        </section>
    }
}
