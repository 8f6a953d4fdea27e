//! Summary of projects per ward, scoped to the selected sub-county.

use contracts::shared::filter::ProjectFilters;
use contracts::stats::{StatusColumns, WardStatRow};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::api;
use crate::drilldown::{DrillDownModal, DrillDownScope};
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_currency};

fn totals(rows: &[WardStatRow]) -> (u64, f64, StatusColumns) {
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
pub fn WardSummaryTable(#[prop(into)] filters: Signal<ProjectFilters>) -> impl IntoView {
    let (state, set_state) = signal(FetchState::<Vec<WardStatRow>>::Loading);
    let (drill, set_drill) = signal(None::<DrillDownScope>);
    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |snapshot: ProjectFilters| {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let seq = seq.clone();
            spawn_local(async move {
                let result = api::get_ward_stats(&snapshot).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(rows) => set_state.set(FetchState::Loaded(rows)),
                    Err(err) => {
                        log::error!("Failed to load ward stats: {}", err);
                        set_state.set(FetchState::Error(err));
                    }
                }
            });
        }
    };

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
            <h2 class="summary-panel__title">"Projects by Ward"</h2>
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
                            <span>"Failed to load ward summary: " {err}</span>
                            <button class="button button--small" on:click=retry>"Retry"</button>
                        </div>
                    }
                    .into_any()
                }
                FetchState::Loaded(rows) => {
                    // The ward list follows the sub-county selection even
                    // when the backend was queried unscoped; totals come
                    // from the rows actually displayed.
                    let subcounty = filters.get().subcounty;
                    let visible: Vec<WardStatRow> = rows
                        .iter()
                        .filter(|row| {
                            subcounty.is_empty()
                                || row.subcounty_id.as_deref() == Some(subcounty.as_str())
                        })
                        .cloned()
                        .collect();

                    if visible.is_empty() {
                        return view! {
                            <p class="summary-panel__empty">
                                "No ward-level projects match the current filters."
                            </p>
                        }
                        .into_any();
                    }

                    let (total_projects, total_budget, total_statuses) = totals(&visible);
                    let body: Vec<_> = visible
                        .iter()
                        .map(|row| {
                            let scope = DrillDownScope::Ward {
                                id: row.ward_id.clone().unwrap_or_default(),
                                name: row.ward_name.clone(),
                            };
                            view! {
                                <tr class="data-table__row--clickable" on:click=move |_| set_drill.set(Some(scope.clone()))>
                                    <td>{row.ward_name.clone()}</td>
                                    <td>{row.subcounty_name.clone().unwrap_or_default()}</td>
                                    <td class="num">{format_count(Some(row.total_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.completed_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.ongoing_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.statuses.stalled_projects as f64))}</td>
                                    <td class="num">{format_currency(Some(row.total_budget))}</td>
                                </tr>
                            }
                        })
                        .collect();
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Ward"</th>
                                    <th>"Sub-County"</th>
                                    <th class="num">"Projects"</th>
                                    <th class="num">"Completed"</th>
                                    <th class="num">"Ongoing"</th>
                                    <th class="num">"Stalled"</th>
                                    <th class="num">"Budget"</th>
                                </tr>
                            </thead>
                            <tbody>{body}</tbody>
                            <tfoot>
                                <tr class="data-table__totals">
                                    <td>"Total"</td>
                                    <td></td>
                                    <td class="num">{format_count(Some(total_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.completed_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.ongoing_projects as f64))}</td>
                                    <td class="num">{format_count(Some(total_statuses.stalled_projects as f64))}</td>
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
