//! Per-financial-year trend table.
//!
//! Derived live from the per-year overview stats rather than a canned
//! dataset: one request per financial year, issued sequentially under a
//! single ticket so a filter change mid-flight discards the whole batch.

use contracts::domain::metadata::FinancialYear;
use contracts::shared::filter::ProjectFilters;
use contracts::stats::OverviewStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::api;
use crate::drilldown::{DrillDownModal, DrillDownScope};
use crate::metadata::MetadataStore;
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_currency};

#[derive(Debug, Clone, PartialEq)]
struct YearTrendRow {
    year: FinancialYear,
    stats: OverviewStats,
}

#[component]
pub fn YearlyTrendsTable(#[prop(into)] filters: Signal<ProjectFilters>) -> impl IntoView {
    let metadata = MetadataStore::use_store();
    let (state, set_state) = signal(FetchState::<Vec<YearTrendRow>>::Loading);
    let (drill, set_drill) = signal(None::<DrillDownScope>);
    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |snapshot: ProjectFilters, years: Vec<FinancialYear>| {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let seq = seq.clone();
            spawn_local(async move {
                let mut rows = Vec::with_capacity(years.len());
                for year in years {
                    let Some(id) = year.id.clone() else {
                        continue;
                    };
                    match api::get_overview_stats_for_year(&snapshot, &id).await {
                        Ok(stats) => rows.push(YearTrendRow { year, stats }),
                        Err(err) => {
                            if seq.is_current(ticket) {
                                log::error!("Failed to load yearly trends: {}", err);
                                set_state.set(FetchState::Error(err));
                            }
                            return;
                        }
                    }
                    if !seq.is_current(ticket) {
                        return;
                    }
                }
                if seq.is_current(ticket) {
                    set_state.set(FetchState::Loaded(rows));
                }
            });
        }
    };

    // Re-fetch when the filters change or the year list arrives.
    Effect::new({
        let load = load.clone();
        move |_| {
            let snapshot = filters.get();
            let years = metadata.financial_years.get();
            if years.is_empty() {
                return;
            }
            load(snapshot, years);
        }
    });

    let retry = {
        let load = load.clone();
        move |_| {
            let years = metadata.financial_years.get_untracked();
            if !years.is_empty() {
                load(filters.get_untracked(), years);
            }
        }
    };

    view! {
        <section class="summary-panel">
            <h2 class="summary-panel__title">"Yearly Trends"</h2>
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
                            <span>"Failed to load yearly trends: " {err}</span>
                            <button class="button button--small" on:click=retry>"Retry"</button>
                        </div>
                    }
                    .into_any()
                }
                FetchState::Loaded(rows) if rows.is_empty() => view! {
                    <p class="summary-panel__empty">"No financial years recorded."</p>
                }
                .into_any(),
                FetchState::Loaded(rows) => {
                    let body: Vec<_> = rows
                        .iter()
                        .map(|row| {
                            let scope = DrillDownScope::FinancialYear {
                                id: row.year.id.clone().unwrap_or_default(),
                                name: row.year.name.clone(),
                            };
                            view! {
                                <tr class="data-table__row--clickable" on:click=move |_| set_drill.set(Some(scope.clone()))>
                                    <td>{row.year.name.clone()}</td>
                                    <td class="num">{format_count(Some(row.stats.total_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.stats.statuses.completed_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.stats.statuses.ongoing_projects as f64))}</td>
                                    <td class="num">{format_count(Some(row.stats.statuses.not_started_projects as f64))}</td>
                                    <td class="num">{format_currency(Some(row.stats.total_budget))}</td>
                                </tr>
                            }
                        })
                        .collect();
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Financial Year"</th>
                                    <th class="num">"Projects"</th>
                                    <th class="num">"Completed"</th>
                                    <th class="num">"Ongoing"</th>
                                    <th class="num">"Not Started"</th>
                                    <th class="num">"Budget"</th>
                                </tr>
                            </thead>
                            <tbody>{body}</tbody>
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
