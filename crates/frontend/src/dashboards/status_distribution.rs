//! Distribution of projects across canonical status categories.
//!
//! The backend groups by the raw status column, so the response can carry
//! several spellings of the same state ("Ongoing", "In Progress", ...).
//! They are merged through the normalizer before display; this panel and
//! the status chips in the drill-downs therefore always agree on buckets
//! and colors.

use contracts::shared::filter::ProjectFilters;
use contracts::shared::rollup::merge_status_counts;
use contracts::shared::status_style;
use contracts::stats::StatusCountRow;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_url_with;
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_percentage};

async fn get_status_counts(filters: &ProjectFilters) -> Result<Vec<StatusCountRow>, String> {
    let url = api_url_with("/stats/status-counts", &filters.query_params());
    let response = Request::get(&url)
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

#[component]
pub fn StatusDistribution(#[prop(into)] filters: Signal<ProjectFilters>) -> impl IntoView {
    let (state, set_state) = signal(FetchState::<Vec<StatusCountRow>>::Loading);
    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |snapshot: ProjectFilters| {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let seq = seq.clone();
            spawn_local(async move {
                let result = get_status_counts(&snapshot).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(rows) => set_state.set(FetchState::Loaded(rows)),
                    Err(err) => {
                        log::error!("Failed to load status counts: {}", err);
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
            <h2 class="summary-panel__title">"Project Status Distribution"</h2>
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
                            <span>"Failed to load status distribution: " {err}</span>
                            <button class="button button--small" on:click=retry>"Retry"</button>
                        </div>
                    }
                    .into_any()
                }
                FetchState::Loaded(rows) => {
                    let merged = merge_status_counts(&rows);
                    if merged.is_empty() {
                        return view! {
                            <p class="summary-panel__empty">"No projects match the current filters."</p>
                        }
                        .into_any();
                    }
                    let grand_total: u64 = merged.iter().map(|(_, count)| count).sum();
                    let bars: Vec<_> = merged
                        .into_iter()
                        .map(|(status, count)| {
                            let share = if grand_total > 0 {
                                count as f64 * 100.0 / grand_total as f64
                            } else {
                                0.0
                            };
                            let bar_style = format!(
                                "width: {:.1}%; background-color: {};",
                                share,
                                status_style::color_for_status(status)
                            );
                            view! {
                                <div class="status-bar">
                                    <span class="status-bar__label">{status.label()}</span>
                                    <div class="status-bar__track">
                                        <div class="status-bar__fill" style=bar_style></div>
                                    </div>
                                    <span class="status-bar__count">
                                        {format_count(Some(count as f64))}
                                        " ("
                                        {format_percentage(Some(share))}
                                        ")"
                                    </span>
                                </div>
                            }
                        })
                        .collect();
                    view! { <div class="status-distribution">{bars}</div> }.into_any()
                }
            }}
        </section>
    }
}
