//! Headline figures for the active filter selection.

use contracts::shared::filter::ProjectFilters;
use contracts::stats::OverviewStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::api;
use crate::shared::components::stat_card::StatCard;
use crate::shared::fetch::{FetchState, RequestSeq};
use crate::shared::formatters::{format_count, format_currency_short};

#[component]
pub fn OverviewCards(#[prop(into)] filters: Signal<ProjectFilters>) -> impl IntoView {
    let (state, set_state) = signal(FetchState::<OverviewStats>::Loading);
    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |snapshot: ProjectFilters| {
            set_state.set(FetchState::Loading);
            let ticket = seq.issue();
            let seq = seq.clone();
            spawn_local(async move {
                let result = api::get_overview_stats(&snapshot).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(stats) => set_state.set(FetchState::Loaded(stats)),
                    Err(err) => {
                        log::error!("Failed to load overview stats: {}", err);
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

    // Cards show a placeholder while loading; a failed overview leaves the
    // placeholders in place (each table has its own error surface).
    let stat = move |pick: fn(&OverviewStats) -> String| {
        Signal::derive(move || state.with(|s| s.loaded().map(pick)))
    };

    view! {
        <div class="overview-cards">
            <StatCard
                label="Total Projects"
                accent="primary"
                value=stat(|s| format_count(Some(s.total_projects as f64)))
            />
            <StatCard
                label="Total Budget"
                accent="info"
                value=stat(|s| format_currency_short(Some(s.total_budget)))
            />
            <StatCard
                label="Completed"
                accent="success"
                value=stat(|s| format_count(Some(s.statuses.completed_projects as f64)))
            />
            <StatCard
                label="Ongoing"
                accent="warning"
                value=stat(|s| format_count(Some(s.statuses.ongoing_projects as f64)))
            />
        </div>
    }
}
