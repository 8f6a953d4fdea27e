//! Dashboard filter bar: financial year, department, sub-county, ward and
//! project search.
//!
//! This component is the single writer of the shared [`ProjectFilters`]
//! signal. Every change goes through the contracts state machine, and the
//! signal is only set when a transition reports a real change, so downstream
//! consumers are never re-notified with referentially-equal state.

use contracts::domain::metadata::Ward;
use contracts::shared::filter::{FilterEffect, FinYearSelection, ProjectFilters};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::metadata::{api as metadata_api, MetadataStore};
use crate::shared::components::ui::input::TextInput;
use crate::shared::components::ui::select::Select;
use crate::shared::fetch::RequestSeq;

/// Debounce for the free-text search, so typing does not flood the stats
/// endpoints.
const SEARCH_DEBOUNCE_MS: u32 = 300;

const ALL_YEARS: &str = "all";

#[component]
pub fn FilterBar(filters: RwSignal<ProjectFilters>) -> impl IntoView {
    let metadata = MetadataStore::use_store();

    // Ward options belong to the currently selected sub-county. The ticket
    // guards against a slow option fetch landing after the sub-county has
    // already changed again.
    let wards = RwSignal::new(Vec::<Ward>::new());
    let ward_seq = RequestSeq::new();
    let search_seq = RequestSeq::new();
    let (search_input, set_search_input) = signal(String::new());

    let reload_wards = {
        let ward_seq = ward_seq.clone();
        move |subcounty_id: String| {
            let ticket = ward_seq.issue();
            if subcounty_id.is_empty() {
                wards.set(Vec::new());
                return;
            }
            let ward_seq = ward_seq.clone();
            spawn_local(async move {
                let result = metadata_api::get_wards_for_subcounty(&subcounty_id).await;
                if !ward_seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(rows) => wards.set(rows),
                    Err(err) => {
                        log::error!("Failed to load wards: {}", err);
                        wards.set(Vec::new());
                    }
                }
            });
        }
    };

    let on_fin_year = Callback::new(move |value: String| {
        let selection = if value == ALL_YEARS {
            FinYearSelection::All
        } else {
            FinYearSelection::Year(value)
        };
        let mut next = filters.get_untracked();
        if next.set_fin_year(selection).changed() {
            filters.set(next);
        }
    });

    let on_department = Callback::new(move |id: String| {
        let mut next = filters.get_untracked();
        if next.set_department(&id).changed() {
            filters.set(next);
        }
    });

    let on_subcounty = {
        let reload_wards = reload_wards.clone();
        Callback::new(move |id: String| {
            let mut next = filters.get_untracked();
            match next.set_subcounty(&id) {
                FilterEffect::Unchanged => {}
                FilterEffect::Changed => filters.set(next),
                FilterEffect::ChangedReloadWards => {
                    let subcounty = next.subcounty.clone();
                    filters.set(next);
                    reload_wards(subcounty);
                }
            }
        })
    };

    let on_ward = Callback::new(move |id: String| {
        let mut next = filters.get_untracked();
        if next.set_ward(&id).changed() {
            filters.set(next);
        }
    });

    let on_search = {
        let search_seq = search_seq.clone();
        Callback::new(move |term: String| {
            set_search_input.set(term.clone());
            let ticket = search_seq.issue();
            let search_seq = search_seq.clone();
            spawn_local(async move {
                TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                if !search_seq.is_current(ticket) {
                    return;
                }
                let mut next = filters.get_untracked();
                if next.set_search(&term).changed() {
                    filters.set(next);
                }
            });
        })
    };

    let clear_all = {
        let reload_wards = reload_wards.clone();
        move |_| {
            set_search_input.set(String::new());
            let mut next = filters.get_untracked();
            if next.clear().changed() {
                filters.set(next);
                reload_wards(String::new());
            }
        }
    };

    // Option lists for the selects.
    let year_options = Signal::derive(move || {
        let mut options = vec![(ALL_YEARS.to_string(), "All Financial Years".to_string())];
        metadata.financial_years.with(|years| {
            for fy in years {
                if let Some(id) = &fy.id {
                    options.push((
                        id.clone(),
                        format!("{} ({} projects)", fy.name, fy.project_count),
                    ));
                }
            }
        });
        options
    });

    let department_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "All Departments".to_string())];
        metadata.departments.with(|rows| {
            for dept in rows {
                if let Some(id) = &dept.id {
                    options.push((id.clone(), dept.name.clone()));
                }
            }
        });
        options
    });

    let subcounty_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "All Sub-Counties".to_string())];
        metadata.subcounties.with(|rows| {
            for sc in rows {
                if let Some(id) = &sc.id {
                    options.push((id.clone(), sc.name.clone()));
                }
            }
        });
        options
    });

    let ward_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "All Wards".to_string())];
        wards.with(|rows| {
            for ward in rows {
                if let Some(id) = &ward.id {
                    options.push((id.clone(), ward.name.clone()));
                }
            }
        });
        options
    });

    let ward_name = move |id: &str| {
        wards.with(|rows| {
            rows.iter()
                .find(|w| w.id.as_deref() == Some(id))
                .map(|w| w.name.clone())
        })
    };

    let active_chips = move || {
        let current = filters.get();
        let mut chips: Vec<(&'static str, String)> = Vec::new();
        if !current.department.is_empty() {
            let name = metadata
                .department_name(&current.department)
                .unwrap_or_else(|| current.department.clone());
            chips.push(("department", format!("Department: {}", name)));
        }
        if !current.subcounty.is_empty() {
            let name = metadata
                .subcounty_name(&current.subcounty)
                .unwrap_or_else(|| current.subcounty.clone());
            chips.push(("subcounty", format!("Sub-County: {}", name)));
        }
        if !current.ward.is_empty() {
            let name = ward_name(&current.ward).unwrap_or_else(|| current.ward.clone());
            chips.push(("ward", format!("Ward: {}", name)));
        }
        if !current.search.is_empty() {
            chips.push(("search", format!("Search: \"{}\"", current.search)));
        }
        chips
    };

    let remove_chip = move |kind: &'static str| match kind {
        "department" => on_department.run(String::new()),
        "subcounty" => on_subcounty.run(String::new()),
        "ward" => on_ward.run(String::new()),
        _ => {
            set_search_input.set(String::new());
            on_search.run(String::new());
        }
    };

    view! {
        <div class="filter-bar">
            <div class="filter-bar__header">
                <span class="filter-bar__title">"Dashboard Filters"</span>
                {move || {
                    let count = filters.get().active_count();
                    if count > 0 {
                        view! { <span class="badge badge--primary">{count}</span> }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </div>

            <div class="filter-bar__controls">
                <Select
                    label="Financial Year"
                    value=Signal::derive(move || {
                        filters
                            .get()
                            .fin_year
                            .id()
                            .unwrap_or(ALL_YEARS)
                            .to_string()
                    })
                    on_change=on_fin_year
                    options=year_options
                />
                <Select
                    label="Department"
                    value=Signal::derive(move || filters.get().department)
                    on_change=on_department
                    options=department_options
                />
                <Select
                    label="Sub-County"
                    value=Signal::derive(move || filters.get().subcounty)
                    on_change=on_subcounty
                    options=subcounty_options
                />
                <Select
                    label="Ward"
                    value=Signal::derive(move || filters.get().ward)
                    on_change=on_ward
                    options=ward_options
                    disabled=Signal::derive(move || filters.get().subcounty.is_empty())
                />
                <TextInput
                    label="Search Projects"
                    placeholder="Type project name..."
                    value=search_input
                    on_input=on_search
                />
                <button
                    class="button button--ghost filter-bar__clear"
                    disabled=move || !filters.get().has_active()
                    on:click=clear_all
                >
                    "Clear Filters"
                </button>
            </div>

            {move || {
                let chips = active_chips();
                if chips.is_empty() {
                    view! { <></> }.into_any()
                } else {
                    let remove_chip = remove_chip.clone();
                    view! {
                        <div class="filter-bar__chips">
                            <span class="filter-bar__chips-label">"Active Filters:"</span>
                            {chips
                                .into_iter()
                                .map(|(kind, label)| {
                                    let remove_chip = remove_chip.clone();
                                    view! {
                                        <span class="filter-tag">
                                            {label}
                                            <button
                                                class="filter-tag__remove"
                                                on:click=move |_| remove_chip(kind)
                                            >
                                                "✕"
                                            </button>
                                        </span>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
