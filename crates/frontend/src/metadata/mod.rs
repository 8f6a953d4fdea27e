//! Shared filter-selector metadata (departments, sub-counties, financial
//! years, project types).
//!
//! One store, provided via context at application start, fetched once and
//! read by every sibling view. Only this module writes the lists; the
//! explicit [`MetadataStore::reset`] replaces the module-level cache
//! singleton the old implementation relied on and gives tests a clean
//! invalidation point.

pub mod api;

use contracts::domain::metadata::{Department, FinancialYear, ProjectType, SubCounty};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy)]
pub struct MetadataStore {
    pub departments: RwSignal<Vec<Department>>,
    pub subcounties: RwSignal<Vec<SubCounty>>,
    pub financial_years: RwSignal<Vec<FinancialYear>>,
    pub project_types: RwSignal<Vec<ProjectType>>,
    started: RwSignal<bool>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self {
            departments: RwSignal::new(Vec::new()),
            subcounties: RwSignal::new(Vec::new()),
            financial_years: RwSignal::new(Vec::new()),
            project_types: RwSignal::new(Vec::new()),
            started: RwSignal::new(false),
        }
    }

    /// The context-provided instance. Panics only on programmer error
    /// (component mounted outside `App`).
    pub fn use_store() -> Self {
        use_context::<MetadataStore>().expect("MetadataStore not provided")
    }

    /// Kick off the metadata fetches once. Subsequent calls are no-ops.
    /// A failed list stays empty and is logged; selectors degrade to their
    /// placeholder entry rather than blocking the page.
    pub fn ensure_loaded(&self) {
        if self.started.get_untracked() {
            return;
        }
        self.started.set(true);

        let store = *self;
        spawn_local(async move {
            match api::get_departments().await {
                Ok(rows) => store.departments.set(rows),
                Err(err) => log::error!("Failed to load departments: {}", err),
            }
        });
        let store = *self;
        spawn_local(async move {
            match api::get_subcounties().await {
                Ok(rows) => store.subcounties.set(rows),
                Err(err) => log::error!("Failed to load sub-counties: {}", err),
            }
        });
        let store = *self;
        spawn_local(async move {
            match api::get_financial_years().await {
                Ok(mut rows) => {
                    // Latest year first; the backend orders by start date
                    // already, re-sort defensively.
                    rows.sort_by(|a, b| b.start().cmp(&a.start()));
                    store.financial_years.set(rows);
                }
                Err(err) => log::error!("Failed to load financial years: {}", err),
            }
        });
        let store = *self;
        spawn_local(async move {
            match api::get_project_types().await {
                Ok(rows) => store.project_types.set(rows),
                Err(err) => log::error!("Failed to load project types: {}", err),
            }
        });
    }

    /// Drop everything and allow a fresh `ensure_loaded`.
    pub fn reset(&self) {
        self.departments.set(Vec::new());
        self.subcounties.set(Vec::new());
        self.financial_years.set(Vec::new());
        self.project_types.set(Vec::new());
        self.started.set(false);
    }

    /// Display name for a department id (filter chips).
    pub fn department_name(&self, id: &str) -> Option<String> {
        self.departments.with(|rows| {
            rows.iter()
                .find(|d| d.id.as_deref() == Some(id))
                .map(|d| d.name.clone())
        })
    }

    /// Display name for a sub-county id (filter chips).
    pub fn subcounty_name(&self, id: &str) -> Option<String> {
        self.subcounties.with(|rows| {
            rows.iter()
                .find(|s| s.id.as_deref() == Some(id))
                .map(|s| s.name.clone())
        })
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}
