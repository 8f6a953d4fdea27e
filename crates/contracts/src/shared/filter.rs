//! Cascading dashboard filter state.
//!
//! One explicit state machine replaces the reactive-effect chains that used
//! to coordinate the dependent selectors. Every transition is a named method
//! returning a [`FilterEffect`], so the component layer knows whether to
//! notify consumers at all and whether the ward option list must be
//! re-fetched — and the whole thing is testable without a rendering
//! environment.
//!
//! Ownership rule: only the filter bar component calls the mutating methods;
//! every other consumer reads the combined state through a read-only signal.

use serde::{Deserialize, Serialize};

/// Financial-year selection. "All years" is a distinct state from any
/// concrete year: it omits the `finYearId` parameter entirely, which changes
/// which rollups the backend computes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinYearSelection {
    #[default]
    All,
    Year(String),
}

impl FinYearSelection {
    pub fn id(&self) -> Option<&str> {
        match self {
            FinYearSelection::All => None,
            FinYearSelection::Year(id) => Some(id),
        }
    }
}

/// What a transition did, from the notifying component's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEffect {
    /// State is identical; consumers must NOT be re-notified (re-notifying
    /// unchanged state is what used to cause redundant re-fetch loops).
    Unchanged,
    /// State changed; notify consumers with the complete filter object.
    Changed,
    /// Sub-county changed (ward already reset in the same transition);
    /// notify consumers AND re-fetch the ward option list.
    ChangedReloadWards,
}

impl FilterEffect {
    pub fn changed(&self) -> bool {
        !matches!(self, FilterEffect::Unchanged)
    }
}

/// The combined dashboard filter. Empty strings mean "no selection", the
/// same convention the select elements use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilters {
    pub fin_year: FinYearSelection,
    pub department: String,
    pub subcounty: String,
    /// Only meaningful while `subcounty` is non-empty.
    pub ward: String,
    pub search: String,
}

impl ProjectFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fin_year(&mut self, selection: FinYearSelection) -> FilterEffect {
        if self.fin_year == selection {
            return FilterEffect::Unchanged;
        }
        self.fin_year = selection;
        FilterEffect::Changed
    }

    pub fn set_department(&mut self, id: &str) -> FilterEffect {
        if self.department == id {
            return FilterEffect::Unchanged;
        }
        self.department = id.to_string();
        FilterEffect::Changed
    }

    /// Selecting a different sub-county (including clearing it) invalidates
    /// the ward: the old ward id belongs to the old sub-county's option
    /// list. Both fields change in this single transition so consumers never
    /// observe a ward pointing at the wrong parent.
    pub fn set_subcounty(&mut self, id: &str) -> FilterEffect {
        if self.subcounty == id {
            return FilterEffect::Unchanged;
        }
        self.subcounty = id.to_string();
        self.ward.clear();
        FilterEffect::ChangedReloadWards
    }

    /// No-op unless a sub-county is selected; the ward selector is disabled
    /// in that state, but a guard here keeps the invariant even if a stale
    /// event slips through.
    pub fn set_ward(&mut self, id: &str) -> FilterEffect {
        if self.subcounty.is_empty() || self.ward == id {
            return FilterEffect::Unchanged;
        }
        self.ward = id.to_string();
        FilterEffect::Changed
    }

    pub fn set_search(&mut self, term: &str) -> FilterEffect {
        let term = term.trim();
        if self.search == term {
            return FilterEffect::Unchanged;
        }
        self.search = term.to_string();
        FilterEffect::Changed
    }

    /// Reset every field to its default in one atomic update. Consumers see
    /// either the old state or the fully cleared one, never an intermediate
    /// (a ward referencing a just-cleared sub-county, for instance).
    pub fn clear(&mut self) -> FilterEffect {
        let cleared = Self::default();
        if *self == cleared {
            return FilterEffect::Unchanged;
        }
        *self = cleared;
        FilterEffect::Changed
    }

    /// Number of active filters, for the "Filters Active" badge. The
    /// financial year always has a value and does not count.
    pub fn active_count(&self) -> usize {
        [&self.department, &self.subcounty, &self.ward, &self.search]
            .iter()
            .filter(|v| !v.is_empty())
            .count()
    }

    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Query parameters in the backend's spelling. Empty selections are
    /// omitted; "All years" omits `finYearId`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.fin_year.id() {
            params.push(("finYearId", id.to_string()));
        }
        if !self.department.is_empty() {
            params.push(("departmentId", self.department.clone()));
        }
        if !self.subcounty.is_empty() {
            params.push(("subcountyId", self.subcounty.clone()));
        }
        if !self.ward.is_empty() {
            params.push(("wardId", self.ward.clone()));
        }
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_subcounty_resets_ward() {
        let mut filters = ProjectFilters::new();
        assert_eq!(filters.set_subcounty("nyando"), FilterEffect::ChangedReloadWards);
        assert_eq!(filters.set_ward("ward-12"), FilterEffect::Changed);
        assert_eq!(filters.ward, "ward-12");

        // Clearing the sub-county clears the ward in the same transition.
        assert_eq!(filters.set_subcounty(""), FilterEffect::ChangedReloadWards);
        assert_eq!(filters.subcounty, "");
        assert_eq!(filters.ward, "");

        // And switching to a sibling does too.
        filters.set_subcounty("nyando");
        filters.set_ward("ward-12");
        assert_eq!(filters.set_subcounty("muhoroni"), FilterEffect::ChangedReloadWards);
        assert_eq!(filters.ward, "");
    }

    #[test]
    fn ward_requires_a_subcounty() {
        let mut filters = ProjectFilters::new();
        assert_eq!(filters.set_ward("ward-12"), FilterEffect::Unchanged);
        assert_eq!(filters.ward, "");
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let mut filters = ProjectFilters::new();
        filters.set_department("3");
        assert_eq!(filters.set_department("3"), FilterEffect::Unchanged);

        filters.set_subcounty("9");
        assert_eq!(filters.set_subcounty("9"), FilterEffect::Unchanged);

        filters.set_search("borehole");
        assert_eq!(filters.set_search("  borehole  "), FilterEffect::Unchanged);

        assert_eq!(
            filters.set_fin_year(FinYearSelection::All),
            FilterEffect::Unchanged
        );
    }

    #[test]
    fn all_years_is_distinct_from_any_concrete_year() {
        let mut filters = ProjectFilters::new();
        assert_eq!(filters.fin_year, FinYearSelection::All);
        assert!(filters.query_params().is_empty());

        filters.set_fin_year(FinYearSelection::Year("5".into()));
        assert_eq!(
            filters.query_params(),
            vec![("finYearId", "5".to_string())]
        );
        assert_eq!(
            filters.set_fin_year(FinYearSelection::All),
            FilterEffect::Changed
        );
    }

    #[test]
    fn clear_resets_everything_atomically() {
        let mut filters = ProjectFilters::new();
        filters.set_fin_year(FinYearSelection::Year("5".into()));
        filters.set_department("3");
        filters.set_subcounty("9");
        filters.set_ward("12");
        filters.set_search("dam");

        assert_eq!(filters.clear(), FilterEffect::Changed);
        assert_eq!(filters, ProjectFilters::default());
        assert_eq!(filters.active_count(), 0);
        assert_eq!(filters.clear(), FilterEffect::Unchanged);
    }

    #[test]
    fn query_params_use_backend_spellings() {
        let mut filters = ProjectFilters::new();
        filters.set_fin_year(FinYearSelection::Year("2".into()));
        filters.set_department("3");
        filters.set_subcounty("9");
        filters.set_ward("12");
        filters.set_search("class");

        assert_eq!(
            filters.query_params(),
            vec![
                ("finYearId", "2".to_string()),
                ("departmentId", "3".to_string()),
                ("subcountyId", "9".to_string()),
                ("wardId", "12".to_string()),
                ("search", "class".to_string()),
            ]
        );
    }

    #[test]
    fn active_count_drives_badge() {
        let mut filters = ProjectFilters::new();
        assert!(!filters.has_active());
        filters.set_department("3");
        filters.set_search("pipe");
        assert_eq!(filters.active_count(), 2);
    }
}
