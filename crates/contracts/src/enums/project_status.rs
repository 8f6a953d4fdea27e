use serde::{Deserialize, Serialize};

/// Canonical project status categories.
///
/// Backend status strings are free text authored over several vocabulary
/// generations ("In Progress", "On-going", "Phase II completed", ...).
/// Every grouping, coloring and filtering decision goes through
/// [`ProjectStatus::normalize`] so that historical data aggregates into the
/// same buckets as current data. Raw status strings must never be compared
/// directly outside this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Completed,
    Ongoing,
    NotStarted,
    Stalled,
    UnderProcurement,
    Other,
}

impl ProjectStatus {
    /// Display label. Also the canonical key in the status color table.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::NotStarted => "Not started",
            ProjectStatus::Stalled => "Stalled",
            ProjectStatus::UnderProcurement => "Under Procurement",
            ProjectStatus::Other => "Other",
        }
    }

    /// All categories in their fixed display order.
    pub fn all() -> [ProjectStatus; 6] {
        [
            ProjectStatus::Completed,
            ProjectStatus::Ongoing,
            ProjectStatus::NotStarted,
            ProjectStatus::Stalled,
            ProjectStatus::UnderProcurement,
            ProjectStatus::Other,
        ]
    }

    /// Map a raw backend status string onto a canonical category.
    ///
    /// Total over all inputs: unknown vocabulary maps to `Other`, never an
    /// error. Matching is case-insensitive and whitespace-tolerant.
    ///
    /// The "completed" check runs first so variants like
    /// "Phase II completed" or "Initiated and completed" do not fall into
    /// the earlier-phase buckets below.
    pub fn normalize(raw: &str) -> ProjectStatus {
        let s = raw.trim().to_lowercase();
        if s.is_empty() {
            return ProjectStatus::Other;
        }
        if s.contains("completed") || s.ends_with("complete") {
            return ProjectStatus::Completed;
        }
        if s.contains("ongoing")
            || s.contains("on-going")
            || s.contains("on going")
            || s.contains("in progress")
            || s.contains("inprogress")
        {
            return ProjectStatus::Ongoing;
        }
        if s.contains("not started") {
            return ProjectStatus::NotStarted;
        }
        // "Initiated" and "To be ..." phrasings describe work that has not
        // broken ground yet.
        if s.contains("initiated") || s.contains("to be") {
            return ProjectStatus::NotStarted;
        }
        // "Suspended", "Delayed" and "At Risk" are legacy labels for work
        // that is off track; they share the Stalled bucket.
        if s.contains("stalled")
            || s.contains("suspended")
            || s.contains("delayed")
            || s.contains("at risk")
        {
            return ProjectStatus::Stalled;
        }
        if s.contains("procurement") {
            return ProjectStatus::UnderProcurement;
        }
        ProjectStatus::Other
    }

    /// Nullable-field variant of [`ProjectStatus::normalize`].
    pub fn from_raw(raw: Option<&str>) -> ProjectStatus {
        match raw {
            Some(s) => Self::normalize(s),
            None => ProjectStatus::Other,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_current_vocabulary() {
        assert_eq!(ProjectStatus::normalize("Completed"), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::normalize("Ongoing"), ProjectStatus::Ongoing);
        assert_eq!(ProjectStatus::normalize("Not started"), ProjectStatus::NotStarted);
        assert_eq!(ProjectStatus::normalize("Stalled"), ProjectStatus::Stalled);
        assert_eq!(
            ProjectStatus::normalize("Under Procurement"),
            ProjectStatus::UnderProcurement
        );
    }

    #[test]
    fn normalizes_legacy_synonyms() {
        assert_eq!(ProjectStatus::normalize("In Progress"), ProjectStatus::Ongoing);
        assert_eq!(ProjectStatus::normalize("on-going"), ProjectStatus::Ongoing);
        assert_eq!(ProjectStatus::normalize("InProgress"), ProjectStatus::Ongoing);
        assert_eq!(ProjectStatus::normalize("Initiated"), ProjectStatus::NotStarted);
        assert_eq!(
            ProjectStatus::normalize("To be initiated in Q3"),
            ProjectStatus::NotStarted
        );
        assert_eq!(ProjectStatus::normalize("At Risk"), ProjectStatus::Stalled);
        assert_eq!(ProjectStatus::normalize("Delayed"), ProjectStatus::Stalled);
        assert_eq!(ProjectStatus::normalize("Suspended"), ProjectStatus::Stalled);
        assert_eq!(
            ProjectStatus::normalize("procurement stage"),
            ProjectStatus::UnderProcurement
        );
    }

    #[test]
    fn completed_takes_precedence_over_phase_words() {
        assert_eq!(
            ProjectStatus::normalize("Phase II completed"),
            ProjectStatus::Completed
        );
        assert_eq!(
            ProjectStatus::normalize("Initiated and completed"),
            ProjectStatus::Completed
        );
        assert_eq!(ProjectStatus::normalize("complete"), ProjectStatus::Completed);
    }

    #[test]
    fn case_and_whitespace_tolerant() {
        assert_eq!(ProjectStatus::normalize("  STALLED  "), ProjectStatus::Stalled);
        assert_eq!(ProjectStatus::normalize("NOT STARTED"), ProjectStatus::NotStarted);
    }

    #[test]
    fn unknown_and_empty_map_to_other() {
        assert_eq!(ProjectStatus::normalize(""), ProjectStatus::Other);
        assert_eq!(ProjectStatus::normalize("   "), ProjectStatus::Other);
        assert_eq!(ProjectStatus::normalize("banana"), ProjectStatus::Other);
        assert_eq!(ProjectStatus::from_raw(None), ProjectStatus::Other);
    }

    #[test]
    fn normalize_is_idempotent_over_labels() {
        for status in ProjectStatus::all() {
            assert_eq!(ProjectStatus::normalize(status.label()), status);
        }
    }
}
