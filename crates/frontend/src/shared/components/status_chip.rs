use contracts::shared::status_style;
use leptos::prelude::*;

/// Colored chip for a raw status string.
///
/// Color and text color both come from the contracts lookup, so chips agree
/// with legend swatches and aggregated segments rendered elsewhere.
#[component]
pub fn StatusChip(#[prop(into)] status: String) -> impl IntoView {
    let style = status_style::chip_style(&status);
    let label = if status.trim().is_empty() {
        "Unknown".to_string()
    } else {
        status
    };
    view! {
        <span class="status-chip" style=style>
            {label}
        </span>
    }
}
