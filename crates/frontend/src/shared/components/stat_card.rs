use leptos::prelude::*;

/// Headline figure card for the overview strip.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Formatted value; None renders a placeholder while loading
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Accent class suffix ("primary", "success", "info", ...)
    #[prop(into)]
    accent: String,
) -> impl IntoView {
    let card_class = format!("stat-card stat-card--{}", accent);
    view! {
        <div class=card_class>
            <div class="stat-card__label">{label}</div>
            <div class="stat-card__value">
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
        </div>
    }
}
