use leptos::prelude::*;

/// Application chrome: header bar and the scrolling content area.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-shell">
            <header class="app-header">
                <div class="app-header__title">
                    <span class="app-header__emblem">"◈"</span>
                    <div>
                        <h1>"County Projects Dashboard"</h1>
                        <span class="app-header__subtitle">
                            "Development project monitoring and tracking"
                        </span>
                    </div>
                </div>
            </header>
            <main class="app-content">{children()}</main>
        </div>
    }
}
