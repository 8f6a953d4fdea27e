use crate::layout::Shell;
use crate::metadata::MetadataStore;
use crate::pages::dashboard::DashboardPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the metadata store to the whole app via context. It is the
    // only writer of the shared option lists; everything else reads.
    let metadata = MetadataStore::new();
    provide_context(metadata);
    metadata.ensure_loaded();

    view! {
        <Shell>
            <DashboardPage />
        </Shell>
    }
}
