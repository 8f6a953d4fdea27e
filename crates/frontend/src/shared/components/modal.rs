use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

/// Overlay modal. Escape and overlay clicks close it; content clicks do not.
#[component]
pub fn Modal(
    /// Title shown in the header
    #[prop(into)]
    title: String,
    /// Secondary line under the title
    #[prop(optional, into)]
    subtitle: Option<String>,
    /// Callback when the modal should close
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    // Close on Escape.
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                if key_event.key() == "Escape" {
                    on_close.run(());
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <div>
                        <h2 class="modal-title">{title}</h2>
                        {subtitle.map(|s| view! { <span class="modal-subtitle">{s}</span> })}
                    </div>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        "✕"
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
