use leptos::prelude::*;
use leptos_use::use_window_scroll;

use crate::scroll::back_to_top_visible;

use super::dom;

#[component]
pub fn BackToTop() -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    view! {
        <button
            type="button"
            aria-label="Back to top"
            class=move || {
                if back_to_top_visible(scroll_y.get()) { "back-to-top visible" } else { "back-to-top" }
            }
            on:click=move |_| dom::scroll_to_top()
        >
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}
