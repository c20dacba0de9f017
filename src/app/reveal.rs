use leptos::{html, prelude::*};
use leptos_use::{use_intersection_observer_with_options, UseIntersectionObserverOptions};

use crate::scroll::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};

/// Fades its children in the first time they scroll into view.
#[component]
pub fn Reveal(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let target = NodeRef::<html::Div>::new();
    let (revealed, set_revealed) = signal(false);

    let _ = use_intersection_observer_with_options(
        target,
        move |entries, _| {
            if entries.iter().any(|entry| entry.is_intersecting()) {
                set_revealed.set(true);
            }
        },
        UseIntersectionObserverOptions::default()
            .thresholds(vec![REVEAL_THRESHOLD])
            .root_margin(REVEAL_ROOT_MARGIN.to_string()),
    );

    view! {
        <div
            node_ref=target
            class=move || {
                if revealed.get() { format!("{class} animate-in") } else { class.clone() }
            }
        >
            {children()}
        </div>
    }
}
