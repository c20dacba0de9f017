use leptos::{ev::MouseEvent, prelude::*};

use super::dom;

/// In-page link that smooth-scrolls to its target instead of jumping.
#[component]
pub fn AnchorLink(
    #[prop(into)] href: String,
    #[prop(optional, into)] class: String,
    /// Runs after every click, whether or not a target was found.
    #[prop(optional)]
    on_follow: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let target = href.clone();
    view! {
        <a
            href=href
            class=class
            on:click=move |ev: MouseEvent| {
                ev.prevent_default();
                if !dom::scroll_to_anchor(&target) {
                    log::debug!("no scroll target for {target}");
                }
                if let Some(cb) = on_follow {
                    cb.run(());
                }
            }
        >
            {children()}
        </a>
    }
}
