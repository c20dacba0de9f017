use leptos::{ev::MouseEvent, html, prelude::*};
use leptos_use::{use_document, use_event_listener, use_window};
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;
use crate::nav::{MenuEvent, MenuState};

use super::anchor::AnchorLink;
use super::dom;

const NAV_LINKS: [(&str, &str); 4] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];

#[component]
pub fn Header() -> impl IntoView {
    let name = expect_context::<SiteConfig>().name;
    let (menu, set_menu) = signal(MenuState::default());
    let dispatch = move |event: MenuEvent| set_menu.update(|m| *m = m.apply(event));
    let toggle_ref = NodeRef::<html::Button>::new();
    let links_ref = NodeRef::<html::Ul>::new();

    Effect::new(move |_| {
        let open = menu.get().open;
        if let Some(body) = dom::body() {
            let _ = body.class_list().toggle_with_force("menu-open", open);
        }
    });

    let _ = use_event_listener(use_document(), leptos::ev::click, move |ev: MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
            return;
        };
        let in_links = links_ref
            .get_untracked()
            .is_some_and(|el| el.contains(Some(&target)));
        let in_toggle = toggle_ref
            .get_untracked()
            .is_some_and(|el| el.contains(Some(&target)));
        if !in_links && !in_toggle && menu.get_untracked().open {
            dispatch(MenuEvent::OutsideClick);
        }
    });

    let _ = use_event_listener(use_document(), leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            dispatch(MenuEvent::Escape);
        }
    });

    let _ = use_event_listener(use_window(), leptos::ev::resize, move |_| {
        let width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64());
        if let Some(width) = width {
            dispatch(MenuEvent::Resized { width });
        }
    });

    let on_follow = Callback::new(move |_| dispatch(MenuEvent::LinkFollowed));

    view! {
        <header class="navbar fixed top-0 inset-x-0 z-40 bg-background/90 backdrop-blur shadow-lg">
            <nav class="mx-auto max-w-6xl flex items-center justify-between px-4 py-4">
                <AnchorLink href="#home" class="logo text-2xl font-bold text-cyan">
                    {name}
                </AnchorLink>
                <button
                    node_ref=toggle_ref
                    type="button"
                    class="menu-toggle md:hidden text-2xl"
                    class:active=move || menu.get().open
                    aria-label="Toggle navigation"
                    aria-expanded=move || menu.get().open.to_string()
                    on:click=move |ev: MouseEvent| {
                        ev.stop_propagation();
                        dispatch(MenuEvent::Toggle);
                    }
                >
                    <i class=move || menu.get().icon_class()></i>
                </button>
                <ul node_ref=links_ref class="nav-links" class:active=move || menu.get().open>
                    {NAV_LINKS
                        .into_iter()
                        .map(|(href, label)| {
                            view! {
                                <li>
                                    <AnchorLink
                                        href=href
                                        class="hover:text-cyan transition-colors duration-200"
                                        on_follow
                                    >
                                        {label}
                                    </AnchorLink>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </header>
    }
}
