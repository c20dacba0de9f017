mod anchor;
mod back_to_top;
mod contact;
mod demo_modal;
mod dom;
mod header;
mod homepage;
mod reveal;
#[cfg(feature = "hydrate")]
mod timers;
mod toast;
mod typed;

pub use demo_modal::DemoModalHandle;
pub use toast::Toasts;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};
use leptos_use::{use_debounce_fn, use_event_listener, use_window};

use crate::config::SiteConfig;
use crate::scroll::{RESIZE_SETTLE, RESIZE_STOPPER_CLASS};

use back_to_top::BackToTop;
use demo_modal::DemoModal;
use header::Header;
use homepage::HomePage;
use toast::Toast;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link
                    rel="stylesheet"
                    href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
                />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="font-sans bg-background text-foreground">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = SiteConfig::load_or_default();
    let name = config.name.clone();
    DemoModalHandle::provide(config.mounts.clone());
    Toasts::provide();
    provide_context(config);

    // pause CSS animations while the window is being resized
    let settle = use_debounce_fn(
        || {
            if let Some(body) = dom::body() {
                let _ = body.class_list().remove_1(RESIZE_STOPPER_CLASS);
            }
        },
        RESIZE_SETTLE.as_millis() as f64,
    );
    let _ = use_event_listener(use_window(), leptos::ev::resize, move |_| {
        if let Some(body) = dom::body() {
            let _ = body.class_list().add_1(RESIZE_STOPPER_CLASS);
        }
        settle();
    });

    view! {
        <Title formatter=move |title| format!("{name} - {title}") />
        <Router>
            <Header />
            <main class="flex flex-col flex-grow items-center mx-auto w-full">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </main>
            <BackToTop />
            <DemoModal />
            <Toast />
        </Router>
    }
}
