use leptos::prelude::*;

use crate::config::TypingSettings;
#[cfg(feature = "hydrate")]
use crate::typing::TypingAnimator;
use crate::typing::{TextSurface, TypingConfig};

use super::dom;

/// Page element looked up by id on every write, so a removed element simply
/// reads as detached.
#[derive(Debug, Clone)]
pub struct ElementSurface {
    id: String,
}

impl ElementSurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl TextSurface for ElementSurface {
    fn is_attached(&self) -> bool {
        dom::by_id(&self.id).is_some()
    }

    fn render(&self, text: &str) {
        if let Some(el) = dom::by_id(&self.id) {
            el.set_text_content(Some(text));
        }
    }
}

#[cfg(feature = "hydrate")]
fn start_typing(config: TypingConfig, surface_id: String) {
    use leptos_use::{use_event_listener, use_window};

    use super::timers::BrowserScheduler;

    let animator = StoredValue::new_local(TypingAnimator::new(
        BrowserScheduler::default(),
        ElementSurface::new(surface_id),
    ));

    // effects only run once the page has hydrated
    Effect::new(move |_| {
        animator.with_value(|a| a.start(config.clone()));
    });

    let _ = use_event_listener(use_window(), leptos::ev::click, move |_| {
        animator.with_value(|a| a.notify_interaction());
    });

    on_cleanup(move || {
        animator.try_with_value(|a| a.stop());
    });
}

#[component]
pub fn TypedText(settings: TypingSettings, #[prop(into)] surface_id: String) -> impl IntoView {
    match TypingConfig::try_from(settings) {
        #[cfg(feature = "hydrate")]
        Ok(config) => start_typing(config, surface_id.clone()),
        #[cfg(not(feature = "hydrate"))]
        Ok(_) => {}
        Err(e) => log::warn!("typing effect disabled: {e}"),
    }

    view! {
        <span id=surface_id class="typed-text text-cyan" aria-live="polite"></span>
        <span class="typed-cursor" aria-hidden="true">
            "|"
        </span>
    }
}
