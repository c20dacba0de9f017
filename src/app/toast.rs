use leptos::prelude::*;

use crate::notice::Notice;

/// Single-slot toast: a new notice replaces the one on screen and restarts the
/// dismissal timer.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Notice>>,
    dismiss: StoredValue<Option<TimeoutHandle>>,
}

impl Toasts {
    pub fn provide() -> Self {
        let toasts = Self {
            current: RwSignal::new(None),
            dismiss: StoredValue::new(None),
        };
        provide_context(toasts);
        toasts
    }

    pub fn show(&self, notice: Notice) {
        if let Some(handle) = self.dismiss.get_value() {
            handle.clear();
        }
        let linger = notice.linger;
        self.current.set(Some(notice));
        let current = self.current;
        let handle = set_timeout_with_handle(move || current.set(None), linger)
            .map_err(|e| log::warn!("couldn't schedule toast dismissal: {e:?}"))
            .ok();
        self.dismiss.set_value(handle);
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    view! {
        <div
            id="toast"
            role="status"
            aria-live="polite"
            class=move || match toasts.current.get() {
                Some(notice) => format!("toast show {}", notice.tone.class()),
                None => "toast".to_string(),
            }
        >
            {move || toasts.current.get().map(|notice| notice.message)}
        </div>
    }
}
