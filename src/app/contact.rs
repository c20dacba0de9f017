use leptos::{
    ev::{MouseEvent, SubmitEvent},
    html,
    prelude::*,
    task::spawn_local,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement};

use crate::clipboard::{CopyError, CopyTarget, EmailCopier};
use crate::config::SiteConfig;
use crate::notice::Notice;

use super::dom;
use super::reveal::Reveal;
use super::toast::Toasts;

fn js_err(e: JsValue) -> CopyError {
    CopyError::CopyCommandFailed(format!("{e:?}"))
}

/// Clipboard API first, `execCommand("copy")` where it is missing.
struct BrowserCopy {
    toasts: Toasts,
}

impl BrowserCopy {
    fn clipboard() -> Option<Clipboard> {
        let navigator = web_sys::window()?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        Some(clipboard.unchecked_into())
    }

    fn exec_copy(text: &str) -> Result<(), CopyError> {
        let document = dom::document().ok_or(CopyError::ClipboardUnavailable)?;
        let body = document.body().ok_or(CopyError::ClipboardUnavailable)?;
        let html_document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| CopyError::ClipboardUnavailable)?;
        let area = document
            .create_element("textarea")
            .map_err(js_err)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| CopyError::ClipboardUnavailable)?;
        area.set_value(text);
        let _ = area.set_attribute("readonly", "");
        let _ = area.style().set_property("position", "fixed");
        let _ = area.style().set_property("opacity", "0");
        body.append_child(&area).map_err(js_err)?;
        area.select();
        let copied = html_document.exec_command("copy");
        area.remove();
        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(CopyError::CopyCommandFailed(
                "execCommand(\"copy\") returned false".to_string(),
            )),
            Err(e) => Err(js_err(e)),
        }
    }
}

impl CopyTarget for BrowserCopy {
    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        match Self::clipboard() {
            Some(clipboard) => JsFuture::from(clipboard.write_text(text))
                .await
                .map(|_| ())
                .map_err(js_err),
            None => Self::exec_copy(text),
        }
    }

    fn notify(&self, notice: Notice) {
        self.toasts.show(notice);
    }

    fn open_mail(&self, href: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(href) {
            log::warn!("couldn't open mail client: {e:?}");
        }
    }
}

#[component]
pub fn ContactSection() -> impl IntoView {
    let config = expect_context::<SiteConfig>();
    let toasts = expect_context::<Toasts>();
    let copier = EmailCopier::new(config.email.clone(), config.mail_subject.clone());
    let href = copier.href();
    let address = copier.address().to_string();
    let form_ref = NodeRef::<html::Form>::new();

    let on_email = move |ev: MouseEvent| {
        ev.prevent_default();
        let copier = copier.clone();
        spawn_local(async move {
            copier.copy(&BrowserCopy { toasts }).await;
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(form) = form_ref.get_untracked() else {
            return;
        };
        // nothing is sent anywhere; the form is acknowledged and cleared
        log::info!("contact form acknowledged");
        form.reset();
        toasts.show(Notice::message_sent());
    };

    view! {
        <section id="contact" class="w-full max-w-6xl px-4 py-16">
            <h2 class="text-3xl font-bold mb-8 text-center">"Get in Touch"</h2>
            <div class="grid gap-6 md:grid-cols-3 mb-12">
                <Reveal class="contact-card p-6 rounded-lg border border-muted/30 text-center">
                    <i class="fas fa-envelope text-2xl text-cyan mb-2"></i>
                    <h3 class="font-bold mb-1">"Email"</h3>
                    <a
                        href=href
                        class="contact-link text-cyan hover:underline"
                        title="Click to copy"
                        on:click=on_email
                    >
                        {address}
                    </a>
                </Reveal>
                <Reveal class="contact-card p-6 rounded-lg border border-muted/30 text-center">
                    <i class="fab fa-github text-2xl text-cyan mb-2"></i>
                    <h3 class="font-bold mb-1">"GitHub"</h3>
                    <p class="text-muted">"Code for every project above"</p>
                </Reveal>
                <Reveal class="contact-card p-6 rounded-lg border border-muted/30 text-center">
                    <i class="fas fa-location-dot text-2xl text-cyan mb-2"></i>
                    <h3 class="font-bold mb-1">"Location"</h3>
                    <p class="text-muted">"Open to remote work"</p>
                </Reveal>
            </div>
            <form
                id="contactForm"
                node_ref=form_ref
                class="max-w-2xl mx-auto flex flex-col gap-4"
                on:submit=on_submit
            >
                <input
                    name="name"
                    type="text"
                    required=true
                    placeholder="Your name"
                    class="px-4 py-2 rounded-md border bg-background text-base"
                />
                <input
                    name="email"
                    type="email"
                    required=true
                    placeholder="Your email"
                    class="px-4 py-2 rounded-md border bg-background text-base"
                />
                <textarea
                    name="message"
                    rows="5"
                    required=true
                    placeholder="Your message"
                    class="px-4 py-2 rounded-md border bg-background text-base"
                ></textarea>
                <button
                    type="submit"
                    class="px-6 py-3 bg-cyan/20 hover:bg-cyan/30 text-cyan rounded-md border border-cyan/30 transition-all duration-200"
                >
                    "Send Message"
                </button>
            </form>
        </section>
    }
}
