use leptos::{ev::MouseEvent, prelude::*};
use leptos_use::{use_document, use_event_listener};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlIFrameElement, HtmlVideoElement};

use crate::config::{MountPoints, SiteConfig};
use crate::modal::{MediaDescriptor, MediaKind, ModalController, ModalHost};

use super::dom;

const FOCUSABLE: &str = "a[href], area[href], button, input, select, textarea, iframe, \
                         video[controls], [tabindex], [contenteditable='true']";
const EMBED_ALLOW: &str = "autoplay; encrypted-media; picture-in-picture; fullscreen";
const OPEN_CLASS: &str = "open";
const SCROLL_LOCK_CLASS: &str = "modal-open";

/// [`ModalHost`] over the live document, resolving mount points by id on each
/// call.
pub struct DomModalHost {
    mounts: MountPoints,
}

impl DomModalHost {
    pub fn new(mounts: MountPoints) -> Self {
        Self { mounts }
    }

    fn overlay(&self) -> Option<Element> {
        dom::by_id(&self.mounts.overlay_id)
    }

    fn media_mount(&self) -> Option<Element> {
        dom::by_id(&self.mounts.media_mount_id)
    }

    fn create_media(&self, media: &MediaDescriptor) -> Option<Element> {
        let document = dom::document()?;
        let el: Element = match media.kind {
            MediaKind::Embed => {
                let frame = document
                    .create_element("iframe")
                    .ok()?
                    .dyn_into::<HtmlIFrameElement>()
                    .ok()?;
                frame.set_allow(EMBED_ALLOW);
                frame.set_allow_fullscreen(true);
                frame.set_title(&media.title);
                frame.set_src(&media.source);
                frame.into()
            }
            MediaKind::InlinePlayer => {
                let video = document
                    .create_element("video")
                    .ok()?
                    .dyn_into::<HtmlVideoElement>()
                    .ok()?;
                video.set_controls(true);
                video.set_autoplay(true);
                // not exposed as a property in every browser
                video.set_attribute("playsinline", "").ok()?;
                video.set_attribute("aria-label", &media.title).ok()?;
                video.set_src(&media.source);
                video.into()
            }
        };
        el.set_attribute("class", "modal-media w-full aspect-video rounded-md")
            .ok()?;
        Some(el)
    }
}

impl ModalHost for DomModalHost {
    type Element = HtmlElement;
    type Media = Element;

    fn has_mounts(&self) -> bool {
        self.overlay().is_some() && self.media_mount().is_some()
    }

    fn focused(&self) -> Option<HtmlElement> {
        dom::document()?
            .active_element()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn focusables_outside(&self) -> Vec<HtmlElement> {
        let (Some(document), Some(overlay)) = (dom::document(), self.overlay()) else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all(FOCUSABLE) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter(|node| !overlay.contains(Some(node)))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn tab_index(&self, el: &HtmlElement) -> Option<String> {
        el.get_attribute("tabindex")
    }

    fn set_tab_index(&self, el: &HtmlElement, value: Option<&str>) {
        let res = match value {
            Some(v) => el.set_attribute("tabindex", v),
            None => el.remove_attribute("tabindex"),
        };
        if let Err(e) = res {
            log::debug!("couldn't update tabindex: {e:?}");
        }
    }

    fn mount(&self, media: &MediaDescriptor) -> Option<Element> {
        let mount = self.media_mount()?;
        let el = self.create_media(media)?;
        mount.append_child(&el).ok()?;
        Some(el)
    }

    fn unmount(&self, media: Element) {
        media.remove();
    }

    fn set_visible(&self, visible: bool) {
        let Some(overlay) = self.overlay() else {
            return;
        };
        let _ = overlay.set_attribute("aria-hidden", if visible { "false" } else { "true" });
        let _ = overlay.class_list().toggle_with_force(OPEN_CLASS, visible);
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = dom::body() {
            let _ = body.class_list().toggle_with_force(SCROLL_LOCK_CLASS, locked);
        }
    }

    fn focus_close_control(&self) {
        let close = self
            .overlay()
            .and_then(|overlay| overlay.query_selector(&self.mounts.close_selector).ok())
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(close) = close {
            let _ = close.focus();
        }
    }

    fn can_focus(&self, el: &HtmlElement) -> bool {
        el.is_connected() && !el.has_attribute("disabled")
    }

    fn focus(&self, el: &HtmlElement) {
        let _ = el.focus();
    }
}

/// Shared handle page controls use to drive the demo overlay. The controller
/// only exists in the browser; on the server every call is a no-op.
#[derive(Clone, Copy)]
pub struct DemoModalHandle {
    #[cfg(feature = "hydrate")]
    controller: StoredValue<ModalController<DomModalHost>, LocalStorage>,
}

impl DemoModalHandle {
    pub fn provide(mounts: MountPoints) -> Self {
        #[cfg(not(feature = "hydrate"))]
        let _ = mounts;
        let handle = Self {
            #[cfg(feature = "hydrate")]
            controller: StoredValue::new_local(ModalController::new(DomModalHost::new(mounts))),
        };
        provide_context(handle);
        handle
    }

    fn with_controller(&self, f: impl FnOnce(&mut ModalController<DomModalHost>)) {
        #[cfg(feature = "hydrate")]
        self.controller.update_value(f);
        #[cfg(not(feature = "hydrate"))]
        let _ = f;
    }

    pub fn open(&self, media: MediaDescriptor) {
        self.with_controller(|modal| {
            if let Err(e) = modal.open(media) {
                log::debug!("demo modal not opened: {e}");
            }
        });
    }

    pub fn close(&self) {
        self.with_controller(|modal| {
            modal.close();
        });
    }

    fn handle_key(&self, key: &str) {
        self.with_controller(|modal| {
            modal.handle_key(key);
        });
    }

    fn handle_backdrop_click(&self, hit_backdrop: bool) {
        self.with_controller(|modal| {
            modal.handle_backdrop_click(hit_backdrop);
        });
    }
}

#[component]
pub fn DemoModal() -> impl IntoView {
    let modal = expect_context::<DemoModalHandle>();
    let mounts = expect_context::<SiteConfig>().mounts;
    // the close control is rendered with the configured class selector
    let close_class = format!(
        "{} absolute -top-10 right-0 text-3xl text-foreground hover:text-cyan",
        mounts.close_selector.trim_start_matches('.')
    );

    let _ = use_event_listener(use_document(), leptos::ev::keydown, move |ev| {
        modal.handle_key(&ev.key());
    });

    view! {
        <div
            id=mounts.overlay_id
            class="modal-overlay fixed inset-0 z-50 items-center justify-center bg-black/80 p-4"
            role="dialog"
            aria-modal="true"
            aria-hidden="true"
            aria-label="Project demo"
            on:click=move |ev: MouseEvent| {
                modal.handle_backdrop_click(ev.target() == ev.current_target());
            }
        >
            <div class="modal-content relative w-full max-w-4xl">
                <button
                    type="button"
                    class=close_class
                    aria-label="Close demo"
                    on:click=move |_| modal.close()
                >
                    <i class="fas fa-times"></i>
                </button>
                <div id=mounts.media_mount_id class="modal-media-mount"></div>
            </div>
        </div>
    }
}
