use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::scroll::{anchor_id, scroll_top_for};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn smooth_scroll_to(top: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_to_top() {
    smooth_scroll_to(0.0);
}

/// Smooth-scrolls to the element an in-page link points at, leaving room for
/// the fixed header. Returns false when there is nothing to scroll to.
pub fn scroll_to_anchor(href: &str) -> bool {
    let Some(target) = anchor_id(href)
        .and_then(by_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };
    smooth_scroll_to(scroll_top_for(target.offset_top() as f64));
    true
}
