#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod clipboard;
pub mod config;
pub mod modal;
pub mod nav;
pub mod notice;
pub mod scheduler;
pub mod scroll;
pub mod typing;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).expect("should be able to initialize console logger");
    leptos::mount::hydrate_body(App);
}
