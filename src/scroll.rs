use std::time::Duration;

/// Height of the fixed header that anchor targets must clear.
pub const HEADER_OFFSET: f64 = 80.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const RESIZE_SETTLE: Duration = Duration::from_millis(400);
pub const RESIZE_STOPPER_CLASS: &str = "resize-animation-stopper";

/// Element id an in-page link points at. A bare `#` points nowhere.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_top_for(offset_top: f64) -> f64 {
    (offset_top - HEADER_OFFSET).max(0.0)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}
