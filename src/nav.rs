/// Viewport width above which the full navigation bar is shown.
pub const DESKTOP_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkFollowed,
    OutsideClick,
    Escape,
    Resized { width: f64 },
}

/// Mobile navigation drawer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn apply(self, event: MenuEvent) -> Self {
        let open = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::LinkFollowed | MenuEvent::OutsideClick | MenuEvent::Escape => false,
            MenuEvent::Resized { width } => self.open && width <= DESKTOP_BREAKPOINT,
        };
        Self { open }
    }

    pub fn icon_class(self) -> &'static str {
        if self.open {
            "fas fa-times"
        } else {
            "fas fa-bars"
        }
    }
}
