//! Demo/video overlay: mounts remote media, traps keyboard focus while open and
//! puts the page back exactly as it was on close.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Third-party player in an iframe.
    Embed,
    /// Native `<video>` element.
    InlinePlayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub kind: MediaKind,
    pub source: String,
    #[serde(default)]
    pub title: String,
}

impl MediaDescriptor {
    pub fn embed(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Embed,
            source: source.into(),
            title: title.into(),
        }
    }

    pub fn inline_player(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::InlinePlayer,
            source: source.into(),
            title: title.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    #[error("Modal overlay or media mount is missing")]
    MissingTarget,
    #[error("Media source is empty")]
    EmptySource,
}

/// The page surrounding the overlay.
pub trait ModalHost {
    type Element: Clone;
    type Media;

    /// Overlay root and media mount both exist.
    fn has_mounts(&self) -> bool;
    fn focused(&self) -> Option<Self::Element>;
    /// Focusable elements outside the overlay, in document order.
    fn focusables_outside(&self) -> Vec<Self::Element>;
    /// Raw `tabindex` attribute, `None` when absent.
    fn tab_index(&self, el: &Self::Element) -> Option<String>;
    fn set_tab_index(&self, el: &Self::Element, value: Option<&str>);
    fn mount(&self, media: &MediaDescriptor) -> Option<Self::Media>;
    /// Removing the element is what stops playback.
    fn unmount(&self, media: Self::Media);
    fn set_visible(&self, visible: bool);
    fn set_scroll_locked(&self, locked: bool);
    fn focus_close_control(&self);
    fn can_focus(&self, el: &Self::Element) -> bool;
    fn focus(&self, el: &Self::Element);
}

#[derive(Debug, Clone)]
pub struct SuppressedTab<E> {
    pub element: E,
    pub original: Option<String>,
}

pub struct OpenModal<H: ModalHost> {
    media: H::Media,
    descriptor: MediaDescriptor,
    prior_focus: Option<H::Element>,
    suppressed: Vec<SuppressedTab<H::Element>>,
}

pub enum ModalState<H: ModalHost> {
    Closed,
    Open(OpenModal<H>),
}

pub struct ModalController<H: ModalHost> {
    host: H,
    state: ModalState<H>,
}

const REVOKED_TAB_INDEX: &str = "-1";

impl<H: ModalHost> ModalController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: ModalState::Closed,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn current(&self) -> Option<&MediaDescriptor> {
        match &self.state {
            ModalState::Open(open) => Some(&open.descriptor),
            ModalState::Closed => None,
        }
    }

    pub fn open(&mut self, descriptor: MediaDescriptor) -> Result<(), ModalError> {
        if descriptor.source.trim().is_empty() {
            return Err(ModalError::EmptySource);
        }
        if !self.host.has_mounts() {
            return Err(ModalError::MissingTarget);
        }

        if let ModalState::Open(open) = &mut self.state {
            // swap media in place, keeping the focus record and suppressed list
            let Some(media) = self.host.mount(&descriptor) else {
                return Err(ModalError::MissingTarget);
            };
            let old = std::mem::replace(&mut open.media, media);
            self.host.unmount(old);
            open.descriptor = descriptor;
            log::debug!("demo modal media replaced");
            return Ok(());
        }

        let prior_focus = self.host.focused();
        let Some(media) = self.host.mount(&descriptor) else {
            return Err(ModalError::MissingTarget);
        };
        let suppressed = self
            .host
            .focusables_outside()
            .into_iter()
            .map(|element| {
                let original = self.host.tab_index(&element);
                self.host.set_tab_index(&element, Some(REVOKED_TAB_INDEX));
                SuppressedTab { element, original }
            })
            .collect();
        self.host.set_visible(true);
        self.host.set_scroll_locked(true);
        self.host.focus_close_control();
        self.state = ModalState::Open(OpenModal {
            media,
            descriptor,
            prior_focus,
            suppressed,
        });
        Ok(())
    }

    /// Returns whether anything was closed.
    pub fn close(&mut self) -> bool {
        let ModalState::Open(open) = std::mem::replace(&mut self.state, ModalState::Closed) else {
            return false;
        };
        self.host.unmount(open.media);
        for SuppressedTab { element, original } in &open.suppressed {
            self.host.set_tab_index(element, original.as_deref());
        }
        self.host.set_visible(false);
        self.host.set_scroll_locked(false);
        if let Some(prior) = open.prior_focus {
            if self.host.can_focus(&prior) {
                self.host.focus(&prior);
            }
        }
        true
    }

    /// Escape closes an open modal; every other key, and any key while
    /// closed, is ignored.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }

    /// `hit_backdrop` is true only when the click target is the backdrop
    /// itself rather than the media or anything inside it.
    pub fn handle_backdrop_click(&mut self, hit_backdrop: bool) -> bool {
        hit_backdrop && self.close()
    }
}
