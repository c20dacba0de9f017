//! Copy-the-email-address interaction with a mailto fallback.

use thiserror::Error;

use crate::notice::Notice;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("Clipboard is not available")]
    ClipboardUnavailable,
    #[error("Copy command failed: {0}")]
    CopyCommandFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    FellBack,
}

/// Platform side of the copy flow.
#[allow(async_fn_in_trait)]
pub trait CopyTarget {
    async fn write_text(&self, text: &str) -> Result<(), CopyError>;
    fn notify(&self, notice: Notice);
    fn open_mail(&self, href: &str);
}

/// `mailto:` link with an optional percent-encoded subject.
pub fn mailto_href(address: &str, subject: Option<&str>) -> String {
    match subject.filter(|s| !s.is_empty()) {
        Some(subject) => format!("mailto:{address}?subject={}", urlencoding::encode(subject)),
        None => format!("mailto:{address}"),
    }
}

#[derive(Debug, Clone)]
pub struct EmailCopier {
    address: String,
    subject: Option<String>,
}

impl EmailCopier {
    pub fn new(address: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            address: address.into(),
            subject,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn href(&self) -> String {
        mailto_href(&self.address, self.subject.as_deref())
    }

    /// Tries the clipboard; any failure shows one notice and opens the mail
    /// client once.
    pub async fn copy<T: CopyTarget>(&self, target: &T) -> CopyOutcome {
        match target.write_text(&self.address).await {
            Ok(()) => {
                target.notify(Notice::email_copied());
                CopyOutcome::Copied
            }
            Err(e) => {
                log::warn!("failed to copy email: {e}");
                target.notify(Notice::opening_mail_client());
                target.open_mail(&self.href());
                CopyOutcome::FellBack
            }
        }
    }
}
