use std::time::Duration;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modal::MediaDescriptor;

#[derive(Embed)]
#[folder = "content"]
pub struct Content;

const SITE_FILE: &str = "site.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Site configuration not found")]
    Missing,
    #[error("Couldn't parse site configuration: {0}")]
    Parse(String),
    #[error("Typing effect needs at least one phrase")]
    NoPhrases,
    #[error("Phrase {0} is empty")]
    EmptyPhrase(usize),
    #[error("Deleting interval ({deleting:?}) must not be slower than typing interval ({typing:?})")]
    DeletingSlowerThanTyping { typing: Duration, deleting: Duration },
}

/// Raw typing effect settings as written in `site.json`.
///
/// Converted into a validated [`crate::typing::TypingConfig`] with `TryFrom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingSettings {
    pub phrases: Vec<String>,
    pub typing_interval_ms: u64,
    pub deleting_interval_ms: u64,
    pub hold_at_full_ms: u64,
    pub hold_at_empty_ms: u64,
    pub start_delay_ms: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub pause_on_first_interaction: bool,
    pub freeze_text: Option<String>,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            phrases: Vec::new(),
            typing_interval_ms: 100,
            deleting_interval_ms: 50,
            hold_at_full_ms: 2000,
            hold_at_empty_ms: 500,
            start_delay_ms: 1000,
            looping: true,
            pause_on_first_interaction: false,
            freeze_text: None,
        }
    }
}

impl TypingSettings {
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Element ids and selectors the interactive components attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountPoints {
    pub typed_text_id: String,
    pub overlay_id: String,
    pub media_mount_id: String,
    pub close_selector: String,
}

impl Default for MountPoints {
    fn default() -> Self {
        Self {
            typed_text_id: "typed-text".to_string(),
            overlay_id: "demo-modal".to_string(),
            media_mount_id: "demo-media".to_string(),
            close_selector: ".modal-close".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub demo: Option<MediaDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub mail_subject: Option<String>,
    pub typing: TypingSettings,
    pub mounts: MountPoints,
    pub stats: Vec<Stat>,
    pub projects: Vec<Project>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
            tagline: String::new(),
            email: String::new(),
            mail_subject: None,
            typing: TypingSettings::with_phrases(["Portfolio"]),
            mounts: MountPoints::default(),
            stats: Vec::new(),
            projects: Vec::new(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads the embedded `site.json`.
    pub fn load() -> Result<Self, ConfigError> {
        let file = Content::get(SITE_FILE).ok_or(ConfigError::Missing)?;
        let raw = std::str::from_utf8(&file.data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_json(raw)
    }

    /// Like [`SiteConfig::load`], but a broken file degrades to the defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("using default site configuration: {e}");
            Self::default()
        })
    }
}
