use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Info => "bg-accent",
            Tone::Success => "bg-success",
        }
    }
}

/// Short status message shown in the toast and dismissed after `linger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub tone: Tone,
    pub linger: Duration,
}

const COPY_LINGER: Duration = Duration::from_millis(2000);
const FORM_LINGER: Duration = Duration::from_millis(3000);

impl Notice {
    pub fn email_copied() -> Self {
        Self {
            message: "Email copied to clipboard!".to_string(),
            tone: Tone::Info,
            linger: COPY_LINGER,
        }
    }

    pub fn opening_mail_client() -> Self {
        Self {
            message: "Couldn't copy, opening your mail client…".to_string(),
            tone: Tone::Info,
            linger: COPY_LINGER,
        }
    }

    pub fn message_sent() -> Self {
        Self {
            message: "Message sent successfully!".to_string(),
            tone: Tone::Success,
            linger: FORM_LINGER,
        }
    }
}
