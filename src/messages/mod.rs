//! One-shot user notifications.
//!
//! # Data Flow
//! ```text
//! handler queues Message(s) on its Reply
//!     → redirect: pending + queued are signed into the `messages` cookie
//!     → next request: cookie.rs verifies and decodes them (PendingMessages)
//!     → rendered page: pending + queued are shown, cookie is cleared
//! ```
//!
//! # Design Decisions
//! - Stored client side; the server keeps no session state
//! - HMAC-SHA256 signed so clients cannot forge notices
//! - A cookie that fails verification is dropped, never an error page

pub mod cookie;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cookie::{MessageError, MessageSigner, PendingMessages, COOKIE_NAME};

/// Message severity, also used as the CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A notification shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Level::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Level::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Level::Error, text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
