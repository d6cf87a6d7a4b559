//! Transient toast-style messages shown in the footer.

use crate::consts::cli_consts::notice;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    shown_at: Instant,
    duration: Duration,
}

impl Notice {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn short(text: impl Into<String>) -> Self {
        Self::new(text, notice::short())
    }

    pub fn long(text: impl Into<String>) -> Self {
        Self::new(text, notice::long())
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.duration
    }
}
