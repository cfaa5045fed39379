//! Outbound events queued by the service for the presentation shell.
//!
//! # Invariants
//! - Events are emitted synchronously by the mutation that caused them.
//! - Timed dismissal is owned by the shell; the core only exports durations.

use crate::achievement::Achievement;

/// How long the shell keeps a notification visible.
pub const NOTIFICATION_DISMISS_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    Notification(Notification),
    AchievementUnlocked(Achievement),
    /// Start the celebration overlay.
    Celebrate,
}

impl CoreEvent {
    pub fn notification(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self::Notification(Notification {
            kind,
            message: message.into(),
        })
    }
}
