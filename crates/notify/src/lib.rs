// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use guidance_desk_domain::Role;
use serde::{Deserialize, Serialize};

/// Severity of a notification, mapped to its visual treatment downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral information (new request in the triage pool).
    Info,
    /// A request was accepted.
    Success,
    /// A request was moved to a new date.
    Warning,
    /// A request was rejected.
    Error,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Parses a severity from its string representation.
    ///
    /// Unknown values fall back to `Info` rather than failing: severity
    /// only affects presentation, never routing.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// An in-app notification record.
///
/// Notifications are addressed either to a specific user
/// (`recipient_id = Some`), to every user holding a role
/// (`recipient_id = None`, `recipient_role = Some`), or to everyone
/// (both `None`). They are append-only; the only mutation is marking
/// them read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The store-assigned identifier.
    /// `None` indicates the notification has not been persisted yet.
    pub id: Option<i64>,
    /// The addressed user, or `None` for a broadcast.
    pub recipient_id: Option<i64>,
    /// The addressed role for role-filtered broadcasts.
    pub recipient_role: Option<Role>,
    /// Short headline.
    pub title: String,
    /// Human-readable body.
    pub message: String,
    /// Presentation severity.
    pub severity: Severity,
    /// Optional in-app link target.
    pub link: Option<String>,
    /// Whether the recipient has read this notification.
    pub read: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl Notification {
    /// Creates a new unread, unpersisted notification.
    ///
    /// # Arguments
    ///
    /// * `recipient_id` - The addressed user, or `None` for a broadcast
    /// * `recipient_role` - The addressed role, or `None` for any role
    /// * `title` - Short headline
    /// * `message` - Human-readable body
    /// * `severity` - Presentation severity
    /// * `link` - Optional in-app link target
    /// * `created_at` - Creation timestamp (RFC 3339)
    #[must_use]
    pub const fn new(
        recipient_id: Option<i64>,
        recipient_role: Option<Role>,
        title: String,
        message: String,
        severity: Severity,
        link: Option<String>,
        created_at: String,
    ) -> Self {
        Self {
            id: None,
            recipient_id,
            recipient_role,
            title,
            message,
            severity,
            link,
            read: false,
            created_at,
        }
    }

    /// Returns true if this notification should be shown to the given user.
    ///
    /// A notification is visible when it is not addressed to a different
    /// user and not addressed to a different role.
    #[must_use]
    pub fn is_visible_to(&self, user_id: i64, role: Role) -> bool {
        if self.recipient_id.is_some_and(|id| id != user_id) {
            return false;
        }
        if self.recipient_role.is_some_and(|r| r != role) {
            return false;
        }
        true
    }
}

/// Errors that can occur while delivering a notification to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The sink failed to store the notification.
    DeliveryFailed(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeliveryFailed(msg) => write!(f, "Notification delivery failed: {msg}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// A destination for notification records.
///
/// The lifecycle engine receives a sink as an explicit capability; it
/// never reaches for ambient delivery state. Delivery is best-effort:
/// callers log sink failures and proceed, and a failed delivery never
/// rolls back the state transition that produced the notification.
pub trait NotificationSink {
    /// Stores a notification and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be stored.
    fn deliver(&mut self, notification: &Notification) -> Result<i64, NotifyError>;
}

/// A sink that collects notifications in memory.
///
/// Used in tests and anywhere delivery does not need to survive a
/// restart.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Delivered notifications, in delivery order.
    pub delivered: Vec<Notification>,
}

impl MemorySink {
    /// Creates a new empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delivered: Vec::new(),
        }
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&mut self, notification: &Notification) -> Result<i64, NotifyError> {
        let id: i64 = i64::try_from(self.delivered.len())
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?
            + 1;
        let mut stored: Notification = notification.clone();
        stored.id = Some(id);
        self.delivered.push(stored);
        Ok(id)
    }
}
