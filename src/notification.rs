// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the payload-carrying types that flow between
//! callers, the [`crate::manager::Manager`], and subscribers:
//!
//! - [`Notification`] - what a caller hands to `add` (no id yet)
//! - [`ActiveNotification`] - the snapshot subscribers receive
//! - [`Expiry`] - finite-or-unbounded display duration
//! - [`Severity`] - caller-facing discriminant for styling
//!
//! The message payload is generic: the manager never looks inside it, so
//! callers can carry plain strings or any richer structure, which is also
//! the extension point for additional caller-defined metadata.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for a notification.
///
/// Assigned by the manager at creation from its [`crate::id::IdGenerator`]
/// and never reused within the manager's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Severity level for visual styling.
///
/// The manager treats this as an opaque discriminant: display duration
/// comes from [`Expiry`] and the configuration, never from the severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention.
    Error,
}

/// How long a notification stays active before auto-expiry.
///
/// A tagged sum instead of an overloaded number: the original design
/// mixed milliseconds, `Infinity`, and `null` in one field and had to
/// coerce the infinite case to zero with a runtime warning. Here the
/// "never auto-expire" case is its own variant and gets no timer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Auto-expire after this duration. Zero expires on the next tick.
    Finite(Duration),
    /// Never auto-expire; the notification stays until closed or removed.
    Unbounded,
}

impl Expiry {
    /// Finite expiry from milliseconds.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Expiry::Finite(Duration::from_millis(ms))
    }

    /// Returns `true` for [`Expiry::Unbounded`].
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Expiry::Unbounded)
    }
}

/// Serialized as integer milliseconds, or the string `"never"` for
/// [`Expiry::Unbounded`] (TOML has no null).
impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expiry::Finite(duration) => serializer.serialize_u64(duration.as_millis() as u64),
            Expiry::Unbounded => serializer.serialize_str("never"),
        }
    }
}

struct ExpiryVisitor;

impl Visitor<'_> for ExpiryVisitor {
    type Value = Expiry;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a duration in milliseconds or the string \"never\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Expiry, E> {
        Ok(Expiry::from_millis(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Expiry, E> {
        u64::try_from(value)
            .map(Expiry::from_millis)
            .map_err(|_| E::custom("duration must not be negative"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Expiry, E> {
        if value == "never" {
            Ok(Expiry::Unbounded)
        } else {
            Err(E::custom(format!(
                "unknown duration keyword {value:?}, expected \"never\""
            )))
        }
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExpiryVisitor)
    }
}

/// A notification as handed to [`crate::manager::Manager::add`].
///
/// Carries no id; the manager assigns one. The expiry is optional - when
/// absent, the manager's configured default applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification<M> {
    severity: Severity,
    message: M,
    expiry: Option<Expiry>,
}

impl<M> Notification<M> {
    /// Creates a notification with the given severity and message.
    pub fn new(severity: Severity, message: M) -> Self {
        Self {
            severity,
            message,
            expiry: None,
        }
    }

    /// Creates an info notification.
    pub fn info(message: M) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Creates a success notification.
    pub fn success(message: M) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Creates a warning notification.
    pub fn warning(message: M) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates an error notification.
    pub fn error(message: M) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Overrides the manager's default expiry for this notification.
    #[must_use]
    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message payload.
    pub fn message(&self) -> &M {
        &self.message
    }

    /// Returns the per-notification expiry override, if any.
    #[must_use]
    pub fn expiry(&self) -> Option<Expiry> {
        self.expiry
    }

    pub(crate) fn into_parts(self) -> (Severity, M, Option<Expiry>) {
        (self.severity, self.message, self.expiry)
    }
}

/// Whether an active notification still occupies its slot as live or has
/// expired but is retained (static mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Visible and counted against the admission limit.
    Active,
    /// Expired or closed, retained until unmounted.
    Inactive,
}

/// Snapshot of a notification occupying an active slot.
///
/// Subscribers receive lists of these from the manager's store. The
/// fields are read-only from the outside; all mutation goes through the
/// manager, which builds a fresh snapshot list for every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNotification<M> {
    id: NotificationId,
    severity: Severity,
    message: M,
    expiry: Expiry,
    status: Status,
    is_paused: bool,
    /// Static-mode behavior captured at admission; reconfiguring the
    /// manager must not change how in-flight notifications wind down.
    static_mode: bool,
}

impl<M> ActiveNotification<M> {
    pub(crate) fn new(
        id: NotificationId,
        severity: Severity,
        message: M,
        expiry: Expiry,
        static_mode: bool,
    ) -> Self {
        Self {
            id,
            severity,
            message,
            expiry,
            status: Status::Active,
            is_paused: false,
            static_mode,
        }
    }

    /// Returns the notification's unique id.
    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message payload.
    pub fn message(&self) -> &M {
        &self.message
    }

    /// Returns the resolved expiry (per-notification override or the
    /// config default in force when it was added).
    #[must_use]
    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` while the caller has paused this notification's
    /// timer.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub(crate) fn is_static(&self) -> bool {
        self.static_mode
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_the_severity() {
        assert_eq!(Notification::info("m").severity(), Severity::Info);
        assert_eq!(Notification::success("m").severity(), Severity::Success);
        assert_eq!(Notification::warning("m").severity(), Severity::Warning);
        assert_eq!(Notification::error("m").severity(), Severity::Error);
    }

    #[test]
    fn expiry_defaults_to_none() {
        assert_eq!(Notification::info("m").expiry(), None);
    }

    #[test]
    fn with_expiry_overrides_the_default() {
        let n = Notification::info("m").with_expiry(Expiry::from_millis(250));
        assert_eq!(n.expiry(), Some(Expiry::from_millis(250)));
    }

    #[test]
    fn message_payload_is_opaque() {
        #[derive(Debug, Clone, PartialEq)]
        struct Payload {
            text: &'static str,
            dismiss_label: &'static str,
        }

        let n = Notification::warning(Payload {
            text: "disk almost full",
            dismiss_label: "ok",
        });
        assert_eq!(n.message().text, "disk almost full");
    }

    #[test]
    fn expiry_serializes_as_millis_or_never() {
        #[derive(Serialize)]
        struct Wrapper {
            duration: Expiry,
        }

        let finite = toml::to_string(&Wrapper {
            duration: Expiry::from_millis(6000),
        })
        .unwrap();
        assert_eq!(finite.trim(), "duration = 6000");

        let unbounded = toml::to_string(&Wrapper {
            duration: Expiry::Unbounded,
        })
        .unwrap();
        assert_eq!(unbounded.trim(), "duration = \"never\"");
    }

    #[test]
    fn expiry_deserializes_from_millis_or_never() {
        #[derive(Deserialize)]
        struct Wrapper {
            duration: Expiry,
        }

        let finite: Wrapper = toml::from_str("duration = 1500").unwrap();
        assert_eq!(finite.duration, Expiry::from_millis(1500));

        let unbounded: Wrapper = toml::from_str("duration = \"never\"").unwrap();
        assert_eq!(unbounded.duration, Expiry::Unbounded);
    }

    #[test]
    fn expiry_rejects_unknown_keywords_and_negatives() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            duration: Expiry,
        }

        assert!(toml::from_str::<Wrapper>("duration = \"forever\"").is_err());
        assert!(toml::from_str::<Wrapper>("duration = -1").is_err());
    }
}
