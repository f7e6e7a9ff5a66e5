//! The notification contract between the registry and its presentation
//! layer.
//!
//! Every mutation produces exactly one user-facing notification: a success
//! message on commit, an error message when validation or a reference check
//! rejects the change. Delivery is fire-and-forget — the registry never
//! waits on, or hears back from, the sink.

use serde::{Deserialize, Serialize};

// ─── Notification ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
  Success,
  Error,
}

/// A one-shot, user-facing message emitted alongside a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub kind:    NotificationKind,
  pub message: String,
}

impl Notification {
  pub fn success(message: impl Into<String>) -> Self {
    Self { kind: NotificationKind::Success, message: message.into() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { kind: NotificationKind::Error, message: message.into() }
  }
}

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Receives notifications from the registry.
///
/// Implemented by the presentation layer (a console printer in the CLI, a
/// recording buffer in tests). Must not panic; the registry does not guard
/// against sink failures.
pub trait NotificationSink {
  fn notify(&self, notification: Notification);
}

/// Default sink: forwards notifications to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
  fn notify(&self, notification: Notification) {
    match notification.kind {
      NotificationKind::Success => tracing::info!("{}", notification.message),
      NotificationKind::Error => tracing::warn!("{}", notification.message),
    }
  }
}
