//! User group and permission types for the admin panel.

use serde::{Deserialize, Serialize};

use crate::id::{GroupId, PermissionId};

// ─── Permission ──────────────────────────────────────────────────────────────

/// An entry in the fixed permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
  pub id:    PermissionId,
  pub label: String,
}

impl Permission {
  pub fn new(id: impl Into<PermissionId>, label: impl Into<String>) -> Self {
    Self { id: id.into(), label: label.into() }
  }
}

// ─── UserGroup ───────────────────────────────────────────────────────────────

/// A named set of users sharing the same permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
  pub id:           GroupId,
  pub name:         String,
  pub description:  String,
  /// Reported membership size. Not recomputed in this scope.
  pub member_count: u32,
  /// Granted permissions. Every id must exist in the permission catalog.
  pub permissions:  Vec<PermissionId>,
}

impl UserGroup {
  /// Whether the group grants the given permission.
  pub fn has_permission(&self, permission: &PermissionId) -> bool {
    self.permissions.contains(permission)
  }
}
