//! Error types for `funnel-core`.
//!
//! Nothing here is fatal: validation failures block the offending save,
//! dangling references make the operation a no-op on its target, and lookup
//! misses are surfaced to the caller. There is no I/O, so there is no retry
//! taxonomy.

use thiserror::Error;

use crate::id::{
  AgentId, CompanyId, FeatureId, GroupId, LeadId, NoteId, PermissionId,
  UserId,
};

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was empty after trimming. Blocks the save; the
  /// collection is left untouched.
  #[error("{field} is required")]
  MissingField { field: &'static str },

  /// A lead referenced an agent id that does not resolve.
  #[error("unknown agent: {0}")]
  UnknownAgent(AgentId),

  /// A company referenced a feature id outside the catalog.
  #[error("unknown feature: {0}")]
  UnknownFeature(FeatureId),

  /// A group referenced a permission id outside the catalog.
  #[error("unknown permission: {0}")]
  UnknownPermission(PermissionId),

  #[error("lead not found: {0}")]
  LeadNotFound(LeadId),

  #[error("agent not found: {0}")]
  AgentNotFound(AgentId),

  #[error("company not found: {0}")]
  CompanyNotFound(CompanyId),

  #[error("call note not found: {0}")]
  NoteNotFound(NoteId),

  #[error("user group not found: {0}")]
  GroupNotFound(GroupId),

  #[error("user not found: {0}")]
  UserNotFound(UserId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
