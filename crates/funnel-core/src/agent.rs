//! Agent — a sales representative leads can be assigned to.
//!
//! Agents are referenced, never owned, by [`crate::lead::Lead`]; deleting
//! or renaming an agent is out of scope, so the record is just an id and a
//! display name.

use serde::{Deserialize, Serialize};

use crate::id::AgentId;

/// A sales representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
  pub id:   AgentId,
  pub name: String,
}

impl Agent {
  pub fn new(id: impl Into<AgentId>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into() }
  }
}
