//! Lead types — a prospective sales opportunity tracked through the
//! pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::id::{AgentId, LeadId};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Pipeline position of a lead.
///
/// Variant order is the canonical display order (`new` first, `closed`
/// last). Transitions are not restricted: a lead may move between any two
/// statuses by direct edit.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeadStatus {
  New,
  Contacted,
  Qualified,
  Proposal,
  Closed,
}

impl LeadStatus {
  /// Whether the lead has reached the end of the pipeline.
  pub fn is_closed(&self) -> bool { matches!(self, Self::Closed) }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A prospective sales opportunity.
///
/// The assignee is referenced by [`AgentId`] only; the agent's display name
/// is joined at read time (see [`crate::view::LeadView`]), so there is no
/// stored copy to keep in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
  pub id:                 LeadId,
  pub company:            String,
  pub contact:            String,
  pub email:              Option<String>,
  pub phone:              Option<String>,
  /// Profile URL, if the contact shared one.
  pub linkedin:           Option<String>,
  /// Expected deal value in whole dollars.
  pub value:              u64,
  pub status:             LeadStatus,
  pub assigned_to:        AgentId,
  pub meeting_time:       Option<DateTime<Utc>>,
  /// Free-text working notes.
  pub notes:              Option<String>,
  /// Research snippets surfaced ahead of the call, in capture order.
  pub intelligence_notes: Vec<String>,
  /// Questions the buyer raised, in capture order.
  pub buyer_questions:    Vec<String>,
}

// ─── NewLead ─────────────────────────────────────────────────────────────────

/// Input to `Registry::add_lead`. The id is assigned by the registry.
#[derive(Debug, Clone)]
pub struct NewLead {
  pub company:            String,
  pub contact:            String,
  pub email:              Option<String>,
  pub phone:              Option<String>,
  pub linkedin:           Option<String>,
  pub value:              u64,
  pub status:             LeadStatus,
  pub assigned_to:        AgentId,
  pub meeting_time:       Option<DateTime<Utc>>,
  pub notes:              Option<String>,
  pub intelligence_notes: Vec<String>,
  pub buyer_questions:    Vec<String>,
}

impl NewLead {
  /// Convenience constructor with all optional fields empty and status
  /// `new`.
  pub fn new(
    company: impl Into<String>,
    contact: impl Into<String>,
    value: u64,
    assigned_to: AgentId,
  ) -> Self {
    Self {
      company: company.into(),
      contact: contact.into(),
      email: None,
      phone: None,
      linkedin: None,
      value,
      status: LeadStatus::New,
      assigned_to,
      meeting_time: None,
      notes: None,
      intelligence_notes: Vec::new(),
      buyer_questions: Vec::new(),
    }
  }
}
