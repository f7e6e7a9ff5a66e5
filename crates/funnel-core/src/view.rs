//! Materialised read models — never stored, always derived.
//!
//! Views join across collections at read time. In particular the assignee's
//! display name lives only on the agent record; [`LeadView`] carries the
//! resolved agent so there is no cached name on the lead to fall out of
//! sync.

use serde::{Deserialize, Serialize};

use crate::{agent::Agent, lead::Lead};

// ─── LeadView ────────────────────────────────────────────────────────────────

/// A lead with its assignee resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadView {
  pub lead:  Lead,
  pub agent: Agent,
}

impl LeadView {
  /// Display name of the assigned agent.
  pub fn assigned_to_name(&self) -> &str { &self.agent.name }
}

// ─── AdminSummary ────────────────────────────────────────────────────────────

/// Quick stats for the admin panel header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
  pub total_companies: usize,
  /// Sum of the companies' reported seat counts.
  pub total_users:     u32,
  /// Size of the feature catalog.
  pub total_features:  usize,
}

// ─── ClosedReport ────────────────────────────────────────────────────────────

/// Closed-deal totals for one weekday of the reporting week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayTotal {
  /// Three-letter weekday label, `"Mon"` through `"Fri"`.
  pub day:     String,
  pub closed:  u32,
  pub revenue: u64,
}

/// Performance overview of one agent's closed deals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedReport {
  pub agent:              Agent,
  pub total_closed:       usize,
  /// Cumulative value of all closed deals, in whole dollars.
  pub total_revenue:      u64,
  /// `total_revenue / total_closed`, rounded down; zero when nothing has
  /// closed.
  pub average_deal_value: u64,
  /// Monday through Friday buckets, keyed off each deal's meeting time.
  pub weekly:             Vec<WeekdayTotal>,
  /// The most recently recorded closed deals, newest first, at most five.
  pub recent:             Vec<LeadView>,
}
