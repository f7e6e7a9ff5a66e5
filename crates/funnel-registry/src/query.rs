//! Filter types for registry list queries.
//!
//! Filters are pure predicates over a single record: free-text terms match
//! case-insensitively as substrings, OR-ed across the record's searchable
//! fields, then intersected (AND) with the structured criteria. Applying
//! the same filter twice with no intervening mutation yields equal result
//! sequences. At this data scale a linear scan is all that is needed.

use chrono::{DateTime, Utc};

use funnel_core::{
  company::Company,
  id::AgentId,
  lead::{Lead, LeadStatus},
  note::CallNote,
};

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ─── LeadFilter ──────────────────────────────────────────────────────────────

/// Parameters for `Registry::leads`.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
  /// Free-text filter over company, contact, and notes.
  pub text:           Option<String>,
  pub status:         Option<LeadStatus>,
  /// Restrict to leads assigned to one agent.
  pub assigned_to:    Option<AgentId>,
  /// Keep only leads with a meeting at or after this instant.
  pub meeting_after:  Option<DateTime<Utc>>,
  /// Keep only leads with a meeting strictly before this instant.
  pub meeting_before: Option<DateTime<Utc>>,
  pub limit:          Option<usize>,
  pub offset:         Option<usize>,
}

impl LeadFilter {
  pub fn matches(&self, lead: &Lead) -> bool {
    if let Some(text) = &self.text {
      let hit = contains_ci(&lead.company, text)
        || contains_ci(&lead.contact, text)
        || lead
          .notes
          .as_deref()
          .is_some_and(|notes| contains_ci(notes, text));
      if !hit {
        return false;
      }
    }

    if let Some(status) = self.status
      && lead.status != status
    {
      return false;
    }

    if let Some(agent) = &self.assigned_to
      && lead.assigned_to != *agent
    {
      return false;
    }

    // A meeting-window criterion excludes leads with no meeting scheduled.
    if self.meeting_after.is_some() || self.meeting_before.is_some() {
      let Some(time) = lead.meeting_time else {
        return false;
      };
      if let Some(after) = self.meeting_after
        && time < after
      {
        return false;
      }
      if let Some(before) = self.meeting_before
        && time >= before
      {
        return false;
      }
    }

    true
  }
}

// ─── NoteFilter ──────────────────────────────────────────────────────────────

/// Parameters for `Registry::notes`.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
  /// Free-text filter over company, contact, and key matches.
  pub text:      Option<String>,
  /// `Some(true)` keeps qualified notes only, `Some(false)` unqualified
  /// only, `None` keeps both.
  pub qualified: Option<bool>,
}

impl NoteFilter {
  pub fn matches(&self, note: &CallNote) -> bool {
    if let Some(text) = &self.text {
      let hit = contains_ci(&note.company, text)
        || contains_ci(&note.contact, text)
        || note.key_matches.iter().any(|m| contains_ci(m, text));
      if !hit {
        return false;
      }
    }

    if let Some(qualified) = self.qualified
      && note.qualified != qualified
    {
      return false;
    }

    true
  }
}

// ─── CompanyFilter ───────────────────────────────────────────────────────────

/// Parameters for `Registry::companies`.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
  /// Free-text filter over the company name.
  pub text: Option<String>,
}

impl CompanyFilter {
  pub fn matches(&self, company: &Company) -> bool {
    match &self.text {
      Some(text) => contains_ci(&company.name, text),
      None => true,
    }
  }
}
