//! Call note (call insight) types — key information captured from a sales
//! call.

use serde::{Deserialize, Serialize};

use crate::id::NoteId;

/// A record of one sales call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallNote {
  pub id:          NoteId,
  pub company:     String,
  pub contact:     String,
  /// Free-form duration as entered, e.g. `"12m 34s"`.
  pub duration:    String,
  /// Talking points that matched the qualification checklist. Deduplicated
  /// by value; insertion order is preserved.
  pub key_matches: Vec<String>,
  pub qualified:   bool,
}

/// Input to `Registry::add_note`. The id is assigned by the registry.
#[derive(Debug, Clone, Default)]
pub struct NewCallNote {
  pub company:     String,
  pub contact:     String,
  pub duration:    String,
  pub key_matches: Vec<String>,
  pub qualified:   bool,
}
