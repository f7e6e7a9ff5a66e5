//! Typed entity identifiers.
//!
//! Identifiers are short opaque strings (fixture records use `"1"`, `"2"`,
//! …; catalog entries use slugs like `"analytics"`). Each entity kind gets
//! its own newtype so a lead id cannot be passed where an agent id is
//! expected. Cross-entity references always hold the referenced entity's id
//! type, never a copied display field.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(raw: &str) -> Self { Self(raw.to_owned()) }
    }

    impl From<String> for $name {
      fn from(raw: String) -> Self { Self(raw) }
    }
  };
}

id_type!(
  /// Identifies a [`crate::lead::Lead`].
  LeadId
);
id_type!(
  /// Identifies an [`crate::agent::Agent`].
  AgentId
);
id_type!(
  /// Identifies a [`crate::company::Company`].
  CompanyId
);
id_type!(
  /// Identifies a [`crate::company::Feature`] in the feature catalog.
  FeatureId
);
id_type!(
  /// Identifies a [`crate::note::CallNote`].
  NoteId
);
id_type!(
  /// Identifies a [`crate::group::UserGroup`].
  GroupId
);
id_type!(
  /// Identifies a [`crate::group::Permission`] in the permission catalog.
  PermissionId
);
id_type!(
  /// Identifies a [`crate::user::User`].
  UserId
);
