//! Company and feature-flag types for the admin panel.

use serde::{Deserialize, Serialize};

use crate::id::{CompanyId, FeatureId};

// ─── Company ─────────────────────────────────────────────────────────────────

/// A customer company managed from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
  pub id:             CompanyId,
  pub name:           String,
  /// Whitelisted manager addresses. Deduplicated by value; insertion order
  /// is preserved for display.
  pub manager_emails: Vec<String>,
  /// Enabled feature flags. Every id must exist in the feature catalog.
  pub features:       Vec<FeatureId>,
  /// Reported seat count. Not recomputed from user membership.
  pub user_count:     u32,
}

impl Company {
  /// Whether the given feature flag is enabled for this company.
  pub fn has_feature(&self, feature: &FeatureId) -> bool {
    self.features.contains(feature)
  }
}

// ─── NewCompany ──────────────────────────────────────────────────────────────

/// Input to `Registry::add_company`. The id is assigned by the registry;
/// a new company starts with no features and zero reported users.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
  pub name:          String,
  pub manager_email: Option<String>,
}

impl NewCompany {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), manager_email: None }
  }
}

// ─── Feature ─────────────────────────────────────────────────────────────────

/// A named capability a company may have enabled.
///
/// Features form a catalog seeded at start; companies reference feature ids,
/// not feature records. The number of companies with a feature enabled is
/// derived at read time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
  pub id:          FeatureId,
  pub name:        String,
  pub description: String,
}
