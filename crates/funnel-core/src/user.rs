//! Dashboard user types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::id::UserId;

/// The role a user holds in the sales organisation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
  Sdr,
  SalesRep,
  Manager,
  Sysadmin,
}

impl UserRole {
  /// Human-readable label for table output.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Sdr => "SDR",
      Self::SalesRep => "Sales Rep",
      Self::Manager => "Manager",
      Self::Sysadmin => "Sys Admin",
    }
  }
}

/// A dashboard user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:      UserId,
  pub name:    String,
  pub email:   String,
  pub role:    UserRole,
  /// Company affiliation, free text; optional for sysadmins.
  pub company: Option<String>,
}
