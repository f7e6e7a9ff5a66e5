//! [`Registry`] — the in-memory store behind every dashboard view.
//!
//! Collections are plain vectors scanned linearly; insertion order is
//! preserved for display but carries no other meaning. Saves are
//! whole-record replaces keyed by id (last writer wins, no field merge).
//! Every mutation emits exactly one notification through the injected
//! sink: a success message on commit, an error message when the change is
//! rejected. Queries never notify and never mutate.

use funnel_core::{
  Error, Result,
  agent::Agent,
  company::{Company, Feature, NewCompany},
  group::{Permission, UserGroup},
  id::{AgentId, CompanyId, FeatureId, GroupId, LeadId, NoteId, PermissionId, UserId},
  lead::{Lead, NewLead},
  note::{CallNote, NewCallNote},
  notify::{Notification, NotificationSink},
  user::User,
  view::{AdminSummary, LeadView},
};

use crate::{
  fixtures::Seed,
  query::{CompanyFilter, LeadFilter, NoteFilter},
};

// ─── Id sequence ─────────────────────────────────────────────────────────────

/// Monotonic id source for one collection.
///
/// Seeded past the largest numeric id present in the fixtures and only
/// ever counts up, so deleting records can never cause an id to be handed
/// out twice.
#[derive(Debug, Clone, Copy)]
struct IdSeq(u64);

impl IdSeq {
  fn seeded<'a>(ids: impl Iterator<Item = &'a str>) -> Self {
    Self(ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0))
  }

  fn next_id(&mut self) -> String {
    self.0 += 1;
    self.0.to_string()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Trim `value`; reject the record if nothing remains.
fn required(value: &str, field: &'static str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField { field });
  }
  Ok(trimmed.to_owned())
}

/// Add `item` to `set` if absent, remove it if present. Applying the same
/// toggle twice restores the original set.
fn toggle_membership<T: PartialEq>(set: &mut Vec<T>, item: T) {
  match set.iter().position(|existing| *existing == item) {
    Some(index) => {
      set.remove(index);
    }
    None => set.push(item),
  }
}

/// Drop duplicate values, keeping the first occurrence of each.
fn dedupe_in_place<T: PartialEq>(items: &mut Vec<T>) {
  let mut index = 0;
  while index < items.len() {
    if items[..index].contains(&items[index]) {
      items.remove(index);
    } else {
      index += 1;
    }
  }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// The single source of truth for every dashboard collection.
pub struct Registry {
  pub(crate) leads:       Vec<Lead>,
  pub(crate) agents:      Vec<Agent>,
  pub(crate) companies:   Vec<Company>,
  pub(crate) features:    Vec<Feature>,
  pub(crate) permissions: Vec<Permission>,
  pub(crate) notes:       Vec<CallNote>,
  pub(crate) groups:      Vec<UserGroup>,
  pub(crate) users:       Vec<User>,
  lead_seq:    IdSeq,
  company_seq: IdSeq,
  note_seq:    IdSeq,
  sink:        Box<dyn NotificationSink>,
}

impl Registry {
  /// Build a registry over `seed`, wiring notifications to `sink`.
  ///
  /// Seeds must satisfy the reference invariants: every lead's assignee
  /// exists, and company features and group permissions come from the
  /// catalogs. The registry enforces them on every subsequent write.
  pub fn new(seed: Seed, sink: Box<dyn NotificationSink>) -> Self {
    let lead_seq = IdSeq::seeded(seed.leads.iter().map(|l| l.id.as_str()));
    let company_seq =
      IdSeq::seeded(seed.companies.iter().map(|c| c.id.as_str()));
    let note_seq = IdSeq::seeded(seed.notes.iter().map(|n| n.id.as_str()));

    Self {
      leads: seed.leads,
      agents: seed.agents,
      companies: seed.companies,
      features: seed.features,
      permissions: seed.permissions,
      notes: seed.notes,
      groups: seed.groups,
      users: seed.users,
      lead_seq,
      company_seq,
      note_seq,
      sink,
    }
  }

  fn announce(&self, message: impl Into<String>) {
    self.sink.notify(Notification::success(message));
  }

  /// Emit the rejection as an error notification and hand the error back
  /// to the caller.
  fn reject(&self, error: Error) -> Error {
    self.sink.notify(Notification::error(error.to_string()));
    error
  }

  /// Resolve the assignee for display. Writes keep the reference valid,
  /// so the fallback only shows up for a seed that broke the invariant.
  pub(crate) fn view(&self, lead: &Lead) -> LeadView {
    let agent = self
      .agents
      .iter()
      .find(|a| a.id == lead.assigned_to)
      .cloned()
      .unwrap_or_else(|| Agent::new(lead.assigned_to.as_str(), "(unassigned)"));
    LeadView { lead: lead.clone(), agent }
  }

  // ── Leads ─────────────────────────────────────────────────────────────

  /// List leads matching `filter`, in insertion order, with assignees
  /// resolved. An empty result is a normal outcome, not an error.
  pub fn leads(&self, filter: &LeadFilter) -> Vec<LeadView> {
    self
      .leads
      .iter()
      .filter(|lead| filter.matches(lead))
      .skip(filter.offset.unwrap_or(0))
      .take(filter.limit.unwrap_or(usize::MAX))
      .map(|lead| self.view(lead))
      .collect()
  }

  pub fn lead(&self, id: &LeadId) -> Result<LeadView> {
    self
      .leads
      .iter()
      .find(|l| l.id == *id)
      .map(|lead| self.view(lead))
      .ok_or_else(|| Error::LeadNotFound(id.clone()))
  }

  /// Hand the lead to another agent. Both the reference check and the
  /// lookup happen before anything is written, so a failed reassignment
  /// leaves the lead exactly as it was.
  pub fn reassign_lead(
    &mut self,
    lead_id: &LeadId,
    agent_id: &AgentId,
  ) -> Result<LeadView> {
    let agent = self
      .agents
      .iter()
      .find(|a| a.id == *agent_id)
      .cloned()
      .ok_or_else(|| self.reject(Error::UnknownAgent(agent_id.clone())))?;
    let index = self
      .leads
      .iter()
      .position(|l| l.id == *lead_id)
      .ok_or_else(|| self.reject(Error::LeadNotFound(lead_id.clone())))?;

    self.leads[index].assigned_to = agent.id.clone();
    tracing::debug!(lead = %lead_id, agent = %agent.id, "lead reassigned");
    self.announce(format!("Lead reassigned to {}", agent.name));
    Ok(LeadView { lead: self.leads[index].clone(), agent })
  }

  /// Whole-record replace keyed by `lead.id`. The caller supplies the
  /// complete desired record; there is no partial-field merge.
  pub fn save_lead(&mut self, mut lead: Lead) -> Result<LeadView> {
    lead.company =
      required(&lead.company, "company name").map_err(|e| self.reject(e))?;
    lead.contact =
      required(&lead.contact, "contact name").map_err(|e| self.reject(e))?;
    lead.notes = blank_to_none(lead.notes);
    if !self.agents.iter().any(|a| a.id == lead.assigned_to) {
      return Err(self.reject(Error::UnknownAgent(lead.assigned_to.clone())));
    }
    let index = self
      .leads
      .iter()
      .position(|l| l.id == lead.id)
      .ok_or_else(|| self.reject(Error::LeadNotFound(lead.id.clone())))?;

    self.leads[index] = lead;
    let saved = &self.leads[index];
    tracing::debug!(lead = %saved.id, "lead saved");
    self.announce(format!("Lead \"{}\" updated successfully", saved.company));
    Ok(self.view(saved))
  }

  pub fn add_lead(&mut self, lead: NewLead) -> Result<LeadView> {
    let company =
      required(&lead.company, "company name").map_err(|e| self.reject(e))?;
    let contact =
      required(&lead.contact, "contact name").map_err(|e| self.reject(e))?;
    if !self.agents.iter().any(|a| a.id == lead.assigned_to) {
      return Err(self.reject(Error::UnknownAgent(lead.assigned_to.clone())));
    }

    let record = Lead {
      id: LeadId::new(self.lead_seq.next_id()),
      company,
      contact,
      email: blank_to_none(lead.email),
      phone: blank_to_none(lead.phone),
      linkedin: blank_to_none(lead.linkedin),
      value: lead.value,
      status: lead.status,
      assigned_to: lead.assigned_to,
      meeting_time: lead.meeting_time,
      notes: blank_to_none(lead.notes),
      intelligence_notes: lead.intelligence_notes,
      buyer_questions: lead.buyer_questions,
    };
    self.leads.push(record.clone());
    tracing::debug!(lead = %record.id, "lead added");
    self.announce(format!("Lead \"{}\" added successfully", record.company));
    Ok(self.view(&record))
  }

  // ── Agents ────────────────────────────────────────────────────────────

  pub fn agents(&self) -> Vec<Agent> { self.agents.clone() }

  pub fn agent(&self, id: &AgentId) -> Result<Agent> {
    self
      .agents
      .iter()
      .find(|a| a.id == *id)
      .cloned()
      .ok_or_else(|| Error::AgentNotFound(id.clone()))
  }

  // ── Companies ─────────────────────────────────────────────────────────

  pub fn companies(&self, filter: &CompanyFilter) -> Vec<Company> {
    self
      .companies
      .iter()
      .filter(|company| filter.matches(company))
      .cloned()
      .collect()
  }

  pub fn company(&self, id: &CompanyId) -> Result<Company> {
    self
      .companies
      .iter()
      .find(|c| c.id == *id)
      .cloned()
      .ok_or_else(|| Error::CompanyNotFound(id.clone()))
  }

  pub fn save_company(&mut self, mut company: Company) -> Result<Company> {
    company.name =
      required(&company.name, "company name").map_err(|e| self.reject(e))?;
    if let Some(feature) = company
      .features
      .iter()
      .find(|f| !self.features.iter().any(|known| known.id == **f))
    {
      return Err(self.reject(Error::UnknownFeature(feature.clone())));
    }
    dedupe_in_place(&mut company.manager_emails);
    dedupe_in_place(&mut company.features);
    let index = self
      .companies
      .iter()
      .position(|c| c.id == company.id)
      .ok_or_else(|| self.reject(Error::CompanyNotFound(company.id.clone())))?;

    self.companies[index] = company;
    let saved = self.companies[index].clone();
    tracing::debug!(company = %saved.id, "company saved");
    self
      .announce(format!("Company \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  /// Create a company with no features and zero reported seats.
  pub fn add_company(&mut self, company: NewCompany) -> Result<Company> {
    let name =
      required(&company.name, "company name").map_err(|e| self.reject(e))?;
    let record = Company {
      id: CompanyId::new(self.company_seq.next_id()),
      name,
      manager_emails: blank_to_none(company.manager_email)
        .into_iter()
        .collect(),
      features: Vec::new(),
      user_count: 0,
    };
    self.companies.push(record.clone());
    tracing::debug!(company = %record.id, "company added");
    self.announce(format!("Company \"{}\" added successfully", record.name));
    Ok(record)
  }

  /// Remove the company. Dependent records (users, notes) are left
  /// untouched; there is no cascade in this scope.
  pub fn delete_company(&mut self, id: &CompanyId) -> Result<Company> {
    let index = self
      .companies
      .iter()
      .position(|c| c.id == *id)
      .ok_or_else(|| self.reject(Error::CompanyNotFound(id.clone())))?;
    let removed = self.companies.remove(index);
    tracing::debug!(company = %removed.id, "company deleted");
    self.announce(format!("Company \"{}\" deleted", removed.name));
    Ok(removed)
  }

  /// Enable the feature if it is off, disable it if it is on.
  pub fn toggle_company_feature(
    &mut self,
    company_id: &CompanyId,
    feature_id: &FeatureId,
  ) -> Result<Company> {
    if !self.features.iter().any(|f| f.id == *feature_id) {
      return Err(self.reject(Error::UnknownFeature(feature_id.clone())));
    }
    let index = self
      .companies
      .iter()
      .position(|c| c.id == *company_id)
      .ok_or_else(|| self.reject(Error::CompanyNotFound(company_id.clone())))?;

    toggle_membership(&mut self.companies[index].features, feature_id.clone());
    let saved = self.companies[index].clone();
    tracing::debug!(company = %saved.id, feature = %feature_id, "feature toggled");
    self
      .announce(format!("Company \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  // ── Features ──────────────────────────────────────────────────────────

  pub fn features(&self) -> Vec<Feature> { self.features.clone() }

  pub fn feature(&self, id: &FeatureId) -> Result<Feature> {
    self
      .features
      .iter()
      .find(|f| f.id == *id)
      .cloned()
      .ok_or_else(|| Error::UnknownFeature(id.clone()))
  }

  /// How many companies currently have the feature enabled. Derived on
  /// every call; never stored.
  pub fn feature_company_count(&self, id: &FeatureId) -> usize {
    self.companies.iter().filter(|c| c.has_feature(id)).count()
  }

  pub fn save_feature(&mut self, mut feature: Feature) -> Result<Feature> {
    feature.name =
      required(&feature.name, "feature name").map_err(|e| self.reject(e))?;
    feature.description = feature.description.trim().to_owned();
    let index = self
      .features
      .iter()
      .position(|f| f.id == feature.id)
      .ok_or_else(|| self.reject(Error::UnknownFeature(feature.id.clone())))?;

    self.features[index] = feature;
    let saved = self.features[index].clone();
    tracing::debug!(feature = %saved.id, "feature saved");
    self
      .announce(format!("Feature \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  // ── Call notes ────────────────────────────────────────────────────────

  pub fn notes(&self, filter: &NoteFilter) -> Vec<CallNote> {
    self
      .notes
      .iter()
      .filter(|note| filter.matches(note))
      .cloned()
      .collect()
  }

  pub fn note(&self, id: &NoteId) -> Result<CallNote> {
    self
      .notes
      .iter()
      .find(|n| n.id == *id)
      .cloned()
      .ok_or_else(|| Error::NoteNotFound(id.clone()))
  }

  pub fn add_note(&mut self, note: NewCallNote) -> Result<CallNote> {
    let company =
      required(&note.company, "company name").map_err(|e| self.reject(e))?;
    let contact =
      required(&note.contact, "contact name").map_err(|e| self.reject(e))?;
    let duration =
      required(&note.duration, "call duration").map_err(|e| self.reject(e))?;
    let mut key_matches = note.key_matches;
    dedupe_in_place(&mut key_matches);

    let record = CallNote {
      id: NoteId::new(self.note_seq.next_id()),
      company,
      contact,
      duration,
      key_matches,
      qualified: note.qualified,
    };
    self.notes.push(record.clone());
    tracing::debug!(note = %record.id, "call note added");
    self.announce("Call note added successfully");
    Ok(record)
  }

  pub fn save_note(&mut self, mut note: CallNote) -> Result<CallNote> {
    note.company =
      required(&note.company, "company name").map_err(|e| self.reject(e))?;
    note.contact =
      required(&note.contact, "contact name").map_err(|e| self.reject(e))?;
    note.duration =
      required(&note.duration, "call duration").map_err(|e| self.reject(e))?;
    dedupe_in_place(&mut note.key_matches);
    let index = self
      .notes
      .iter()
      .position(|n| n.id == note.id)
      .ok_or_else(|| self.reject(Error::NoteNotFound(note.id.clone())))?;

    self.notes[index] = note;
    let saved = self.notes[index].clone();
    tracing::debug!(note = %saved.id, "call note saved");
    self.announce("Call note updated successfully");
    Ok(saved)
  }

  // ── User groups ───────────────────────────────────────────────────────

  pub fn groups(&self) -> Vec<UserGroup> { self.groups.clone() }

  pub fn group(&self, id: &GroupId) -> Result<UserGroup> {
    self
      .groups
      .iter()
      .find(|g| g.id == *id)
      .cloned()
      .ok_or_else(|| Error::GroupNotFound(id.clone()))
  }

  pub fn permissions(&self) -> Vec<Permission> { self.permissions.clone() }

  pub fn save_group(&mut self, mut group: UserGroup) -> Result<UserGroup> {
    group.name =
      required(&group.name, "group name").map_err(|e| self.reject(e))?;
    group.description = group.description.trim().to_owned();
    if let Some(permission) = group
      .permissions
      .iter()
      .find(|p| !self.permissions.iter().any(|known| known.id == **p))
    {
      return Err(self.reject(Error::UnknownPermission(permission.clone())));
    }
    dedupe_in_place(&mut group.permissions);
    let index = self
      .groups
      .iter()
      .position(|g| g.id == group.id)
      .ok_or_else(|| self.reject(Error::GroupNotFound(group.id.clone())))?;

    self.groups[index] = group;
    let saved = self.groups[index].clone();
    tracing::debug!(group = %saved.id, "group saved");
    self.announce(format!("Group \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  /// Grant the permission if missing, revoke it if present. The same
  /// toggle helper drives company features; the two sets behave
  /// identically.
  pub fn toggle_group_permission(
    &mut self,
    group_id: &GroupId,
    permission_id: &PermissionId,
  ) -> Result<UserGroup> {
    if !self.permissions.iter().any(|p| p.id == *permission_id) {
      return Err(
        self.reject(Error::UnknownPermission(permission_id.clone())),
      );
    }
    let index = self
      .groups
      .iter()
      .position(|g| g.id == *group_id)
      .ok_or_else(|| self.reject(Error::GroupNotFound(group_id.clone())))?;

    toggle_membership(
      &mut self.groups[index].permissions,
      permission_id.clone(),
    );
    let saved = self.groups[index].clone();
    tracing::debug!(group = %saved.id, permission = %permission_id, "permission toggled");
    self.announce(format!("Group \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  // ── Users ─────────────────────────────────────────────────────────────

  pub fn users(&self) -> Vec<User> { self.users.clone() }

  pub fn user(&self, id: &UserId) -> Result<User> {
    self
      .users
      .iter()
      .find(|u| u.id == *id)
      .cloned()
      .ok_or_else(|| Error::UserNotFound(id.clone()))
  }

  pub fn save_user(&mut self, mut user: User) -> Result<User> {
    user.name =
      required(&user.name, "user name").map_err(|e| self.reject(e))?;
    user.email = required(&user.email, "email").map_err(|e| self.reject(e))?;
    user.company = blank_to_none(user.company);
    let index = self
      .users
      .iter()
      .position(|u| u.id == user.id)
      .ok_or_else(|| self.reject(Error::UserNotFound(user.id.clone())))?;

    self.users[index] = user;
    let saved = self.users[index].clone();
    tracing::debug!(user = %saved.id, "user saved");
    self.announce(format!("User \"{}\" updated successfully", saved.name));
    Ok(saved)
  }

  // ── Admin summary ─────────────────────────────────────────────────────

  /// Header stats for the admin panel.
  pub fn admin_summary(&self) -> AdminSummary {
    AdminSummary {
      total_companies: self.companies.len(),
      total_users:     self.companies.iter().map(|c| c.user_count).sum(),
      total_features:  self.features.len(),
    }
  }
}
