//! Integration tests for the in-memory registry.

use std::{cell::RefCell, rc::Rc};

use chrono::{Duration, NaiveTime, TimeZone, Utc};

use funnel_core::{
  Error,
  agent::Agent,
  company::NewCompany,
  id::FeatureId,
  lead::{Lead, LeadStatus, NewLead},
  note::NewCallNote,
  notify::{Notification, NotificationKind, NotificationSink},
};

use crate::{
  Registry,
  fixtures::Seed,
  query::{CompanyFilter, LeadFilter, NoteFilter},
};

// ─── Harness ─────────────────────────────────────────────────────────────────

/// Sink that records every notification for later assertion.
#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Vec<Notification>>>);

impl RecordingSink {
  fn messages(&self) -> Vec<Notification> { self.0.borrow().clone() }
}

impl NotificationSink for RecordingSink {
  fn notify(&self, notification: Notification) {
    self.0.borrow_mut().push(notification);
  }
}

fn registry() -> (Registry, RecordingSink) {
  let sink = RecordingSink::default();
  let registry = Registry::new(Seed::demo(), Box::new(sink.clone()));
  (registry, sink)
}

fn bare_lead(id: &str, agent: &str) -> Lead {
  Lead {
    id: id.into(),
    company: "Acme Corp".to_owned(),
    contact: "Dana Holt".to_owned(),
    email: None,
    phone: None,
    linkedin: None,
    value: 10_000,
    status: LeadStatus::New,
    assigned_to: agent.into(),
    meeting_time: None,
    notes: None,
    intelligence_notes: Vec::new(),
    buyer_questions: Vec::new(),
  }
}

/// Two agents, one lead assigned to the first.
fn scenario() -> (Registry, RecordingSink) {
  let sink = RecordingSink::default();
  let seed = Seed {
    agents: vec![Agent::new("A1", "Sam"), Agent::new("A2", "Jo")],
    leads: vec![bare_lead("L1", "A1")],
    ..Seed::default()
  };
  (Registry::new(seed, Box::new(sink.clone())), sink)
}

fn feature_ids(ids: &[&str]) -> Vec<FeatureId> {
  ids.iter().map(|id| (*id).into()).collect()
}

// ─── Reassignment ────────────────────────────────────────────────────────────

#[test]
fn reassign_updates_assignment_and_resolves_name() {
  let (mut r, _) = scenario();

  let view = r.reassign_lead(&"L1".into(), &"A2".into()).unwrap();
  assert_eq!(view.lead.assigned_to, "A2".into());
  assert_eq!(view.agent.name, "Jo");
  assert_eq!(view.assigned_to_name(), "Jo");

  // The stored record agrees with the returned view.
  let fetched = r.lead(&"L1".into()).unwrap();
  assert_eq!(fetched.lead.assigned_to, "A2".into());
  assert_eq!(fetched.agent.name, "Jo");
}

#[test]
fn reassign_unknown_agent_leaves_lead_unchanged() {
  let (mut r, sink) = scenario();

  let err = r.reassign_lead(&"L1".into(), &"bad-id".into()).unwrap_err();
  assert!(matches!(err, Error::UnknownAgent(_)));

  let lead = r.lead(&"L1".into()).unwrap();
  assert_eq!(lead.lead.assigned_to, "A1".into());

  let messages = sink.messages();
  assert_eq!(messages.len(), 1);
  assert_eq!(messages[0].kind, NotificationKind::Error);
}

#[test]
fn reassign_emits_success_notification_with_agent_name() {
  let (mut r, sink) = scenario();

  r.reassign_lead(&"L1".into(), &"A2".into()).unwrap();

  let messages = sink.messages();
  assert_eq!(messages.len(), 1);
  assert_eq!(messages[0].kind, NotificationKind::Success);
  assert_eq!(messages[0].message, "Lead reassigned to Jo");
}

#[test]
fn reassign_missing_lead_errors() {
  let (mut r, _) = scenario();
  let err = r.reassign_lead(&"L9".into(), &"A2".into()).unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(_)));
}

// ─── Lead saves ──────────────────────────────────────────────────────────────

#[test]
fn save_lead_preserves_identity() {
  let (mut r, _) = registry();

  let mut lead = r.lead(&"1".into()).unwrap().lead;
  lead.notes = Some("Follow up after the demo.".to_owned());
  let saved = r.save_lead(lead).unwrap();

  assert_eq!(saved.lead.id, "1".into());
  assert_eq!(
    saved.lead.notes.as_deref(),
    Some("Follow up after the demo.")
  );
}

#[test]
fn save_lead_missing_contact_rejected() {
  let (mut r, sink) = registry();

  let mut lead = r.lead(&"1".into()).unwrap().lead;
  let original = lead.clone();
  lead.contact = "   ".to_owned();

  let err = r.save_lead(lead).unwrap_err();
  assert!(matches!(err, Error::MissingField { field: "contact name" }));

  // Record untouched, exactly one error notification.
  assert_eq!(r.lead(&"1".into()).unwrap().lead, original);
  let messages = sink.messages();
  assert_eq!(messages.len(), 1);
  assert_eq!(messages[0].kind, NotificationKind::Error);
}

#[test]
fn save_lead_unknown_assignee_rejected() {
  let (mut r, _) = registry();

  let mut lead = r.lead(&"1".into()).unwrap().lead;
  lead.assigned_to = "99".into();

  let err = r.save_lead(lead).unwrap_err();
  assert!(matches!(err, Error::UnknownAgent(_)));
}

#[test]
fn add_lead_generates_sequential_id() {
  let (mut r, _) = registry();

  let before = r.leads(&LeadFilter::default()).len();
  let added = r
    .add_lead(NewLead::new("Initech", "Bill Lumbergh", 40_000, "1".into()))
    .unwrap();

  // Demo leads occupy 1-9.
  assert_eq!(added.lead.id, "10".into());
  assert_eq!(r.leads(&LeadFilter::default()).len(), before + 1);
}

#[test]
fn add_lead_missing_company_leaves_collection_unchanged() {
  let (mut r, _) = registry();

  let before = r.leads(&LeadFilter::default()).len();
  let err = r
    .add_lead(NewLead::new("  ", "Bill Lumbergh", 40_000, "1".into()))
    .unwrap_err();

  assert!(matches!(err, Error::MissingField { field: "company name" }));
  assert_eq!(r.leads(&LeadFilter::default()).len(), before);
}

#[test]
fn lead_lookup_miss_is_surfaced_not_swallowed() {
  let (r, sink) = registry();

  let err = r.lead(&"404".into()).unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(_)));

  // Queries never notify; only mutations do.
  assert!(sink.messages().is_empty());
}

// ─── Lead queries ────────────────────────────────────────────────────────────

#[test]
fn filter_text_matches_company_contact_or_notes() {
  let (r, _) = registry();

  let by_company = LeadFilter {
    text: Some("NORTHWIND".to_owned()),
    ..LeadFilter::default()
  };
  let hits = r.leads(&by_company);
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].lead.id, "1".into());

  let by_contact =
    LeadFilter { text: Some("dana".to_owned()), ..LeadFilter::default() };
  assert_eq!(r.leads(&by_contact).len(), 1);

  let by_notes = LeadFilter {
    text: Some("procurement".to_owned()),
    ..LeadFilter::default()
  };
  let hits = r.leads(&by_notes);
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].lead.id, "3".into());
}

#[test]
fn filter_intersects_text_with_status() {
  let (r, _) = registry();

  // "a" alone matches every demo lead; the status filter narrows it.
  let filter = LeadFilter {
    text: Some("a".to_owned()),
    status: Some(LeadStatus::Qualified),
    ..LeadFilter::default()
  };
  let hits = r.leads(&filter);
  assert!(!hits.is_empty());
  assert!(hits.iter().all(|v| v.lead.status == LeadStatus::Qualified));
}

#[test]
fn filter_by_assigned_agent() {
  let (r, _) = registry();

  let filter = LeadFilter {
    assigned_to: Some("1".into()),
    ..LeadFilter::default()
  };
  let hits = r.leads(&filter);
  assert!(!hits.is_empty());
  assert!(hits.iter().all(|v| v.agent.id == "1".into()));
}

#[test]
fn filter_meeting_window_selects_todays_leads() {
  let (r, _) = registry();

  let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
  let today = LeadFilter {
    meeting_after: Some(start),
    meeting_before: Some(start + Duration::days(1)),
    ..LeadFilter::default()
  };
  let hits = r.leads(&today);
  assert_eq!(hits.len(), 5);

  let past = LeadFilter {
    meeting_before: Some(start),
    ..LeadFilter::default()
  };
  assert_eq!(r.leads(&past).len(), 4);
}

#[test]
fn repeated_queries_return_equal_sequences() {
  let (r, _) = registry();

  let filter =
    LeadFilter { text: Some("e".to_owned()), ..LeadFilter::default() };
  assert_eq!(r.leads(&filter), r.leads(&filter));
}

#[test]
fn limit_and_offset_page_results() {
  let (r, _) = registry();

  let page = LeadFilter {
    limit: Some(2),
    offset: Some(1),
    ..LeadFilter::default()
  };
  let hits = r.leads(&page);
  assert_eq!(hits.len(), 2);
  assert_eq!(hits[0].lead.id, "2".into());
  assert_eq!(hits[1].lead.id, "3".into());
}

#[test]
fn no_match_returns_empty_not_error() {
  let (r, _) = registry();

  let filter = LeadFilter {
    text: Some("zzz-no-such-lead".to_owned()),
    ..LeadFilter::default()
  };
  assert!(r.leads(&filter).is_empty());
}

// ─── Companies ───────────────────────────────────────────────────────────────

#[test]
fn company_search_is_case_insensitive() {
  let (r, _) = registry();

  let filter =
    CompanyFilter { text: Some("ACME".to_owned()) };
  let hits = r.companies(&filter);
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Acme Corp");
}

#[test]
fn add_company_requires_name() {
  let (mut r, sink) = registry();

  let before = r.companies(&CompanyFilter::default()).len();
  let err = r.add_company(NewCompany::new("   ")).unwrap_err();

  assert!(matches!(err, Error::MissingField { field: "company name" }));
  assert_eq!(r.companies(&CompanyFilter::default()).len(), before);

  let messages = sink.messages();
  assert_eq!(messages.len(), 1);
  assert_eq!(messages[0].kind, NotificationKind::Error);
}

#[test]
fn add_company_starts_with_defaults() {
  let (mut r, _) = registry();

  let added = r
    .add_company(NewCompany {
      name:          "Initech".to_owned(),
      manager_email: Some("  ops@initech.com  ".to_owned()),
    })
    .unwrap();

  assert_eq!(added.id, "4".into());
  assert_eq!(added.manager_emails, vec!["ops@initech.com".to_owned()]);
  assert!(added.features.is_empty());
  assert_eq!(added.user_count, 0);
}

#[test]
fn company_ids_are_not_reused_after_delete() {
  let (mut r, _) = registry();

  let first = r.add_company(NewCompany::new("Initech")).unwrap();
  assert_eq!(first.id, "4".into());

  r.delete_company(&first.id).unwrap();

  let second = r.add_company(NewCompany::new("Globex")).unwrap();
  assert_eq!(second.id, "5".into());
}

#[test]
fn save_company_dedupes_manager_emails() {
  let (mut r, _) = registry();

  let mut company = r.company(&"1".into()).unwrap();
  company.manager_emails = vec![
    "manager@acme.com".to_owned(),
    "billing@acme.com".to_owned(),
    "manager@acme.com".to_owned(),
  ];

  let saved = r.save_company(company).unwrap();
  assert_eq!(saved.manager_emails, vec![
    "manager@acme.com".to_owned(),
    "billing@acme.com".to_owned(),
  ]);
}

#[test]
fn save_company_rejects_feature_outside_catalog() {
  let (mut r, _) = registry();

  let mut company = r.company(&"1".into()).unwrap();
  let original = company.clone();
  company.features.push("turbo-mode".into());

  let err = r.save_company(company).unwrap_err();
  assert!(matches!(err, Error::UnknownFeature(_)));
  assert_eq!(r.company(&"1".into()).unwrap(), original);
}

#[test]
fn save_company_preserves_identity() {
  let (mut r, _) = registry();

  let mut company = r.company(&"2".into()).unwrap();
  company.name = "TechStart International".to_owned();

  let saved = r.save_company(company).unwrap();
  assert_eq!(saved.id, "2".into());
  assert_eq!(saved.name, "TechStart International");
}

#[test]
fn delete_company_does_not_cascade() {
  let (mut r, _) = registry();

  let users_before = r.users().len();
  r.delete_company(&"1".into()).unwrap();

  // Users affiliated with the deleted company are left untouched.
  assert_eq!(r.users().len(), users_before);
  assert!(
    r.users()
      .iter()
      .any(|u| u.company.as_deref() == Some("Acme Corp"))
  );
}

// ─── Feature toggling ────────────────────────────────────────────────────────

#[test]
fn toggle_adds_then_removes_features() {
  let (mut r, _) = registry();

  // Acme Corp starts with analytics + reassignment.
  let company = r.toggle_company_feature(&"1".into(), &"ai-chat".into()).unwrap();
  assert_eq!(
    company.features,
    feature_ids(&["analytics", "reassignment", "ai-chat"])
  );

  let company =
    r.toggle_company_feature(&"1".into(), &"analytics".into()).unwrap();
  assert_eq!(company.features, feature_ids(&["reassignment", "ai-chat"]));
}

#[test]
fn toggle_is_its_own_inverse() {
  let (mut r, _) = registry();

  let original = r.company(&"2".into()).unwrap().features;
  r.toggle_company_feature(&"2".into(), &"custom-onboarding".into())
    .unwrap();
  let restored = r
    .toggle_company_feature(&"2".into(), &"custom-onboarding".into())
    .unwrap();

  assert_eq!(restored.features, original);
}

#[test]
fn toggle_unknown_feature_is_a_no_op_on_the_company() {
  let (mut r, _) = registry();

  let original = r.company(&"1".into()).unwrap();
  let err = r
    .toggle_company_feature(&"1".into(), &"turbo-mode".into())
    .unwrap_err();

  assert!(matches!(err, Error::UnknownFeature(_)));
  assert_eq!(r.company(&"1".into()).unwrap(), original);
}

#[test]
fn feature_company_count_is_derived() {
  let (mut r, _) = registry();

  assert_eq!(r.feature_company_count(&"analytics".into()), 3);
  assert_eq!(r.feature_company_count(&"ai-chat".into()), 1);
  assert_eq!(r.feature_company_count(&"custom-onboarding".into()), 0);

  r.toggle_company_feature(&"1".into(), &"ai-chat".into()).unwrap();
  assert_eq!(r.feature_company_count(&"ai-chat".into()), 2);
}

#[test]
fn save_feature_updates_catalog_entry() {
  let (mut r, _) = registry();

  let mut feature = r.feature(&"ai-chat".into()).unwrap();
  feature.name = "AI Call Assistant".to_owned();

  let saved = r.save_feature(feature).unwrap();
  assert_eq!(saved.id, "ai-chat".into());
  assert_eq!(r.feature(&"ai-chat".into()).unwrap().name, "AI Call Assistant");
}

#[test]
fn save_feature_requires_name() {
  let (mut r, _) = registry();

  let mut feature = r.feature(&"analytics".into()).unwrap();
  feature.name = String::new();

  let err = r.save_feature(feature).unwrap_err();
  assert!(matches!(err, Error::MissingField { field: "feature name" }));
}

// ─── Call notes ──────────────────────────────────────────────────────────────

#[test]
fn note_filter_searches_key_matches() {
  let (r, _) = registry();

  let filter =
    NoteFilter { text: Some("budget".to_owned()), qualified: None };
  let hits = r.notes(&filter);
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|n| {
    n.key_matches.iter().any(|m| m.to_lowercase().contains("budget"))
  }));
}

#[test]
fn note_filter_qualified_is_tristate() {
  let (r, _) = registry();

  let all = r.notes(&NoteFilter::default());
  assert_eq!(all.len(), 3);

  let qualified =
    r.notes(&NoteFilter { text: None, qualified: Some(true) });
  assert_eq!(qualified.len(), 2);

  let unqualified =
    r.notes(&NoteFilter { text: None, qualified: Some(false) });
  assert_eq!(unqualified.len(), 1);
  assert_eq!(unqualified[0].company, "Cascade Analytics");
}

#[test]
fn add_note_missing_duration_rejected() {
  let (mut r, _) = registry();

  let before = r.notes(&NoteFilter::default()).len();
  let err = r
    .add_note(NewCallNote {
      company: "Initech".to_owned(),
      contact: "Bill Lumbergh".to_owned(),
      duration: String::new(),
      key_matches: Vec::new(),
      qualified: false,
    })
    .unwrap_err();

  assert!(matches!(err, Error::MissingField { field: "call duration" }));
  assert_eq!(r.notes(&NoteFilter::default()).len(), before);
}

#[test]
fn save_note_preserves_identity_and_dedupes() {
  let (mut r, _) = registry();

  let mut note = r.note(&"2".into()).unwrap();
  note.qualified = true;
  note.key_matches.push("Asked for case studies".to_owned());
  note.key_matches.push("Budget confirmed".to_owned());

  let saved = r.save_note(note).unwrap();
  assert_eq!(saved.id, "2".into());
  assert!(saved.qualified);
  assert_eq!(saved.key_matches, vec![
    "Asked for case studies".to_owned(),
    "Budget confirmed".to_owned(),
  ]);
}

#[test]
fn add_note_dedupes_key_matches() {
  let (mut r, _) = registry();

  let added = r
    .add_note(NewCallNote {
      company:     "Initech".to_owned(),
      contact:     "Bill Lumbergh".to_owned(),
      duration:    "5m 10s".to_owned(),
      key_matches: vec![
        "Budget confirmed".to_owned(),
        "Budget confirmed".to_owned(),
        "Q3 timeline".to_owned(),
      ],
      qualified:   true,
    })
    .unwrap();

  assert_eq!(added.id, "4".into());
  assert_eq!(added.key_matches, vec![
    "Budget confirmed".to_owned(),
    "Q3 timeline".to_owned(),
  ]);
}

// ─── User groups ─────────────────────────────────────────────────────────────

#[test]
fn toggle_permission_roundtrip() {
  let (mut r, _) = registry();

  let original = r.group(&"1".into()).unwrap().permissions;

  let granted = r
    .toggle_group_permission(&"1".into(), &"view_analytics".into())
    .unwrap();
  assert!(granted.has_permission(&"view_analytics".into()));

  let revoked = r
    .toggle_group_permission(&"1".into(), &"view_analytics".into())
    .unwrap();
  assert_eq!(revoked.permissions, original);
}

#[test]
fn toggle_unknown_permission_errors() {
  let (mut r, _) = registry();

  let err = r
    .toggle_group_permission(&"1".into(), &"launch_rockets".into())
    .unwrap_err();
  assert!(matches!(err, Error::UnknownPermission(_)));
}

#[test]
fn save_group_requires_name() {
  let (mut r, _) = registry();

  let mut group = r.group(&"2".into()).unwrap();
  group.name = "  ".to_owned();

  let err = r.save_group(group).unwrap_err();
  assert!(matches!(err, Error::MissingField { field: "group name" }));
}

#[test]
fn save_group_rejects_permission_outside_catalog() {
  let (mut r, _) = registry();

  let mut group = r.group(&"2".into()).unwrap();
  group.permissions.push("launch_rockets".into());

  let err = r.save_group(group).unwrap_err();
  assert!(matches!(err, Error::UnknownPermission(_)));
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[test]
fn save_user_requires_email() {
  let (mut r, _) = registry();

  let mut user = r.user(&"1".into()).unwrap();
  user.email = "   ".to_owned();

  let err = r.save_user(user).unwrap_err();
  assert!(matches!(err, Error::MissingField { field: "email" }));
}

#[test]
fn save_user_normalises_blank_company() {
  let (mut r, _) = registry();

  let mut user = r.user(&"1".into()).unwrap();
  user.company = Some("   ".to_owned());

  let saved = r.save_user(user).unwrap();
  assert_eq!(saved.id, "1".into());
  assert_eq!(saved.company, None);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[test]
fn closed_report_totals_and_average() {
  let (r, _) = registry();

  // Demo agent 1 closed Orchid Systems (52k) and Summit Freight (75k).
  let report = r.closed_report(&"1".into()).unwrap();
  assert_eq!(report.total_closed, 2);
  assert_eq!(report.total_revenue, 127_000);
  assert_eq!(report.average_deal_value, 63_500);

  // Newest first.
  assert_eq!(report.recent.len(), 2);
  assert_eq!(report.recent[0].lead.id, "7".into());
  assert_eq!(report.recent[1].lead.id, "6".into());
}

#[test]
fn closed_report_empty_for_agent_with_no_closed_deals() {
  let (r, _) = registry();

  let report = r.closed_report(&"4".into()).unwrap();
  assert_eq!(report.total_closed, 0);
  assert_eq!(report.total_revenue, 0);
  assert_eq!(report.average_deal_value, 0);
  assert!(report.recent.is_empty());
}

#[test]
fn closed_report_unknown_agent_errors() {
  let (r, _) = registry();
  let err = r.closed_report(&"99".into()).unwrap_err();
  assert!(matches!(err, Error::AgentNotFound(_)));
}

#[test]
fn closed_report_buckets_by_weekday() {
  let sink = RecordingSink::default();
  let mut seed = Seed {
    agents: vec![Agent::new("A1", "Sam")],
    ..Seed::default()
  };

  // 2025-06-02 is a Monday, 2025-06-05 a Thursday.
  let monday = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
  let thursday = Utc.with_ymd_and_hms(2025, 6, 5, 14, 0, 0).unwrap();

  for (id, value, time) in [
    ("1", 52_000, Some(monday)),
    ("2", 75_000, Some(monday)),
    ("3", 20_000, Some(thursday)),
    ("4", 9_000, None),
  ] {
    let mut lead = bare_lead(id, "A1");
    lead.status = LeadStatus::Closed;
    lead.value = value;
    lead.meeting_time = time;
    seed.leads.push(lead);
  }

  let r = Registry::new(seed, Box::new(sink));
  let report = r.closed_report(&"A1".into()).unwrap();

  assert_eq!(report.total_closed, 4);
  assert_eq!(report.weekly.len(), 5);

  let monday_bucket = &report.weekly[0];
  assert_eq!(monday_bucket.day, "Mon");
  assert_eq!(monday_bucket.closed, 2);
  assert_eq!(monday_bucket.revenue, 127_000);

  let thursday_bucket = &report.weekly[3];
  assert_eq!(thursday_bucket.day, "Thu");
  assert_eq!(thursday_bucket.closed, 1);
  assert_eq!(thursday_bucket.revenue, 20_000);

  // The un-scheduled deal counts toward the totals but lands in no bucket.
  let bucketed: u32 = report.weekly.iter().map(|w| w.closed).sum();
  assert_eq!(bucketed, 3);
}

// ─── Admin summary ───────────────────────────────────────────────────────────

#[test]
fn admin_summary_counts() {
  let (r, _) = registry();

  let summary = r.admin_summary();
  assert_eq!(summary.total_companies, 3);
  assert_eq!(summary.total_users, 92);
  assert_eq!(summary.total_features, 4);
}

// ─── Status parsing ──────────────────────────────────────────────────────────

#[test]
fn lead_status_parses_from_flag_form() {
  assert_eq!("proposal".parse::<LeadStatus>(), Ok(LeadStatus::Proposal));
  assert_eq!(LeadStatus::Closed.to_string(), "closed");
  assert!(LeadStatus::New < LeadStatus::Closed);
}
