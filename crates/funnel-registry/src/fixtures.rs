//! Seed data — the initial contents of every collection.
//!
//! The registry takes a [`Seed`] at construction; nothing here is global.
//! [`Seed::demo`] supplies the demo book the dashboard ships with, with
//! meeting times laid out relative to the current day so the "today" and
//! "past" views both have rows. Tests that need precise control build
//! their own `Seed` instead.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use funnel_core::{
  agent::Agent,
  company::{Company, Feature},
  group::{Permission, UserGroup},
  lead::{Lead, LeadStatus},
  note::CallNote,
  user::{User, UserRole},
};

// ─── Seed ────────────────────────────────────────────────────────────────────

/// Initial contents for a [`crate::Registry`].
///
/// Seeds must satisfy the reference invariants: every lead's assignee must
/// exist in `agents`, company features must come from `features`, and
/// group permissions from `permissions`.
#[derive(Debug, Clone, Default)]
pub struct Seed {
  pub agents:      Vec<Agent>,
  pub leads:       Vec<Lead>,
  pub companies:   Vec<Company>,
  pub features:    Vec<Feature>,
  pub permissions: Vec<Permission>,
  pub notes:       Vec<CallNote>,
  pub groups:      Vec<UserGroup>,
  pub users:       Vec<User>,
}

// ─── Time helpers ────────────────────────────────────────────────────────────

fn today_at(hour: i64, minute: i64) -> DateTime<Utc> {
  let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
  midnight + Duration::hours(hour) + Duration::minutes(minute)
}

fn days_ago(days: i64, hour: i64, minute: i64) -> DateTime<Utc> {
  today_at(hour, minute) - Duration::days(days)
}

// ─── Record helpers ──────────────────────────────────────────────────────────

fn lead(
  id: &str,
  company: &str,
  contact: &str,
  value: u64,
  status: LeadStatus,
  agent: &str,
) -> Lead {
  Lead {
    id: id.into(),
    company: company.to_owned(),
    contact: contact.to_owned(),
    email: None,
    phone: None,
    linkedin: None,
    value,
    status,
    assigned_to: agent.into(),
    meeting_time: None,
    notes: None,
    intelligence_notes: Vec::new(),
    buyer_questions: Vec::new(),
  }
}

fn company(
  id: &str,
  name: &str,
  manager_emails: &[&str],
  features: &[&str],
  user_count: u32,
) -> Company {
  Company {
    id: id.into(),
    name: name.to_owned(),
    manager_emails: manager_emails.iter().map(|e| (*e).to_owned()).collect(),
    features: features.iter().map(|f| (*f).into()).collect(),
    user_count,
  }
}

fn feature(id: &str, name: &str, description: &str) -> Feature {
  Feature {
    id: id.into(),
    name: name.to_owned(),
    description: description.to_owned(),
  }
}

fn note(
  id: &str,
  company: &str,
  contact: &str,
  duration: &str,
  key_matches: &[&str],
  qualified: bool,
) -> CallNote {
  CallNote {
    id: id.into(),
    company: company.to_owned(),
    contact: contact.to_owned(),
    duration: duration.to_owned(),
    key_matches: key_matches.iter().map(|m| (*m).to_owned()).collect(),
    qualified,
  }
}

fn group(
  id: &str,
  name: &str,
  description: &str,
  member_count: u32,
  permissions: &[&str],
) -> UserGroup {
  UserGroup {
    id: id.into(),
    name: name.to_owned(),
    description: description.to_owned(),
    member_count,
    permissions: permissions.iter().map(|p| (*p).into()).collect(),
  }
}

fn user(
  id: &str,
  name: &str,
  email: &str,
  role: UserRole,
  company: Option<&str>,
) -> User {
  User {
    id: id.into(),
    name: name.to_owned(),
    email: email.to_owned(),
    role,
    company: company.map(str::to_owned),
  }
}

// ─── Demo book ───────────────────────────────────────────────────────────────

impl Seed {
  /// The demo dataset the dashboard ships with.
  pub fn demo() -> Self {
    let agents = vec![
      Agent::new("1", "Sarah Chen"),
      Agent::new("2", "Marcus Webb"),
      Agent::new("3", "Jordan Ellis"),
      Agent::new("4", "Priya Nair"),
    ];

    let leads = vec![
      Lead {
        email: Some("dana.holt@northwind.com".to_owned()),
        meeting_time: Some(today_at(9, 30)),
        intelligence_notes: vec![
          "Recently closed a Series B round".to_owned(),
          "Evaluating two competing vendors".to_owned(),
        ],
        buyer_questions: vec![
          "Can onboarding finish before Q4?".to_owned(),
        ],
        ..lead("1", "Northwind Traders", "Dana Holt", 45_000,
          LeadStatus::Qualified, "1")
      },
      Lead {
        phone: Some("+1 555 0142".to_owned()),
        meeting_time: Some(today_at(11, 0)),
        ..lead("2", "Cascade Analytics", "Felix Grant", 28_000,
          LeadStatus::Contacted, "2")
      },
      Lead {
        email: Some("i.reyes@bluepeak.com".to_owned()),
        linkedin: Some("https://linkedin.com/in/imogenreyes".to_owned()),
        meeting_time: Some(today_at(14, 0)),
        notes: Some(
          "Procurement wants a revised quote by Friday.".to_owned(),
        ),
        ..lead("3", "Bluepeak Logistics", "Imogen Reyes", 62_000,
          LeadStatus::Proposal, "1")
      },
      Lead {
        meeting_time: Some(today_at(15, 30)),
        ..lead("4", "Harbor & Lane", "Theo Marsh", 18_000,
          LeadStatus::New, "3")
      },
      Lead {
        email: Some("alice.zhang@veldt.com".to_owned()),
        meeting_time: Some(today_at(16, 15)),
        buyer_questions: vec![
          "Does the platform support SSO?".to_owned(),
          "What does data export look like?".to_owned(),
        ],
        ..lead("5", "Veldt Robotics", "Alice Zhang", 95_000,
          LeadStatus::Qualified, "2")
      },
      // Previously worked leads.
      Lead {
        meeting_time: Some(days_ago(3, 10, 0)),
        notes: Some("Signed a 12-month contract.".to_owned()),
        ..lead("6", "Orchid Systems", "Ravi Patel", 52_000,
          LeadStatus::Closed, "1")
      },
      Lead {
        meeting_time: Some(days_ago(8, 13, 30)),
        notes: Some("Renewal expected next spring.".to_owned()),
        ..lead("7", "Summit Freight", "Lena Brook", 75_000,
          LeadStatus::Closed, "1")
      },
      Lead {
        meeting_time: Some(days_ago(5, 9, 0)),
        ..lead("8", "Quartz Media", "Owen Doyle", 22_000,
          LeadStatus::Contacted, "3")
      },
      Lead {
        meeting_time: Some(days_ago(12, 15, 0)),
        ..lead("9", "Fernwell Group", "Maya Sutton", 31_000,
          LeadStatus::Proposal, "4")
      },
    ];

    let companies = vec![
      company("1", "Acme Corp", &["manager@acme.com"],
        &["analytics", "reassignment"], 24),
      company("2", "TechStart Inc", &["admin@techstart.com"],
        &["analytics"], 12),
      company("3", "Global Sales Co",
        &["lead@globalsales.com", "manager@globalsales.com"],
        &["analytics", "reassignment", "ai-chat"], 56),
    ];

    let features = vec![
      feature("analytics", "Team Analytics",
        "View team performance metrics"),
      feature("reassignment", "Lead Reassignment",
        "Reassign leads between reps"),
      feature("ai-chat", "AI Call Chat",
        "AI-powered transcript analysis"),
      feature("custom-onboarding", "Custom Onboarding",
        "Customize onboarding emails"),
    ];

    let permissions = vec![
      Permission::new("view_leads", "View Leads"),
      Permission::new("edit_leads", "Edit Leads"),
      Permission::new("reassign_leads", "Reassign Leads"),
      Permission::new("create_notes", "Create Notes"),
      Permission::new("view_all", "View All"),
      Permission::new("edit_all", "Edit All"),
      Permission::new("reassign_all", "Reassign All"),
      Permission::new("view_analytics", "View Analytics"),
      Permission::new("manage_users", "Manage Users"),
      Permission::new("manage_groups", "Manage Groups"),
    ];

    let notes = vec![
      note("1", "Northwind Traders", "Dana Holt", "12m 34s",
        &["Budget confirmed", "Decision maker on call"], true),
      note("2", "Cascade Analytics", "Felix Grant", "8m 02s",
        &["Asked for case studies"], false),
      note("3", "Veldt Robotics", "Alice Zhang", "21m 45s",
        &["Security review scheduled", "Budget confirmed", "Q3 timeline"],
        true),
    ];

    let groups = vec![
      group("1", "Sales Team",
        "Front-line representatives working the live pipeline", 18,
        &["view_leads", "edit_leads", "create_notes"]),
      group("2", "Team Managers",
        "Managers with team-wide visibility and reassignment rights", 5,
        &["view_all", "edit_all", "reassign_all", "view_analytics"]),
      group("3", "Administrators", "Full administrative access", 2,
        &["view_all", "edit_all", "manage_users", "manage_groups"]),
    ];

    let users = vec![
      user("1", "Sarah Chen", "sarah.chen@acme.com", UserRole::SalesRep,
        Some("Acme Corp")),
      user("2", "Marcus Webb", "marcus.webb@techstart.com", UserRole::Sdr,
        Some("TechStart Inc")),
      user("3", "Jordan Ellis", "jordan.ellis@globalsales.com",
        UserRole::SalesRep, Some("Global Sales Co")),
      user("4", "Priya Nair", "priya.nair@globalsales.com",
        UserRole::Manager, Some("Global Sales Co")),
      user("5", "Noel Park", "noel.park@funnel.app", UserRole::Sysadmin,
        None),
    ];

    Self { agents, leads, companies, features, permissions, notes, groups, users }
  }
}
