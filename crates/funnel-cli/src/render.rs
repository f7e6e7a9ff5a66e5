//! Plain-text rendering for tables, detail views, and JSON output.

use anyhow::Result;
use serde::Serialize;

use funnel_core::{
  note::CallNote,
  view::{ClosedReport, LeadView},
};

/// Pretty-print any serialisable value for `--json` mode.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

// ─── Formatting helpers ───────────────────────────────────────────────────────

fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::new();
  for (index, c) in digits.chars().enumerate() {
    if index > 0 && (digits.len() - index) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// Whole-dollar amount with thousands separators, e.g. `$52,000`.
pub fn money(value: u64) -> String { format!("${}", group_thousands(value)) }

fn meeting_label(view: &LeadView) -> String {
  view
    .lead
    .meeting_time
    .map(|t| t.format("%b %d %H:%M").to_string())
    .unwrap_or_else(|| "-".to_owned())
}

// ─── Leads ────────────────────────────────────────────────────────────────────

pub fn lead_table(views: &[LeadView]) {
  if views.is_empty() {
    println!("No leads found matching your search criteria.");
    return;
  }
  println!(
    "{:<4} {:<20} {:<16} {:>10} {:<10} {:<14} {}",
    "ID", "COMPANY", "CONTACT", "VALUE", "STATUS", "AGENT", "MEETING"
  );
  for view in views {
    println!(
      "{:<4} {:<20} {:<16} {:>10} {:<10} {:<14} {}",
      view.lead.id.to_string(),
      view.lead.company,
      view.lead.contact,
      money(view.lead.value),
      view.lead.status.to_string(),
      view.agent.name,
      meeting_label(view),
    );
  }
}

pub fn lead_detail(view: &LeadView) {
  let lead = &view.lead;
  println!("{} ({})", lead.company, money(lead.value));
  println!("Status: {}", lead.status);
  println!("Assigned to: {}", view.agent.name);
  println!("Contact: {}", lead.contact);
  if let Some(email) = &lead.email {
    println!("Email: {email}");
  }
  if let Some(phone) = &lead.phone {
    println!("Phone: {phone}");
  }
  if let Some(linkedin) = &lead.linkedin {
    println!("LinkedIn: {linkedin}");
  }
  if let Some(time) = lead.meeting_time {
    println!("Meeting: {}", time.format("%Y-%m-%d %H:%M"));
  }
  if !lead.intelligence_notes.is_empty() {
    println!("Intelligence notes:");
    for note in &lead.intelligence_notes {
      println!("  * {note}");
    }
  }
  if !lead.buyer_questions.is_empty() {
    println!("Buyer questions:");
    for question in &lead.buyer_questions {
      println!("  * {question}");
    }
  }
  if let Some(notes) = &lead.notes {
    println!("Notes:\n  {notes}");
  }
}

// ─── Call notes ───────────────────────────────────────────────────────────────

pub fn note_list(notes: &[CallNote]) {
  if notes.is_empty() {
    println!("No call notes found matching your search criteria.");
    return;
  }
  for note in notes {
    let badge = if note.qualified { "qualified" } else { "unqualified" };
    println!(
      "[{}] {} / {} ({}, {})",
      note.id, note.company, note.contact, note.duration, badge
    );
    if !note.key_matches.is_empty() {
      println!("     key matches: {}", note.key_matches.join(", "));
    }
  }
}

// ─── Closed-deal report ───────────────────────────────────────────────────────

pub fn closed_report(report: &ClosedReport) {
  println!("Closed deals for {}", report.agent.name);
  println!("  Total closed:   {}", report.total_closed);
  println!("  Total revenue:  {}", money(report.total_revenue));
  println!("  Avg deal value: {}", money(report.average_deal_value));
  println!();
  println!("  This week:");
  for bucket in &report.weekly {
    println!(
      "    {} {:>2} closed {:>12}",
      bucket.day,
      bucket.closed,
      money(bucket.revenue)
    );
  }
  if report.recent.is_empty() {
    println!("\n  No closed deals yet. Keep closing!");
    return;
  }
  println!("\n  Recent:");
  for view in &report.recent {
    let note = view
      .lead
      .notes
      .as_deref()
      .map(|n| format!(" - {n}"))
      .unwrap_or_default();
    println!(
      "    {} / {} {}{}",
      view.lead.company,
      view.lead.contact,
      money(view.lead.value),
      note
    );
  }
}
