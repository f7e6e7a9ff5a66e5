//! Handlers for the `leads` list and the `lead` subcommands.

use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use clap::Subcommand;

use funnel_core::{
  id::AgentId,
  lead::{LeadStatus, NewLead},
};
use funnel_registry::{Registry, query::LeadFilter};

use crate::render;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(clap::Args, Debug)]
pub struct ListArgs {
  /// Only leads with a meeting scheduled today.
  #[arg(long, conflicts_with = "past")]
  today: bool,

  /// Only previously worked leads (meeting before today).
  #[arg(long)]
  past: bool,

  /// Free-text search over company, contact, and notes.
  #[arg(short, long)]
  query: Option<String>,

  /// Filter by pipeline status (new, contacted, qualified, proposal,
  /// closed).
  #[arg(long)]
  status: Option<LeadStatus>,

  /// Only leads assigned to this agent.
  #[arg(long)]
  agent: Option<String>,

  #[arg(long)]
  limit: Option<usize>,

  #[arg(long)]
  offset: Option<usize>,
}

pub fn list(registry: &Registry, args: &ListArgs, json: bool) -> Result<()> {
  let mut filter = LeadFilter {
    text: args.query.clone(),
    status: args.status,
    assigned_to: args.agent.clone().map(AgentId::from),
    limit: args.limit,
    offset: args.offset,
    ..LeadFilter::default()
  };

  let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
  if args.today {
    filter.meeting_after = Some(midnight);
    filter.meeting_before = Some(midnight + Duration::days(1));
  } else if args.past {
    filter.meeting_before = Some(midnight);
  }

  let views = registry.leads(&filter);
  if json {
    return render::json(&views);
  }
  render::lead_table(&views);
  Ok(())
}

// ─── Single lead ──────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum LeadCommand {
  /// Full details for one lead.
  Show { id: String },

  /// Hand the lead to another agent.
  Reassign { id: String, agent: String },

  /// Replace the lead's working notes (empty clears them).
  Notes { id: String, notes: String },

  /// Record a new lead.
  Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
  #[arg(long)]
  company: String,

  #[arg(long)]
  contact: String,

  /// Expected deal value in whole dollars.
  #[arg(long, default_value_t = 0)]
  value: u64,

  #[arg(long, default_value = "new")]
  status: LeadStatus,

  /// Agent to assign the lead to.
  #[arg(long)]
  agent: String,

  #[arg(long)]
  email: Option<String>,

  #[arg(long)]
  phone: Option<String>,

  #[arg(long)]
  linkedin: Option<String>,

  #[arg(long)]
  notes: Option<String>,
}

pub fn run(
  registry: &mut Registry,
  command: LeadCommand,
  json: bool,
) -> Result<()> {
  match command {
    LeadCommand::Show { id } => {
      let view = registry.lead(&id.into())?;
      if json {
        return render::json(&view);
      }
      render::lead_detail(&view);
    }

    LeadCommand::Reassign { id, agent } => {
      let view = registry.reassign_lead(&id.into(), &agent.into())?;
      if json {
        return render::json(&view);
      }
    }

    LeadCommand::Notes { id, notes } => {
      // Whole-record replace: fetch the current record, swap the notes
      // field, save it back.
      let mut lead = registry.lead(&id.into())?.lead;
      let trimmed = notes.trim();
      lead.notes = (!trimmed.is_empty()).then(|| trimmed.to_owned());
      let view = registry.save_lead(lead)?;
      if json {
        return render::json(&view);
      }
    }

    LeadCommand::Add(args) => {
      let view = registry.add_lead(NewLead {
        company: args.company,
        contact: args.contact,
        email: args.email,
        phone: args.phone,
        linkedin: args.linkedin,
        value: args.value,
        status: args.status,
        assigned_to: args.agent.into(),
        meeting_time: None,
        notes: args.notes,
        intelligence_notes: Vec::new(),
        buyer_questions: Vec::new(),
      })?;
      if json {
        return render::json(&view);
      }
    }
  }
  Ok(())
}
