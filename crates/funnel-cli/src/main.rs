//! `funnel` — terminal dashboard for the sales lead pipeline.
//!
//! # Usage
//!
//! ```
//! funnel leads --today
//! funnel lead reassign 3 2
//! funnel notes list --qualified
//! funnel report --agent 1
//! funnel admin companies --query acme
//! ```
//!
//! State is seeded from the demo fixtures at start and lives for the life
//! of the process; there is no persistence layer behind the registry.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use funnel_core::notify::{
  Notification, NotificationKind, NotificationSink, TracingSink,
};
use funnel_registry::{Registry, fixtures::Seed};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "funnel", about = "Sales lead pipeline dashboard")]
struct Args {
  /// Path to a TOML config file (default agent id for reports).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Emit JSON instead of tables.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List agents leads can be assigned to.
  Agents,
  /// List leads in the pipeline.
  Leads(commands::leads::ListArgs),
  /// Inspect or edit a single lead.
  Lead {
    #[command(subcommand)]
    command: commands::leads::LeadCommand,
  },
  /// Review or record call notes.
  Notes {
    #[command(subcommand)]
    command: commands::notes::NotesCommand,
  },
  /// Closed-deal performance report.
  Report(commands::report::ReportArgs),
  /// Manage companies, features, groups, and users.
  Admin {
    #[command(subcommand)]
    command: commands::admin::AdminCommand,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  agent: String,
}

// ─── Notification sink ────────────────────────────────────────────────────────

/// Prints each one-shot notification the way the dashboard would toast it.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
  fn notify(&self, notification: Notification) {
    match notification.kind {
      NotificationKind::Success => println!("ok: {}", notification.message),
      NotificationKind::Error => eprintln!("error: {}", notification.message),
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // Config file overrides the built-in default; the report's own --agent
  // flag overrides both.
  let default_agent = if file_cfg.agent.is_empty() {
    "1".to_owned()
  } else {
    file_cfg.agent
  };

  // In JSON mode notifications go to the log rather than stdout, so the
  // output stays parseable.
  let sink: Box<dyn NotificationSink> = if args.json {
    Box::new(TracingSink)
  } else {
    Box::new(ConsoleSink)
  };
  let mut registry = Registry::new(Seed::demo(), sink);

  match args.command {
    Command::Agents => {
      let agents = registry.agents();
      if args.json {
        return render::json(&agents);
      }
      for agent in agents {
        println!("[{}] {}", agent.id, agent.name);
      }
      Ok(())
    }
    Command::Leads(list) => commands::leads::list(&registry, &list, args.json),
    Command::Lead { command } => {
      commands::leads::run(&mut registry, command, args.json)
    }
    Command::Notes { command } => {
      commands::notes::run(&mut registry, command, args.json)
    }
    Command::Report(report) => {
      commands::report::run(&registry, &report, &default_agent, args.json)
    }
    Command::Admin { command } => {
      commands::admin::run(&mut registry, command, args.json)
    }
  }
}
