//! Handlers for the `notes` subcommands.

use anyhow::Result;
use clap::Subcommand;

use funnel_core::note::NewCallNote;
use funnel_registry::{Registry, query::NoteFilter};

use crate::render;

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
  /// List call notes.
  List(ListArgs),

  /// Record details from a call you just made.
  Add(AddArgs),

  /// Edit an existing call note (whole-record save).
  Edit(EditArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
  /// Free-text search over company, contact, and key matches.
  #[arg(short, long)]
  query: Option<String>,

  /// Only qualified calls.
  #[arg(long, conflicts_with = "unqualified")]
  qualified: bool,

  /// Only unqualified calls.
  #[arg(long)]
  unqualified: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
  #[arg(long)]
  company: String,

  #[arg(long)]
  contact: String,

  /// Call duration as free text, e.g. "12m 34s".
  #[arg(long)]
  duration: String,

  /// Key match; repeat the flag to record several.
  #[arg(long = "key-match")]
  key_matches: Vec<String>,

  /// Mark the call as a qualified lead.
  #[arg(long)]
  qualified: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
  id: String,

  #[arg(long)]
  duration: Option<String>,

  /// Add a key match; repeat the flag to record several.
  #[arg(long = "key-match")]
  key_matches: Vec<String>,

  /// Mark the call qualified.
  #[arg(long, conflicts_with = "unqualified")]
  qualified: bool,

  /// Mark the call unqualified.
  #[arg(long)]
  unqualified: bool,
}

pub fn run(
  registry: &mut Registry,
  command: NotesCommand,
  json: bool,
) -> Result<()> {
  match command {
    NotesCommand::List(args) => {
      let filter = NoteFilter {
        text:      args.query,
        qualified: match (args.qualified, args.unqualified) {
          (true, _) => Some(true),
          (_, true) => Some(false),
          _ => None,
        },
      };
      let notes = registry.notes(&filter);
      if json {
        return render::json(&notes);
      }
      render::note_list(&notes);
    }

    NotesCommand::Add(args) => {
      let note = registry.add_note(NewCallNote {
        company:     args.company,
        contact:     args.contact,
        duration:    args.duration,
        key_matches: args.key_matches,
        qualified:   args.qualified,
      })?;
      if json {
        return render::json(&note);
      }
    }

    NotesCommand::Edit(args) => {
      let mut note = registry.note(&args.id.into())?;
      if let Some(duration) = args.duration {
        note.duration = duration;
      }
      // The save dedupes the key matches.
      note.key_matches.extend(args.key_matches);
      if args.qualified {
        note.qualified = true;
      } else if args.unqualified {
        note.qualified = false;
      }
      let saved = registry.save_note(note)?;
      if json {
        return render::json(&saved);
      }
    }
  }
  Ok(())
}
