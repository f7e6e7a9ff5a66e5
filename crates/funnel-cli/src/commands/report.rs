//! Handler for the closed-deal performance report.

use anyhow::Result;

use funnel_registry::Registry;

use crate::render;

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
  /// Agent whose pipeline to report on (defaults to the configured
  /// agent).
  #[arg(long)]
  agent: Option<String>,
}

pub fn run(
  registry: &Registry,
  args: &ReportArgs,
  default_agent: &str,
  json: bool,
) -> Result<()> {
  let agent = args.agent.as_deref().unwrap_or(default_agent);
  let report = registry.closed_report(&agent.into())?;
  if json {
    return render::json(&report);
  }
  render::closed_report(&report);
  Ok(())
}
