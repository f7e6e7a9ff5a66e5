//! Closed-deal reporting — linear sums over the lead collection.

use chrono::{Datelike, Weekday};

use funnel_core::{
  Result,
  id::AgentId,
  lead::Lead,
  view::{ClosedReport, WeekdayTotal},
};

use crate::Registry;

const WORKDAYS: [(Weekday, &str); 5] = [
  (Weekday::Mon, "Mon"),
  (Weekday::Tue, "Tue"),
  (Weekday::Wed, "Wed"),
  (Weekday::Thu, "Thu"),
  (Weekday::Fri, "Fri"),
];

impl Registry {
  /// Performance overview of `agent_id`'s closed deals.
  ///
  /// Weekday buckets are keyed off each deal's meeting time; deals without
  /// one contribute to the totals but to no bucket. "Recent" is the last
  /// five closed deals in recording order, newest first.
  pub fn closed_report(&self, agent_id: &AgentId) -> Result<ClosedReport> {
    let agent = self.agent(agent_id)?;

    let closed: Vec<&Lead> = self
      .leads
      .iter()
      .filter(|l| l.status.is_closed() && l.assigned_to == *agent_id)
      .collect();

    let total_closed = closed.len();
    let total_revenue: u64 = closed.iter().map(|l| l.value).sum();
    let average_deal_value = match total_closed {
      0 => 0,
      n => total_revenue / n as u64,
    };

    let weekly = WORKDAYS
      .iter()
      .map(|(day, label)| {
        let (count, revenue) = closed
          .iter()
          .filter(|l| l.meeting_time.is_some_and(|t| t.weekday() == *day))
          .fold((0u32, 0u64), |(count, revenue), l| {
            (count + 1, revenue + l.value)
          });
        WeekdayTotal { day: (*label).to_owned(), closed: count, revenue }
      })
      .collect();

    let recent = closed
      .iter()
      .rev()
      .take(5)
      .map(|lead| self.view(lead))
      .collect();

    Ok(ClosedReport {
      agent,
      total_closed,
      total_revenue,
      average_deal_value,
      weekly,
      recent,
    })
  }
}
