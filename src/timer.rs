//! Daily topic timer.

use crate::bot::Bot;
use crate::report::ProblemReport;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Remembers the last date seen and notices when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTracker {
    last: NaiveDate,
}

impl DayTracker {
    pub fn new(today: NaiveDate) -> Self {
        Self { last: today }
    }

    /// Record `today`; true when it differs from the previous date.
    pub fn advance(&mut self, today: NaiveDate) -> bool {
        if today == self.last {
            return false;
        }
        self.last = today;
        true
    }
}

/// Check the local date every `interval` and bump topics when it rolls over.
///
/// Never returns under normal operation. A failed bump is reported and the
/// loop keeps going; it will try again the next day.
pub async fn run(bot: Arc<Bot>, interval: Duration) -> anyhow::Result<()> {
    let mut tracker = DayTracker::new(Local::now().date_naive());
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let today = Local::now().date_naive();
        if !tracker.advance(today) {
            continue;
        }

        info!(%today, "New day, bumping topics");
        match bot.bump_topic() {
            Ok(channels) => debug!(count = channels.len(), "Topic bump requested"),
            Err(e) => {
                let report = ProblemReport::new("ircbot exception in daily topic bump")
                    .with_detail(e.to_string());
                bot.reporting().handle_error(&report).await;
            }
        }
    }
}
