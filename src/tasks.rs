//! Background task supervision.
//!
//! Background units (the daily timer, the HTTP endpoint) are not expected to
//! stop. When one fails, panics or returns, the failure is announced in the
//! alert channel, reported, and the process exits so an external supervisor
//! can restart it with clean state.

use crate::bot::Bot;
use crate::error::{TaskError, panic_message};
use crate::report::ProblemReport;
use futures_util::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Run `task` to completion and turn however it stopped into a [`TaskError`],
/// announcing and reporting it on the way out.
pub async fn supervise<F>(bot: &Bot, name: &str, task: F) -> TaskError
where
    F: Future<Output = anyhow::Result<()>>,
{
    let err = match AssertUnwindSafe(task).catch_unwind().await {
        Ok(Ok(())) => TaskError::Exited,
        Ok(Err(e)) => TaskError::Failed(e),
        Err(payload) => TaskError::Panicked(panic_message(payload.as_ref())),
    };

    let summary = format!("ircbot exception in thread {name}: {err}");
    error!(task = name, error = %err, "Background task stopped");

    if let Some(channel) = bot.settings().alert_channel.as_deref()
        && let Err(e) = bot.say(channel, &summary)
    {
        warn!(channel, error = %e, "Failed to announce task failure");
    }

    let detail = match &err {
        TaskError::Failed(e) => format!("{e:?}"),
        other => other.to_string(),
    };
    bot.reporting()
        .handle_error(&ProblemReport::new(summary).with_detail(detail))
        .await;

    err
}

/// Spawn a supervised background task. The process exits with status 1 once
/// the task stops.
pub fn spawn_task<F>(bot: Arc<Bot>, name: &'static str, task: F) -> tokio::task::JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    info!(task = name, "Starting background task");
    tokio::spawn(async move {
        let _ = supervise(&bot, name, task).await;
        std::process::exit(1);
    })
}
