//! Integration tests for background task supervision.

mod common;

use ocf_ircbot::ListenerRegistry;
use ocf_ircbot::error::TaskError;
use ocf_ircbot::tasks::supervise;

#[tokio::test]
async fn test_failed_task_is_announced_and_reported() {
    let t = common::bot(ListenerRegistry::new());

    let err = supervise(&t.bot, "timer", async { Err(anyhow::anyhow!("clock broke")) }).await;

    assert!(matches!(err, TaskError::Failed(_)));
    assert_eq!(
        t.outbound.messages_to("#rebuild"),
        vec!["ircbot exception in thread timer: clock broke"]
    );
    let reports = t.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].summary, "ircbot exception in thread timer: clock broke");
}

#[tokio::test]
async fn test_panicking_task_is_caught() {
    let t = common::bot(ListenerRegistry::new());

    let err = supervise(&t.bot, "worker", async {
        if true {
            panic!("worker died");
        }
        Ok(())
    })
    .await;

    assert!(matches!(err, TaskError::Panicked(ref m) if m == "worker died"));
    assert_eq!(t.reporter.reports().len(), 1);
}

#[tokio::test]
async fn test_returning_task_counts_as_failure() {
    let mut settings = common::settings();
    settings.testing = true;
    settings.alert_channel = None;
    let t = common::build(settings, ListenerRegistry::new());

    let err = supervise(&t.bot, "http", async { Ok(()) }).await;

    assert!(matches!(err, TaskError::Exited));
    // No alert channel, testing mode: nothing leaves the process.
    assert!(t.outbound.sent().is_empty());
    assert!(t.reporter.reports().is_empty());
}
