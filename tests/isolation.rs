//! Integration tests for handler crash isolation and problem reporting.

mod common;

use common::{CallLog, FailingHandler, PanickingHandler, StaticMembership, VerboseFailingHandler};
use ocf_ircbot::{Gate, ListenerRegistry};

fn registry_with(log: &CallLog, panic: bool) -> ListenerRegistry {
    let mut registry = ListenerRegistry::new();
    if panic {
        registry
            .register("broken", "^go (.*)$", PanickingHandler, Gate::NONE, "")
            .unwrap();
    } else {
        registry
            .register("broken", "^go (.*)$", FailingHandler, Gate::NONE, "")
            .unwrap();
    }
    registry
        .register("healthy", "^go", log.handler("after"), Gate::NONE, "")
        .unwrap();
    registry
}

#[tokio::test]
async fn test_failing_handler_is_contained() {
    let log = CallLog::default();
    let t = common::bot(registry_with(&log, false));

    let summary = t
        .bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::none())
        .await
        .unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(log.count("after"), 1);

    // Exactly one line, unpinged, naming the plugin and handler.
    assert_eq!(
        t.outbound.messages_to("#lab"),
        vec!["ircbot exception in broken/FailingHandler: boom"]
    );
}

#[tokio::test]
async fn test_panicking_handler_is_contained() {
    let log = CallLog::default();
    let t = common::bot(registry_with(&log, true));

    let summary = t
        .bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::none())
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(log.count("after"), 1);
    assert_eq!(
        t.outbound.messages_to("#lab"),
        vec!["ircbot exception in broken/PanickingHandler: panic: handler blew up"]
    );

    // The bot keeps working afterwards.
    t.bot
        .on_pubmsg("#lab", "alice", "go again", &StaticMembership::none())
        .await;
    assert_eq!(log.count("after"), 2);
}

#[tokio::test]
async fn test_fault_is_reported_with_message_context() {
    let log = CallLog::default();
    let t = common::bot(registry_with(&log, false));

    t.bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::oper("#lab", "alice"))
        .await;

    let reports = t.reporter.reports();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.summary, "ircbot exception in broken/FailingHandler: boom");
    assert_eq!(report.plugin.as_deref(), Some("broken"));
    assert_eq!(report.handler.as_deref(), Some("FailingHandler"));
    assert_eq!(report.channel.as_deref(), Some("#lab"));
    assert_eq!(report.nick.as_deref(), Some("alice"));
    assert_eq!(report.is_oper, Some(true));
    assert_eq!(report.raw_text.as_deref(), Some("go now"));
    assert_eq!(report.groups, vec![Some("now".to_string())]);
}

#[tokio::test]
async fn test_testing_mode_only_logs() {
    let log = CallLog::default();
    let mut settings = common::settings();
    settings.testing = true;
    let t = common::build(settings, registry_with(&log, false));

    t.bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::none())
        .await;

    assert!(t.reporter.reports().is_empty());
    // The user still hears about it.
    assert_eq!(t.outbound.messages_to("#lab").len(), 1);
}

#[tokio::test]
async fn test_fault_in_private_message_replies_privately() {
    let log = CallLog::default();
    let t = common::bot(registry_with(&log, false));

    t.bot.on_privmsg("alice", "go now").await;

    assert_eq!(
        t.outbound.messages_to("alice"),
        vec!["ircbot exception in broken/FailingHandler: boom"]
    );
}

fn registry_failing_with(message: String) -> ListenerRegistry {
    let mut registry = ListenerRegistry::new();
    registry
        .register("broken", "^go", VerboseFailingHandler(message), Gate::NONE, "")
        .unwrap();
    registry
}

#[tokio::test]
async fn test_multiline_fault_announces_first_line_only() {
    let t = common::bot(registry_failing_with(
        "upstream said:\nline two\nline three".to_string(),
    ));

    t.bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::none())
        .await;

    assert_eq!(
        t.outbound.messages_to("#lab"),
        vec!["ircbot exception in broken/VerboseFailingHandler: upstream said:"]
    );

    // The report keeps everything.
    let reports = t.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].summary.ends_with("upstream said:\nline two\nline three"));
}

#[tokio::test]
async fn test_long_fault_announces_one_line() {
    let t = common::bot(registry_failing_with("x".repeat(900)));

    t.bot
        .on_pubmsg("#lab", "alice", "go now", &StaticMembership::none())
        .await;

    let replies = t.outbound.messages_to("#lab");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("ircbot exception in broken/VerboseFailingHandler: xxx"));
    assert!(replies[0].len() < 512);

    let reports = t.reporter.reports();
    assert!(reports[0].summary.ends_with(&"x".repeat(900)));
}
