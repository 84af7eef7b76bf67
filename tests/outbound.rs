//! Integration tests for the outbound say path.

mod common;

use ocf_ircbot::ListenerRegistry;
use ocf_ircbot::outbound::framing_len;

#[tokio::test]
async fn test_long_line_is_segmented_losslessly() {
    let t = common::bot(ListenerRegistry::new());
    let text: String = "ab😀ç".repeat(150);

    let sent = t.bot.say("#lab", &text).unwrap();

    let chunks = t.outbound.messages_to("#lab");
    assert_eq!(chunks.len(), sent);
    assert!(sent > 1);
    for chunk in &chunks {
        assert!(framing_len("#lab") + chunk.len() <= t.bot.settings().max_line_bytes);
    }
    assert_eq!(chunks.concat(), text);
}

#[tokio::test]
async fn test_short_line_is_sent_as_is() {
    let t = common::bot(ListenerRegistry::new());

    assert_eq!(t.bot.say("#lab", "hello").unwrap(), 1);
    assert_eq!(t.outbound.messages_to("#lab"), vec!["hello"]);
}

#[tokio::test]
async fn test_multiline_text_sends_one_message_per_line() {
    let t = common::bot(ListenerRegistry::new());

    assert_eq!(t.bot.say("#lab", "one\n\ntwo\r\nthree").unwrap(), 3);
    assert_eq!(t.outbound.messages_to("#lab"), vec!["one", "two", "three"]);

    assert_eq!(t.bot.say("#lab", "").unwrap(), 0);
}

#[tokio::test]
async fn test_small_line_limit() {
    let mut settings = common::settings();
    settings.max_line_bytes = 64;
    let t = common::build(settings, ListenerRegistry::new());
    let text = "x".repeat(200);

    t.bot.say("#lab", &text).unwrap();

    let chunks = t.outbound.messages_to("#lab");
    assert!(chunks.iter().all(|c| c.len() + framing_len("#lab") <= 64));
    assert_eq!(chunks.concat(), text);
}
