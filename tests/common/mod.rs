//! Integration test common infrastructure.
//!
//! Provides in-memory stand-ins for the bot's collaborators (outbound
//! connection, channel membership, problem reporting), test handlers, and a
//! builder that wires them into a [`Bot`].

pub mod handlers;
pub mod outbound;
pub mod reporter;

#[allow(unused_imports)]
pub use handlers::{
    CallLog, FailingHandler, PanickingHandler, RecordingHandler, VerboseFailingHandler,
};
#[allow(unused_imports)]
pub use outbound::{RecordingOutbound, Sent, StaticMembership};
#[allow(unused_imports)]
pub use reporter::CollectingReporter;

use ocf_ircbot::handlers::ListenerRegistry;
use ocf_ircbot::report::Reporting;
use ocf_ircbot::{Bot, BotParams, BotSettings};
use std::sync::Arc;

/// A bot wired to recording collaborators.
#[allow(dead_code)]
pub struct TestBot {
    pub bot: Arc<Bot>,
    pub outbound: Arc<RecordingOutbound>,
    pub reporter: Arc<CollectingReporter>,
}

/// Default settings: nickname `create`, `#rebuild` privileged, `#announce`
/// an announce channel, production reporting.
#[allow(dead_code)]
pub fn settings() -> BotSettings {
    let mut settings = BotSettings::new("create");
    settings.ignore_prefix = "bot-".to_string();
    settings.privileged_channels = vec!["#rebuild".to_string()];
    settings.announce_channels = vec!["#announce".to_string()];
    settings.alert_channel = Some("#rebuild".to_string());
    settings
}

#[allow(dead_code)]
pub fn build(settings: BotSettings, registry: ListenerRegistry) -> TestBot {
    let outbound = Arc::new(RecordingOutbound::default());
    let reporter = Arc::new(CollectingReporter::default());
    let reporting = Reporting::new(settings.testing, reporter.clone());

    let bot = Arc::new(Bot::new(BotParams {
        settings,
        registry,
        outbound: outbound.clone(),
        reporting,
    }));

    TestBot {
        bot,
        outbound,
        reporter,
    }
}

/// Build a bot with the default test settings.
#[allow(dead_code)]
pub fn bot(registry: ListenerRegistry) -> TestBot {
    build(settings(), registry)
}

/// A bot with every bundled plugin registered.
#[allow(dead_code)]
pub fn bot_with_plugins() -> TestBot {
    let mut registry = ListenerRegistry::new();
    ocf_ircbot::plugins::register_all(&mut registry).expect("bundled plugins register");
    bot(registry)
}
