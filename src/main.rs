//! ircbot - OCF chat bot.

use ocf_ircbot::config::{Config, validate};
use ocf_ircbot::handlers::ListenerRegistry;
use ocf_ircbot::network::{self, IrcOutbound};
use ocf_ircbot::report::{ProblemReport, Reporting};
use ocf_ircbot::{Bot, BotParams, BotSettings, http, metrics, plugins, tasks, timer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ircbot.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        nickname = %config.bot.nickname,
        server = %config.irc.host,
        port = config.irc.port,
        testing = config.bot.testing,
        "Starting ircbot"
    );

    // A listener that fails to compile aborts startup.
    let mut registry = ListenerRegistry::new();
    plugins::register_all(&mut registry)?;

    let reporting = Reporting::from_config(config.bot.testing, &config.reporting)?;

    let mut client = irc::client::Client::from_config(network::client_config(&config)).await?;
    client.identify()?;

    let bot = Arc::new(Bot::new(BotParams {
        settings: BotSettings::from_config(&config),
        registry,
        outbound: Arc::new(IrcOutbound::new(client.sender())),
        reporting,
    }));

    if config.http.port != 0 {
        metrics::init();
        let port = config.http.port;
        tasks::spawn_task(
            Arc::clone(&bot),
            "http",
            http::run_http_server(Arc::clone(&bot), port),
        );
    }

    tasks::spawn_task(
        Arc::clone(&bot),
        "timer",
        timer::run(Arc::clone(&bot), Duration::from_secs(config.timer.interval_secs)),
    );

    // The connection loop only returns on failure.
    let err = match network::run(&bot, client).await {
        Ok(()) => anyhow::anyhow!("IRC connection loop returned"),
        Err(e) => e,
    };
    error!(error = %err, "Connection lost, exiting");
    let report = ProblemReport::new("ircbot exception in connection loop")
        .with_detail(format!("{err:?}"));
    bot.reporting().handle_error(&report).await;
    Err(err)
}
