//! Problem reports for operators.
//!
//! Handler faults and background task failures are written to the local log
//! and, in production, forwarded to an external alerting sink. Development
//! deployments (`bot.testing`) only log, so a developer's broken plugin does
//! not page anyone.

use crate::config::ReportingConfig;
use crate::error::ReportError;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Everything an operator needs to reproduce a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProblemReport {
    /// One line, e.g. `ircbot exception in reverse/ReverseHandler: boom`.
    pub summary: String,
    /// Longer diagnostic text (error chain, panic message).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_oper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Option<String>>,
}

impl ProblemReport {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Plain-text rendering used for the local log and mail-style sinks.
    pub fn render(&self) -> String {
        let mut out = self.summary.clone();
        if let Some(detail) = &self.detail {
            let _ = write!(out, "\n\n{detail}");
        }
        if self.channel.is_some() || self.nick.is_some() || self.raw_text.is_some() {
            out.push_str("\n\nMessage:");
            let field = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();
            let _ = write!(out, "\n    * Channel: {}", field(&self.channel));
            let _ = write!(out, "\n    * Nick: {}", field(&self.nick));
            let _ = write!(out, "\n    * Oper?: {}", self.is_oper.unwrap_or(false));
            let _ = write!(out, "\n    * Text: {}", field(&self.text));
            let _ = write!(out, "\n    * Raw text: {}", field(&self.raw_text));
            let _ = write!(out, "\n    * Match groups: {:?}", self.groups);
        }
        out
    }
}

/// External alerting collaborator.
#[async_trait]
pub trait ProblemReporter: Send + Sync {
    async fn report(&self, report: &ProblemReport) -> Result<(), ReportError>;
}

/// Sink that only writes to the local log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

#[async_trait]
impl ProblemReporter for LogReporter {
    async fn report(&self, report: &ProblemReport) -> Result<(), ReportError> {
        error!(summary = %report.summary, "Problem report (no remote sink configured)");
        Ok(())
    }
}

/// Sink that POSTs the report as JSON to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookReporter {
    client: reqwest::Client,
    url: String,
}

impl WebhookReporter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ProblemReporter for WebhookReporter {
    async fn report(&self, report: &ProblemReport) -> Result<(), ReportError> {
        let response = self.client.post(&self.url).json(report).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Routes reports: always logged locally, forwarded unless in testing mode.
#[derive(Clone)]
pub struct Reporting {
    testing: bool,
    sink: Arc<dyn ProblemReporter>,
}

impl Reporting {
    pub fn new(testing: bool, sink: Arc<dyn ProblemReporter>) -> Self {
        Self { testing, sink }
    }

    /// Build the production sink from config.
    pub fn from_config(testing: bool, config: &ReportingConfig) -> Result<Self, ReportError> {
        let sink: Arc<dyn ProblemReporter> = match &config.webhook_url {
            Some(url) => Arc::new(WebhookReporter::new(
                url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?),
            None => Arc::new(LogReporter),
        };
        Ok(Self::new(testing, sink))
    }

    pub fn is_testing(&self) -> bool {
        self.testing
    }

    /// Log the report and, outside testing mode, forward it to the sink.
    ///
    /// Delivery failures are logged and otherwise ignored.
    pub async fn handle_error(&self, report: &ProblemReport) {
        error!("{}", report.render());

        if self.testing {
            return;
        }

        if let Err(e) = self.sink.report(report).await {
            warn!(error = %e, summary = %report.summary, "Failed to deliver problem report");
        }
    }
}
