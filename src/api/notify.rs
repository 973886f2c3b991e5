//! Outbound notification sink.
//!
//! New-order alerts and login codes go out through one narrow trait. The
//! default sender for local dev logs the payload and returns `Ok`; when a
//! webhook URL is configured, messages are POSTed there as JSON with a
//! bounded timeout. Delivery is fire-and-forget: [`dispatch`] spawns the
//! send and a failure is logged and swallowed, never surfaced to the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::cli::globals::GlobalArgs;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Delivery abstraction for outbound alerts.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification or return an error; callers treat delivery as
    /// best-effort either way.
    async fn send(&self, note: &Notification) -> Result<()>;
}

/// Local dev sender that logs the payload instead of delivering it.
#[derive(Clone, Debug)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, note: &Notification) -> Result<()> {
        info!(subject = %note.subject, body = %note.body, "notification send stub");
        Ok(())
    }
}

/// Webhook sender: POSTs `{subject, body}` to a fixed URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: Url,
    token: Option<SecretString>,
}

impl WebhookSink {
    /// # Errors
    /// Returns an error if `url` does not parse or the HTTP client cannot
    /// be constructed.
    pub fn new(url: &str, token: Option<SecretString>) -> Result<Self> {
        let url = Url::parse(url).context("Invalid notification webhook URL")?;
        let client = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Failed to build notification HTTP client")?;
        Ok(Self { client, url, token })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(&self, note: &Notification) -> Result<()> {
        let mut request = self.client.post(self.url.clone()).json(&json!({
            "subject": note.subject,
            "body": note.body,
        }));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .context("Notification webhook unreachable")?;
        response
            .error_for_status()
            .context("Notification webhook rejected the message")?;
        Ok(())
    }
}

/// Pick the sink for this deployment: webhook when configured, log stub
/// otherwise.
/// # Errors
/// Returns an error when the configured webhook URL is invalid.
pub fn from_globals(globals: &GlobalArgs) -> Result<Arc<dyn NotificationSink>> {
    match &globals.notify_url {
        Some(url) => Ok(Arc::new(WebhookSink::new(url, globals.notify_token.clone())?)),
        None => Ok(Arc::new(LogSink)),
    }
}

/// Fire-and-forget dispatch: spawn the send and swallow failures.
pub fn dispatch(sink: &Arc<dyn NotificationSink>, note: Notification) {
    let sink = Arc::clone(sink);
    tokio::spawn(async move {
        if let Err(err) = sink.send(&note).await {
            warn!(subject = %note.subject, "Notification dispatch failed: {err:#}");
        }
    });
}
