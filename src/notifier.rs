//! Outcome notifications sent to the chat relay.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, instrument, warn};

/// Fire-and-forget sink for game outcome messages.
///
/// Implementations must return promptly; delivery happens in the
/// background and its result is only logged.
pub trait Notifier: Send + Sync {
    /// Queues `text` for delivery.
    fn notify(&self, text: String);
}

/// Request body accepted by the relay's `/send-message` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, derive_new::new)]
pub struct SendMessageRequest {
    /// Text to forward to the chat.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body returned by the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayReply {
    /// Always true on success.
    pub success: bool,
    /// Upstream chat API response.
    pub response: serde_json::Value,
}

/// Posts messages to the relay over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    /// Creates a notifier for the relay at `relay_url`.
    #[instrument]
    pub fn new(relay_url: &str) -> Self {
        let endpoint = format!("{}/send-message", relay_url.trim_end_matches('/'));
        debug!(endpoint = %endpoint, "Creating HTTP notifier");
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Sends `text` and waits for the relay's answer.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn send(&self, text: &str) -> Result<RelayReply, NotifyError> {
        let body = SendMessageRequest::new(Some(text.to_string()));
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::new(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::new(format!(
                "Relay returned {}: {}",
                status, detail
            )));
        }

        response
            .json::<RelayReply>()
            .await
            .map_err(|e| NotifyError::new(format!("Invalid relay response: {}", e)))
    }
}

impl Notifier for HttpNotifier {
    fn notify(&self, text: String) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, dropping notification");
            return;
        };
        let notifier = self.clone();
        handle.spawn(async move {
            match notifier.send(&text).await {
                Ok(_) => info!("Notification delivered to chat"),
                Err(e) => error!(error = %e, "Failed to deliver notification"),
            }
        });
    }
}

/// Drops every message. Used when playing offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, text: String) {
        debug!(text = %text, "Offline, notification skipped");
    }
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: String) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(text),
            Err(e) => warn!(error = %e, "Recorder lock poisoned"),
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, text: String) {
        (**self).notify(text)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, text: String) {
        (**self).notify(text)
    }
}

/// Notification delivery error.
#[derive(Debug, Clone, Display, Error)]
#[display("Notify error: {} at {}:{}", message, file, line)]
pub struct NotifyError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl NotifyError {
    /// Creates a new notification error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
