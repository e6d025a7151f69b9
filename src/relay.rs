//! HTTP relay that forwards game outcome messages to the chat API.
//!
//! `POST /send-message` with `{"message": "..."}` posts the text to the
//! configured chat through the Telegram Bot API. CORS is open to any origin
//! so a page served from anywhere can call it.

use crate::config::RelayConfig;
use crate::notifier::SendMessageRequest;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, Error};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, instrument, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct RelayState {
    client: reqwest::Client,
    config: Arc<RelayConfig>,
}

impl RelayState {
    /// Creates state for `config` with a fresh HTTP client.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Posts `text` to the configured chat and returns the API's JSON reply.
    #[instrument(skip(self, text), fields(chat_id = %self.config.chat_id()))]
    pub async fn forward(&self, text: &str) -> Result<Value, RelayError> {
        let body = json!({
            "chat_id": self.config.chat_id(),
            "text": text,
        });

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::upstream(format!("Request failed: {}", e.without_url())))?
            .error_for_status()
            .map_err(|e| RelayError::upstream(format!("Chat API error: {}", e.without_url())))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::upstream(format!("Unreadable chat API reply: {}", e)))
    }
}

/// Builds the relay router.
pub fn router(config: RelayConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/send-message", post(send_message))
        .route("/health", get(health))
        .with_state(RelayState::new(config))
        .layer(ServiceBuilder::new().map_request(log_request).layer(cors))
}

fn log_request(req: Request<Body>) -> Request<Body> {
    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

/// Serves the relay on an already bound listener until the task ends.
#[instrument(skip_all)]
pub async fn run(listener: TcpListener, config: RelayConfig) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Relay ready at http://{}/send-message", addr);
    axum::serve(listener, router(config)).await
}

/// Binds the configured address and serves the relay.
#[instrument]
pub async fn serve(config: RelayConfig) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host(), config.port());
    let listener = TcpListener::bind(&addr).await?;
    run(listener, config).await
}

#[instrument(skip_all)]
async fn send_message(
    State(state): State<RelayState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<Value>, RelayError> {
    let message = match req.message {
        Some(m) if !m.is_empty() => m,
        _ => {
            warn!("Rejecting request without a message");
            return Err(RelayError::new(RelayErrorKind::MissingMessage));
        }
    };

    let upstream = state.forward(&message).await.inspect_err(|e| {
        error!(error = %e, "Failed to send message to chat");
    })?;

    info!("Message forwarded to chat");
    Ok(Json(json!({ "success": true, "response": upstream })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Kinds of relay failures.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RelayErrorKind {
    /// Request had no message, or an empty one.
    #[display("Message not provided")]
    MissingMessage,
    /// The chat API could not be reached or refused the message.
    #[display("Upstream failure: {}", _0)]
    Upstream(String),
}

/// Relay error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Relay error: {} at {}:{}", kind, file, line)]
pub struct RelayError {
    /// What went wrong.
    pub kind: RelayErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RelayError {
    /// Creates a new relay error.
    #[track_caller]
    pub fn new(kind: RelayErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an upstream failure.
    #[track_caller]
    pub fn upstream(message: String) -> Self {
        Self::new(RelayErrorKind::Upstream(message))
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self.kind {
            RelayErrorKind::MissingMessage => StatusCode::BAD_REQUEST,
            RelayErrorKind::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Upstream details stay in the logs.
        let public = match self.kind {
            RelayErrorKind::MissingMessage => "Message not provided",
            RelayErrorKind::Upstream(_) => "Failed to send message",
        };
        (status, Json(json!({ "error": public }))).into_response()
    }
}
