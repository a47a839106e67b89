//! Notification webhook listener (axum).
//!
//! Focalboard's notify service POSTs `{chat_id, message}` here; the handler
//! pushes the send across the dispatch bridge and answers synchronously.
//! Runs on its own runtime so inbound HTTP is never blocked by Telegram I/O
//! and vice versa.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use ftb_core::{config::Config, dispatch::Notifier, domain::ChatId};

#[derive(Clone)]
pub struct AppState {
    notifier: Notifier,
    dispatch_wait: Duration,
}

impl AppState {
    pub fn new(notifier: Notifier, dispatch_wait: Duration) -> Self {
        Self {
            notifier,
            dispatch_wait,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotificationRequest {
    #[serde(default)]
    chat_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/send-notification", post(send_notification))
        .route("/health", get(health))
        .with_state(state)
}

async fn send_notification(
    State(state): State<AppState>,
    Json(req): Json<NotificationRequest>,
) -> (StatusCode, Json<Value>) {
    let chat_id = req.chat_id.unwrap_or_default();
    let message = req.message.unwrap_or_default();
    if chat_id.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing data"})),
        );
    }

    match state
        .notifier
        .dispatch(ChatId(chat_id), message, state.dispatch_wait)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({"success": true}))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        ),
    }
}

/// Liveness only: no dependency checks, answers as soon as the listener is up.
async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"status": "ok", "bot": "running"})))
}

/// Bind and serve until the process exits.
pub async fn serve(cfg: Arc<Config>, notifier: Notifier) -> anyhow::Result<()> {
    let state = AppState::new(notifier, cfg.dispatch_timeout);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.webhook_port)).await?;
    tracing::info!("webhook server listening on port {}", cfg.webhook_port);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
