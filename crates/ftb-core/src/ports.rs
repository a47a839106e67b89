use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Outcome of asking Focalboard to validate a linking code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Focalboard accepted the (code, chat id) pair.
    Linked,
    /// Focalboard answered but refused the code.
    Rejected,
    /// Focalboard could not be reached (or errored at transport level).
    NetworkFailure,
}

/// Port for the Focalboard verification API.
///
/// Infallible by design: every failure mode folds into a [`LinkOutcome`]
/// variant so command handlers can always produce a user-facing reply.
#[async_trait]
pub trait VerifyPort: Send + Sync {
    async fn verify(&self, code: &str, chat_id: &ChatId) -> LinkOutcome;
}

/// Port for outbound chat messages.
///
/// Telegram is the only implementation today; the shape is kept minimal so a
/// future adapter (or a test fake) fits behind the same interface.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Send `text` (Markdown emphasis allowed) to `chat_id`.
    async fn send_markdown(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}
