//! Cross-context dispatch bridge.
//!
//! The HTTP listener and the Telegram event loop live on different runtimes.
//! The listener cannot touch the bot connection directly; instead it submits
//! a [`DispatchTask`] over a thread-safe channel owned by the loop's runtime
//! and awaits a oneshot completion signal with a bounded wait.
//!
//! Timeout abandons the *wait*, not the task: a send that outlives the
//! waiter still runs to completion (or failure) on the loop with no further
//! observer. Callers get at-most-once observed completion, not a guarantee
//! that the send was abandoned.

use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, oneshot};

use crate::{domain::ChatId, ports::MessagingPort};

/// Failure modes of a bridged send, as observed by the submitting context.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The chat platform rejected the send (unknown chat id, blocked bot, ...).
    #[error("send failed: {0}")]
    SendFailed(String),

    /// No resolution within the bounded wait. The underlying send is not
    /// cancelled and may still complete later.
    #[error("timed out waiting for message delivery")]
    Timeout,

    /// The event loop is gone (or died mid-task), so the send can never be
    /// observed to complete.
    #[error("event loop unavailable")]
    LoopUnavailable,
}

/// A deferred send plus the signal its submitter waits on.
struct DispatchTask {
    chat_id: ChatId,
    message: String,
    done: oneshot::Sender<Result<(), DispatchError>>,
}

/// Submitting half of the bridge. Cheap to clone; safe to use from any
/// thread or runtime.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<DispatchTask>,
}

/// Receiving half of the bridge, owned by the event-loop runtime.
pub struct DispatchQueue {
    rx: mpsc::UnboundedReceiver<DispatchTask>,
}

/// Create a connected `(Notifier, DispatchQueue)` pair.
///
/// Build this before starting either execution context and hand the halves
/// into the HTTP listener and the bot runtime respectively; there is no
/// post-startup publication step.
pub fn channel() -> (Notifier, DispatchQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, DispatchQueue { rx })
}

impl Notifier {
    /// Submit a send to the event loop and wait up to `wait` for its outcome.
    pub async fn dispatch(
        &self,
        chat_id: ChatId,
        message: String,
        wait: Duration,
    ) -> Result<(), DispatchError> {
        let (done, outcome) = oneshot::channel();
        self.tx
            .send(DispatchTask {
                chat_id,
                message,
                done,
            })
            .map_err(|_| DispatchError::LoopUnavailable)?;

        match tokio::time::timeout(wait, outcome).await {
            Err(_) => Err(DispatchError::Timeout),
            // Loop dropped the task without resolving it.
            Ok(Err(_)) => Err(DispatchError::LoopUnavailable),
            Ok(Ok(result)) => result,
        }
    }
}

impl DispatchQueue {
    /// Drain the queue forever, performing each send via `messenger`.
    ///
    /// Must run inside the event-loop runtime. Tasks are started in
    /// submission order; each send is spawned so a slow one never stalls the
    /// queue behind it. Completion signals to waiters that already gave up
    /// are dropped silently.
    pub async fn run(mut self, messenger: Arc<dyn MessagingPort>) {
        while let Some(task) = self.rx.recv().await {
            let messenger = messenger.clone();
            tokio::spawn(async move {
                let result = messenger
                    .send_markdown(&task.chat_id, &task.message)
                    .await
                    .map_err(|e| DispatchError::SendFailed(e.to_string()));
                if let Err(e) = &result {
                    tracing::warn!(chat_id = %task.chat_id, "bridged send failed: {e}");
                }
                let _ = task.done.send(result);
            });
        }
    }
}
