use std::sync::Arc;

use teloxide::prelude::*;

use ftb_core::{commands, domain::ChatId};

use crate::router::AppState;

/// Message endpoint. Non-command and unknown-command messages are ignored;
/// reply failures are logged and dropped so one bad command can never take
/// down the event loop.
pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(cmd) = commands::parse_command(text) else {
        return Ok(());
    };

    let chat_id = ChatId::from(msg.chat.id.0);
    if let Err(e) = commands::respond(
        cmd,
        chat_id,
        state.verifier.as_ref(),
        state.messenger.as_ref(),
    )
    .await
    {
        tracing::error!(chat_id = msg.chat.id.0, "command reply failed: {e}");
    }

    Ok(())
}
