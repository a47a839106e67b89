//! Telegram adapter (teloxide).
//!
//! This crate implements the `ftb-core` MessagingPort over the Telegram Bot
//! API and hosts the long-polling event loop.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{ParseMode, Recipient},
};

pub mod handlers;
pub mod router;

use ftb_core::{domain::ChatId, errors::Error, ports::MessagingPort, Result};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn recipient(chat_id: &ChatId) -> Recipient {
        match chat_id.as_str().parse::<i64>() {
            Ok(id) => Recipient::Id(teloxide::types::ChatId(id)),
            // Non-numeric ids are channel usernames.
            Err(_) => Recipient::ChannelUsername(chat_id.0.clone()),
        }
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_markdown(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::recipient(chat_id), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_username_recipients() {
        assert!(matches!(
            TelegramMessenger::recipient(&ChatId("12345".into())),
            Recipient::Id(teloxide::types::ChatId(12345))
        ));
        assert!(matches!(
            TelegramMessenger::recipient(&ChatId("-100987".into())),
            Recipient::Id(teloxide::types::ChatId(-100987))
        ));
        match TelegramMessenger::recipient(&ChatId("@boardfeed".into())) {
            Recipient::ChannelUsername(u) => assert_eq!(u, "@boardfeed"),
            other => panic!("expected username recipient, got {other:?}"),
        }
    }
}
