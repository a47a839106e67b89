use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use ftb_core::{
    config::Config,
    dispatch::DispatchQueue,
    ports::{MessagingPort, VerifyPort},
};
use ftb_focalboard::FocalboardClient;

use crate::{handlers, TelegramMessenger};

pub struct AppState {
    pub cfg: Arc<Config>,
    pub messenger: Arc<dyn MessagingPort>,
    pub verifier: Arc<dyn VerifyPort>,
}

/// Run the Telegram event loop until the process exits.
///
/// Owns the single bot connection. Both the dispatch-queue worker and the
/// command dispatcher live on this runtime; all outbound sends happen here.
pub async fn run(cfg: Arc<Config>, queue: DispatchQueue) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        println!("ftb started: @{}", me.username());
    }
    println!(
        "Webhook endpoint: http://localhost:{}/send-notification",
        cfg.webhook_port
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let verifier: Arc<dyn VerifyPort> = Arc::new(FocalboardClient::new(
        cfg.focalboard_api_url.clone(),
        cfg.verify_timeout,
    ));

    // The only cross-context entry point: bridged notification sends drain
    // here, in submission order.
    tokio::spawn(queue.run(messenger.clone()));

    let state = Arc::new(AppState {
        cfg,
        messenger,
        verifier,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
