use std::sync::Arc;

use ftb_core::{config::Config, dispatch};

/// Two execution contexts for the process lifetime: the webhook listener on
/// its own thread + runtime, and the Telegram event loop on a dedicated
/// current-thread runtime. The dispatch channel, created before either
/// starts, is the only link between them.
fn main() -> Result<(), ftb_core::Error> {
    ftb_core::logging::init("ftb")?;

    let cfg = Arc::new(Config::load()?);
    let (notifier, queue) = dispatch::channel();

    let http_cfg = cfg.clone();
    std::thread::Builder::new()
        .name("webhook".to_string())
        .spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("webhook runtime build");
            if let Err(e) = rt.block_on(ftb_http::serve(http_cfg, notifier)) {
                tracing::error!("webhook server failed: {e}");
            }
        })?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(ftb_telegram::router::run(cfg, queue))
        .map_err(|e| ftb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
