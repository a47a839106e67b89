use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the bridge.
///
/// Everything comes from the environment (with optional `.env` convenience
/// loading). Only the bot token is required; the process refuses to start
/// without it.
#[derive(Clone, Debug)]
pub struct Config {
    pub focalboard_api_url: String,
    pub telegram_bot_token: String,
    pub webhook_port: u16,

    /// Timeout for one verification call against Focalboard.
    pub verify_timeout: Duration,
    /// How long the HTTP listener waits for a bridged send to resolve.
    pub dispatch_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let focalboard_api_url = env_str("FOCALBOARD_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| "http://localhost:8000".to_string());
        // Trailing slashes would double up when joining API paths.
        let focalboard_api_url = focalboard_api_url.trim_end_matches('/').to_string();

        let webhook_port = env_u16("WEBHOOK_PORT").unwrap_or(8001);

        let verify_timeout = Duration::from_millis(env_u64("VERIFY_TIMEOUT_MS").unwrap_or(5_000));
        let dispatch_timeout =
            Duration::from_millis(env_u64("DISPATCH_TIMEOUT_MS").unwrap_or(10_000));

        Ok(Self {
            focalboard_api_url,
            telegram_bot_token,
            webhook_port,
            verify_timeout,
            dispatch_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u16(key: &str) -> Option<u16> {
    env_str(key).and_then(|s| s.trim().parse::<u16>().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
