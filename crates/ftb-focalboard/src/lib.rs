//! Focalboard adapter (account-link verification).
//!
//! One endpoint: `GET /api/v2/telegram/verify?code=..&chat_id=..`. HTTP 200
//! means Focalboard accepted the pair and persisted the link on its side.

use std::time::Duration;

use async_trait::async_trait;

use ftb_core::{
    domain::ChatId,
    ports::{LinkOutcome, VerifyPort},
};

#[derive(Clone, Debug)]
pub struct FocalboardClient {
    base_url: String,
    http: reqwest::Client,
}

impl FocalboardClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn verify_url(&self) -> String {
        format!("{}/api/v2/telegram/verify", self.base_url)
    }
}

#[async_trait]
impl VerifyPort for FocalboardClient {
    async fn verify(&self, code: &str, chat_id: &ChatId) -> LinkOutcome {
        let resp = self
            .http
            .get(self.verify_url())
            .query(&[("code", code), ("chat_id", chat_id.as_str())])
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => LinkOutcome::Linked,
            Ok(r) => {
                tracing::info!(status = %r.status(), %chat_id, "focalboard rejected linking code");
                LinkOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!("focalboard verify request failed: {e}");
                LinkOutcome::NetworkFailure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_url_joins_base_without_doubling_slashes() {
        let c = FocalboardClient::new("http://localhost:8000", Duration::from_secs(5));
        assert_eq!(
            c.verify_url(),
            "http://localhost:8000/api/v2/telegram/verify"
        );
    }
}
