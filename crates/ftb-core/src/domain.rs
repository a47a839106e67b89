/// Opaque chat id, as Focalboard stores it.
///
/// Telegram chat ids are numeric, but the linking store on the Focalboard
/// side (and the notification webhook) treat them as strings, so the bridge
/// does too and only the Telegram adapter interprets them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);

impl ChatId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId(id.to_string())
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
