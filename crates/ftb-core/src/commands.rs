//! Bot command routing.
//!
//! Inbound text resolves once into a [`Command`]; handlers compose a reply
//! and send it through the messaging port. Replies run inside the event-loop
//! runtime already, so no bridge hop is involved here.

use crate::{
    domain::ChatId,
    ports::{LinkOutcome, MessagingPort, VerifyPort},
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `/start [code]` — no code shows onboarding; a code attempts linking.
    Start { code: Option<String> },
    Help,
    Unlink,
}

const WELCOME_TEXT: &str = "Welcome! To link your Focalboard account, please use the link \
     provided in your Focalboard settings.";

const LINKED_TEXT: &str = "✅ Successfully linked your Telegram account to Focalboard!\n\
     You will now receive notifications about card updates.";

const REJECTED_TEXT: &str =
    "❌ Failed to link account. Please try again from Focalboard settings.";

const UPSTREAM_DOWN_TEXT: &str =
    "❌ Error connecting to Focalboard server. Please try again later.";

const UNLINK_TEXT: &str = "To unlink your account, please go to Focalboard settings.";

const HELP_TEXT: &str = "🤖 *Focalboard Telegram Bot*\n\n\
     *Available Commands:*\n\
     /start - Link your Focalboard account\n\
     /help - Show this help message\n\
     /unlink - Unlink your account\n\n\
     *Notifications:*\n\
     • Card created\n\
     • Card updated\n\
     • @mentions\n\
     • Card assignments\n\n\
     Configure your notification preferences in Focalboard settings.";

/// Resolve inbound message text to a command, if it is one.
///
/// Telegram may send `/cmd@botname arg1 ...`; arguments are whitespace-split.
/// Unknown commands and plain text yield `None` and are ignored upstream.
pub fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match cmd.as_str() {
        "start" => Some(Command::Start {
            code: rest.split_whitespace().next().map(str::to_string),
        }),
        "help" => Some(Command::Help),
        "unlink" => Some(Command::Unlink),
        _ => None,
    }
}

/// Run one command to completion and send its reply.
///
/// Verification failures never escape: they become reply text variants. The
/// only error path out of here is the reply send itself, which the Telegram
/// handler logs and drops so the loop survives any single bad command.
pub async fn respond(
    cmd: Command,
    chat_id: ChatId,
    verifier: &dyn VerifyPort,
    messenger: &dyn MessagingPort,
) -> Result<()> {
    let reply = match cmd {
        Command::Start { code: None } => WELCOME_TEXT,
        Command::Start { code: Some(code) } => match verifier.verify(&code, &chat_id).await {
            LinkOutcome::Linked => LINKED_TEXT,
            LinkOutcome::Rejected => REJECTED_TEXT,
            LinkOutcome::NetworkFailure => UPSTREAM_DOWN_TEXT,
        },
        Command::Help => HELP_TEXT,
        Command::Unlink => UNLINK_TEXT,
    };
    messenger.send_markdown(&chat_id, reply).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[test]
    fn parses_bare_and_coded_start() {
        assert_eq!(parse_command("/start"), Some(Command::Start { code: None }));
        assert_eq!(
            parse_command("/start abc123"),
            Some(Command::Start {
                code: Some("abc123".to_string())
            })
        );
        // Extra arguments beyond the code are ignored.
        assert_eq!(
            parse_command("/start abc123 junk"),
            Some(Command::Start {
                code: Some("abc123".to_string())
            })
        );
    }

    #[test]
    fn parses_botname_suffix_and_case() {
        assert_eq!(
            parse_command("/start@focalboard_bot abc"),
            Some(Command::Start {
                code: Some("abc".to_string())
            })
        );
        assert_eq!(parse_command("/HELP"), Some(Command::Help));
        assert_eq!(parse_command("/unlink"), Some(Command::Unlink));
    }

    #[test]
    fn ignores_unknown_commands_and_plain_text() {
        assert_eq!(parse_command("/settings"), None);
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command(""), None);
    }

    struct FakeVerifier {
        outcome: LinkOutcome,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeVerifier {
        fn new(outcome: LinkOutcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VerifyPort for FakeVerifier {
        async fn verify(&self, code: &str, chat_id: &ChatId) -> LinkOutcome {
            self.calls
                .lock()
                .unwrap()
                .push((code.to_string(), chat_id.0.clone()));
            self.outcome
        }
    }

    #[derive(Default)]
    struct FakeMessenger {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeMessenger {
        fn last_text(&self) -> String {
            self.sent.lock().unwrap().last().unwrap().1.clone()
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_markdown(&self, chat_id: &ChatId, text: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.0.clone(), text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn bare_start_sends_onboarding_without_verifying() {
        let verifier = FakeVerifier::new(LinkOutcome::Linked);
        let messenger = FakeMessenger::default();

        respond(
            Command::Start { code: None },
            ChatId("7".into()),
            &verifier,
            &messenger,
        )
        .await
        .unwrap();

        assert_eq!(verifier.call_count(), 0);
        assert!(messenger.last_text().starts_with("Welcome!"));
    }

    #[tokio::test]
    async fn coded_start_replies_per_outcome() {
        for (outcome, needle) in [
            (LinkOutcome::Linked, "Successfully linked"),
            (LinkOutcome::Rejected, "Failed to link account"),
            (LinkOutcome::NetworkFailure, "try again later"),
        ] {
            let verifier = FakeVerifier::new(outcome);
            let messenger = FakeMessenger::default();

            respond(
                Command::Start {
                    code: Some("abc123".to_string()),
                },
                ChatId("7".into()),
                &verifier,
                &messenger,
            )
            .await
            .unwrap();

            assert_eq!(verifier.call_count(), 1);
            assert_eq!(
                verifier.calls.lock().unwrap()[0],
                ("abc123".to_string(), "7".to_string())
            );
            let text = messenger.last_text();
            assert!(text.contains(needle), "{outcome:?}: {text}");
        }
    }

    #[tokio::test]
    async fn help_and_unlink_are_static() {
        let verifier = FakeVerifier::new(LinkOutcome::Linked);
        let messenger = FakeMessenger::default();

        respond(Command::Help, ChatId("7".into()), &verifier, &messenger)
            .await
            .unwrap();
        assert!(messenger.last_text().contains("*Available Commands:*"));

        respond(Command::Unlink, ChatId("7".into()), &verifier, &messenger)
            .await
            .unwrap();
        assert!(messenger.last_text().contains("go to Focalboard settings"));
        assert_eq!(verifier.call_count(), 0);
    }
}
