//! Conversation with the wellness coach.

use std::sync::Arc;

use gateway_client::GatewayClient;
use tokio::sync::Mutex;
use tracing::debug;
use wellness_core::chat::{CHAT_ERROR_REPLY, CHAT_GREETING};
use wellness_core::{ChatMessage, ChatRole, Outcome, RequestState};

use crate::panel::{Panel, ViewGuard};

/// A chat history that starts with the coach's greeting. Every send carries
/// the whole history; one send at a time.
pub struct ChatFlow {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    history: Mutex<Vec<ChatMessage>>,
    reply: Panel<ChatMessage>,
    guard: ViewGuard,
}

impl ChatFlow {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            history: Mutex::new(vec![ChatMessage::assistant(CHAT_GREETING)]),
            reply: Panel::new("chat", guard.clone()),
            guard,
        }
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.clone()
    }

    /// Append `text` as the user's message and ask for a reply.
    ///
    /// Blank input is ignored, as is a send while a reply is pending. A
    /// failed send appends a fixed apology from the coach.
    pub async fn send(&self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            debug!("chat: blank message, ignoring");
            return Outcome::Ignored;
        }
        if !self.reply.begin().await {
            return Outcome::Ignored;
        }

        let snapshot = {
            let mut history = self.history.lock().await;
            history.push(ChatMessage::user(text));
            history.clone()
        };

        let result = self
            .gateway
            .send_chat_message(self.user_id, &snapshot)
            .await
            .map_err(|err| err.user_message());

        let outcome = self.reply.finish(result).await;
        let appended = match outcome {
            Outcome::Completed => self.reply.value().await,
            Outcome::Failed => Some(ChatMessage::assistant(CHAT_ERROR_REPLY)),
            _ => None,
        };
        if let Some(message) = appended {
            self.history.lock().await.push(message);
        }
        outcome
    }

    pub async fn state(&self) -> RequestState<ChatMessage> {
        self.reply.state().await
    }

    pub async fn is_pending(&self) -> bool {
        self.reply.is_pending().await
    }

    /// The coach's latest reply.
    pub async fn last_reply(&self) -> Option<ChatMessage> {
        self.history
            .lock()
            .await
            .last()
            .filter(|message| message.role == ChatRole::Assistant)
            .cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.reply.error().await
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_gateway::{DelayedGateway, FailingGateway, Operation, ScriptedGateway};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_history_starts_with_greeting() {
        let chat = ChatFlow::new(Arc::new(ScriptedGateway::new()), 1);

        let history = chat.history().await;
        assert_eq!(history, vec![ChatMessage::assistant(CHAT_GREETING)]);
        assert_eq!(chat.last_reply().await, Some(ChatMessage::assistant(CHAT_GREETING)));
    }

    #[tokio::test]
    async fn test_blank_message_sends_nothing() {
        let gateway = Arc::new(ScriptedGateway::new());
        let chat = ChatFlow::new(gateway.clone(), 1);

        assert_eq!(chat.send("   ").await, Outcome::Ignored);
        assert_eq!(chat.history().await.len(), 1);
        assert_eq!(gateway.calls(Operation::SendChatMessage), 0);
    }

    #[tokio::test]
    async fn test_send_carries_whole_history() {
        let gateway = Arc::new(ScriptedGateway::new().with_chat_reply("Try Kapalbhati."));
        let chat = ChatFlow::new(gateway.clone(), 8);

        assert_eq!(chat.send(" I feel sluggish ").await, Outcome::Completed);
        assert_eq!(chat.send("Anything else?").await, Outcome::Completed);

        let sent = gateway.chat_histories().await;
        assert_eq!(
            sent[0],
            vec![
                ChatMessage::assistant(CHAT_GREETING),
                ChatMessage::user("I feel sluggish"),
            ]
        );
        assert_eq!(sent[1].len(), 4);
        assert_eq!(sent[1][2], ChatMessage::assistant("Try Kapalbhati."));
        assert_eq!(chat.history().await.len(), 5);
        assert_eq!(
            chat.last_reply().await,
            Some(ChatMessage::assistant("Try Kapalbhati."))
        );
    }

    #[tokio::test]
    async fn test_send_while_pending_is_ignored() {
        let gateway = Arc::new(DelayedGateway::with_millis(ScriptedGateway::new(), 100));
        let chat = Arc::new(ChatFlow::new(gateway.clone(), 1));

        let first = {
            let chat = Arc::clone(&chat);
            tokio::spawn(async move { chat.send("Hello").await })
        };
        sleep(Duration::from_millis(20)).await;
        assert!(chat.is_pending().await);

        assert_eq!(chat.send("Hello again").await, Outcome::Ignored);
        assert_eq!(first.await.unwrap(), Outcome::Completed);
        assert_eq!(gateway.inner().calls(Operation::SendChatMessage), 1);
        assert_eq!(chat.history().await.len(), 3);
    }

    #[tokio::test]
    async fn test_failure_appends_apology() {
        let chat = ChatFlow::new(Arc::new(FailingGateway::new()), 1);

        assert_eq!(chat.send("What should I eat?").await, Outcome::Failed);
        let history = chat.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], ChatMessage::user("What should I eat?"));
        assert_eq!(history[2], ChatMessage::assistant(CHAT_ERROR_REPLY));
        assert_eq!(
            chat.error().await.as_deref(),
            Some("Request failed with status 500")
        );
    }
}
