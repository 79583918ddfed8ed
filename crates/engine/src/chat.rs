// In crates/engine/src/chat.rs

use api_client::Backend;
use chrono::Local;
use core_types::{ChatEnvelope, ChatMessage, ChatPayload, Sender};
use events::ViewEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

pub const GREETING: &str = "Hello! I'm connected to your live AI trading agents. I can show you what \
they're doing in real-time, their positions, recent trades, and PnL. Try asking 'What are my agents \
doing?' or 'Show recent trades'!";

pub const APOLOGY: &str =
    "I couldn't reach the backend right now. Please make sure the backend server is running.";

/// What happened to one submitted input.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The input was blank after trimming.
    Ignored,
    /// A reply is still pending; the input was dropped, not queued.
    Busy,
    /// The AI message that was appended.
    Replied(ChatMessage),
}

/// An append-only conversation with the backend assistant.
///
/// At most one chat call is in flight at a time.
pub struct ChatSession {
    backend: Arc<dyn Backend>,
    messages: Mutex<Vec<ChatMessage>>,
    typing: AtomicBool,
    events: Option<broadcast::Sender<ViewEvent>>,
}

/// Clears the typing flag when the pending call finishes or is cancelled.
struct TypingGuard<'a>(&'a AtomicBool);

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatSession {
    /// Starts a session holding only the greeting.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let greeting = ChatMessage {
            id: 1,
            sender: Sender::Ai,
            text: GREETING.to_string(),
            time: clock(),
            payload: ChatPayload::Text,
        };
        Self {
            backend,
            messages: Mutex::new(vec![greeting]),
            typing: AtomicBool::new(false),
            events: None,
        }
    }

    /// Also publishes every appended message as a `ViewEvent::ChatMessage`.
    pub fn with_events(mut self, events: broadcast::Sender<ViewEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::Acquire)
    }

    /// Submits `input` and waits for the reply.
    ///
    /// The user message is appended first, then exactly one AI message: the
    /// backend's reply, or a fixed apology if the backend is unavailable.
    pub async fn send(&self, input: &str) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        if self
            .typing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Chat reply pending; input dropped.");
            return SendOutcome::Busy;
        }
        let _typing = TypingGuard(&self.typing);

        self.append(Sender::User, input.to_string(), ChatPayload::Text);

        let (text, payload) = match self.backend.send_chat(input).await {
            Ok(envelope) => reply(envelope),
            Err(_) => (APOLOGY.to_string(), ChatPayload::Text),
        };
        SendOutcome::Replied(self.append(Sender::Ai, text, payload))
    }

    fn append(&self, sender: Sender, text: String, payload: ChatPayload) -> ChatMessage {
        let message = {
            let mut messages = self.lock();
            let message = ChatMessage {
                id: messages.len() as u64 + 1,
                sender,
                text,
                time: clock(),
                payload,
            };
            messages.push(message.clone());
            message
        };
        if let Some(events) = &self.events {
            // No subscribers is fine.
            let _ = events.send(ViewEvent::ChatMessage(message.clone()));
        }
        message
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Turns a backend envelope into message text and payload. Data that does
/// not fit its declared type degrades to a plain text message.
fn reply(envelope: ChatEnvelope) -> (String, ChatPayload) {
    let ChatEnvelope { text, kind, data } = envelope;
    let payload = match ChatPayload::decode(kind.as_deref(), data) {
        Ok(ChatPayload::Unknown(kind)) => {
            tracing::debug!(%kind, "Unrecognized chat reply type; showing text only.");
            ChatPayload::Unknown(kind)
        }
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(kind = ?kind, error = %e, "Chat reply data did not match its type.");
            ChatPayload::Text
        }
    };
    (text, payload)
}

fn clock() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use serde_json::json;
    use tokio::sync::Notify;

    fn session(chat: Option<ChatEnvelope>) -> (Arc<FakeBackend>, ChatSession) {
        let backend = Arc::new(FakeBackend { chat, ..Default::default() });
        let session = ChatSession::new(backend.clone());
        (backend, session)
    }

    fn envelope(kind: &str, data: serde_json::Value) -> ChatEnvelope {
        ChatEnvelope { text: "reply".to_string(), kind: Some(kind.to_string()), data: Some(data) }
    }

    #[tokio::test]
    async fn starts_with_the_greeting() {
        let (_, session) = session(None);
        let messages = session.messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Ai);
        assert_eq!(messages[0].time.len(), 5);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (backend, session) = session(None);

        assert_eq!(session.send("   \n").await, SendOutcome::Ignored);
        assert_eq!(backend.calls("/chat/send"), 0);
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn unavailable_backend_appends_the_apology() {
        let (_, session) = session(None);

        let SendOutcome::Replied(reply) = session.send("hello").await else {
            panic!("expected a reply");
        };

        assert_eq!(reply.text, APOLOGY);
        assert_eq!(reply.payload, ChatPayload::Text);
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn send_during_pending_reply_is_busy() {
        let gate = Arc::new(Notify::new());
        let pong = ChatEnvelope { text: "pong".to_string(), ..Default::default() };
        let backend = Arc::new(FakeBackend { chat: Some(pong), chat_gate: Some(gate.clone()), ..Default::default() });
        let session = ChatSession::new(backend.clone());

        let second = async {
            while !session.is_typing() {
                tokio::task::yield_now().await;
            }
            let outcome = session.send("are you there?").await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(session.send("ping"), second);

        assert_eq!(second, SendOutcome::Busy);
        assert!(matches!(first, SendOutcome::Replied(m) if m.text == "pong"));
        assert_eq!(backend.calls("/chat/send"), 1);
        let texts: Vec<String> = session.messages().into_iter().skip(1).map(|m| m.text).collect();
        assert_eq!(texts, ["ping", "pong"]);
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn structured_reply_keeps_its_payload() {
        let (_, session) = session(Some(envelope(
            "trades",
            json!({"trades": [{"agent": "Alpha", "action": "BUY", "symbol": "BTC", "qty": 0.1, "price": 60000.0, "value": 6000.0}]}),
        )));

        let SendOutcome::Replied(reply) = session.send("show trades").await else {
            panic!("expected a reply");
        };

        let ChatPayload::Trades(list) = reply.payload else {
            panic!("expected trades, got {:?}", reply.payload);
        };
        assert_eq!(list.trades[0].symbol, "BTC");
    }

    #[test]
    fn malformed_data_degrades_to_text() {
        let (text, payload) = reply(envelope("analysis", json!({"confidence": "very"})));

        assert_eq!(text, "reply");
        assert_eq!(payload, ChatPayload::Text);
    }

    #[test]
    fn unknown_type_is_text_only() {
        let (_, payload) = reply(envelope("forecast", json!({"horizon": 7})));

        assert_eq!(payload, ChatPayload::Unknown("forecast".to_string()));
        assert!(!payload.has_card());
    }

    #[tokio::test]
    async fn appended_messages_are_published() {
        let (tx, mut rx) = broadcast::channel(8);
        let (_, session) = session(None);
        let session = session.with_events(tx);

        session.send("hi").await;

        assert!(matches!(rx.recv().await, Ok(ViewEvent::ChatMessage(m)) if m.sender == Sender::User));
        assert!(matches!(rx.recv().await, Ok(ViewEvent::ChatMessage(m)) if m.text == APOLOGY));
    }
}
