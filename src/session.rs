//! Per-session conversation history.
//!
//! Sessions are created on first use and live for the whole process; there
//! is no eviction.

use crate::types::ChatMessage;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's history, creating the session if it is new.
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        let mut sessions = self.sessions.lock().await;
        sessions.entry(session_id.to_string()).or_default().clone()
    }

    /// Append messages to a session, creating it if needed.
    pub async fn append(&self, session_id: &str, messages: impl IntoIterator<Item = ChatMessage>) {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(messages);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_history_creates_on_first_use() {
        let store = SessionStore::new();
        assert_eq!(store.session_count().await, 0);

        assert!(store.history("aula").await.is_empty());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let store = SessionStore::new();
        store
            .append("aula", [ChatMessage::user("oi"), ChatMessage::assistant("olá")])
            .await;
        store.append("aula", [ChatMessage::user("tchau")]).await;

        let history = store.history("aula").await;
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["oi", "olá", "tchau"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.append("a", [ChatMessage::user("1")]).await;

        assert!(store.history("b").await.is_empty());
        assert_eq!(store.history("a").await.len(), 1);
    }
}
