//! Travel-guide chat that remembers earlier turns per session.

use crate::error::Result;
use crate::llm::{ask_text, ChatModel};
use crate::session::SessionStore;
use crate::types::ChatMessage;
use std::sync::Arc;
use tracing::debug;

const GUIDE_PERSONA: &str = "Você é um guia de viagem especializado em destinos brasileiros. \
                             Apresente-se como Sr. Passeios.";

/// Default session id for the scripted chat.
pub const DEFAULT_SESSION: &str = "passeios";

/// Questions asked by the `chat` subcommand, in order.
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "Quero visitar um lugar do Brasil famoso por praias e cultura. Pode sugerir?",
    "Qual a melhor época do ano para ir?",
];

pub struct TravelGuide {
    model: Arc<dyn ChatModel>,
    sessions: Arc<SessionStore>,
}

impl TravelGuide {
    pub fn new(model: Arc<dyn ChatModel>, sessions: Arc<SessionStore>) -> Self {
        Self { model, sessions }
    }

    /// Ask within a session: persona, prior turns, then the new question.
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<String> {
        let history = self.sessions.history(session_id).await;
        debug!("Session '{}': {} prior messages", session_id, history.len());

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(GUIDE_PERSONA));
        messages.extend(history);
        messages.push(ChatMessage::user(question));

        let reply = ask_text(self.model.as_ref(), messages).await?;

        self.sessions
            .append(
                session_id,
                [ChatMessage::user(question), ChatMessage::assistant(reply.clone())],
            )
            .await;
        Ok(reply)
    }
}
