//! Pulls an entity name out of free-text tool input with a nested model call.

use crate::error::{AdvisorError, Result};
use crate::llm::{ask_json, structured, ChatModel};
use crate::types::ChatMessage;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Asks the model for `{"<field>": "<lower-case name>"}` given a sentence.
#[derive(Clone)]
pub struct NameExtractor {
    model: Arc<dyn ChatModel>,
    field: &'static str,
    hint: &'static str,
}

impl NameExtractor {
    pub fn new(model: Arc<dyn ChatModel>, field: &'static str, hint: &'static str) -> Self {
        Self { model, field, hint }
    }

    /// Extractor for student names.
    pub fn student(model: Arc<dyn ChatModel>) -> Self {
        Self::new(
            model,
            "estudante",
            "Nome do estudante mencionado, em letras minúsculas. Ex.: joão, carlos, joana, carla.",
        )
    }

    /// Extractor for university names.
    pub fn university(model: Arc<dyn ChatModel>) -> Self {
        Self::new(
            model,
            "universidade",
            "Nome da universidade mencionada, em letras minúsculas. Ex.: unesp, ufabc, usp.",
        )
    }

    pub fn field(&self) -> &str {
        self.field
    }

    fn schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            self.field.to_string(),
            json!({"type": "string", "description": self.hint}),
        );
        json!({
            "type": "object",
            "properties": properties,
            "required": [self.field]
        })
    }

    /// Extract the name, lower-cased.
    pub async fn extract(&self, text: &str) -> Result<String> {
        let prompt = format!(
            "Analise o texto abaixo e identifique o nome pedido.\n\n\
             Texto: {}\n\n\
             Formato de saída:\n{}",
            text,
            structured::format_instructions(&self.schema())
        );

        let reply: serde_json::Map<String, serde_json::Value> =
            ask_json(self.model.as_ref(), vec![ChatMessage::user(prompt)]).await?;

        let name = reply
            .get(self.field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdvisorError::Decode {
                reason: format!("missing string field '{}'", self.field),
                raw: serde_json::Value::Object(reply.clone()).to_string(),
            })?
            .to_lowercase();

        debug!("Extracted {} '{}' from input", self.field, name);
        Ok(name)
    }
}
