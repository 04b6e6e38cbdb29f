//! The chat-model seam: everything that talks to a model goes through [`ChatModel`].

use crate::error::Result;
use crate::llm::structured;
use crate::tools::ToolDefinition;
use crate::types::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// How the model may use the attached tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    /// The model decides, including calling none.
    Auto,
    /// Tools are described but must not be called.
    None,
}

impl ToolChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
        }
    }
}

/// A single chat-completion call.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: Option<ToolChoice>,
    /// Ask the endpoint for a bare JSON object reply.
    pub json_mode: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Attach tool definitions with automatic tool choice.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tool_choice = if tools.is_empty() {
            None
        } else {
            Some(ToolChoice::Auto)
        };
        self.tools = tools;
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// A hosted (or scripted) chat-completion model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one chat completion.
    async fn chat(&self, request: ChatRequest) -> Result<InferenceResponse>;
}

/// Run a plain completion and return its text.
pub async fn ask_text(model: &dyn ChatModel, messages: Vec<ChatMessage>) -> Result<String> {
    let response = model.chat(ChatRequest::new(messages)).await?;
    Ok(response.content.unwrap_or_default())
}

/// Run a JSON-mode completion and decode it into `T`.
///
/// The prompt itself must carry the format instructions
/// (see [`structured::format_instructions`]).
pub async fn ask_json<T>(model: &dyn ChatModel, messages: Vec<ChatMessage>) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = model.chat(ChatRequest::new(messages).json()).await?;
    structured::decode(response.text())
}
