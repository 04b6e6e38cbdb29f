//! Chat completions via an Azure OpenAI deployment.
//!
//! Supports tool-use (function calling) and JSON response mode in the
//! OpenAI-compatible wire format.

use crate::config::{AdvisorConfig, Credentials};
use crate::error::{AdvisorError, Result};
use crate::llm::model::{ChatModel, ChatRequest};
use crate::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Inference client bound to one Azure OpenAI chat deployment.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    temperature: f64,
    max_tokens: u32,
    http: reqwest::Client,
}

// -- OpenAI-compatible request/response types --------------------------------

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    messages: Vec<MessagePayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolPayload<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: String,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolPayload<'a> {
    r#type: &'a str,
    function: FunctionPayload<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionPayload<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
struct ToolCallPayload {
    id: String,
    function: FunctionCallPayload,
}

#[derive(Debug, Clone, Deserialize)]
struct FunctionCallPayload {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCallPayload>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl InferenceClient {
    /// Create a client from endpoint credentials and model settings.
    pub fn new(credentials: &Credentials, config: &AdvisorConfig) -> Self {
        Self {
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            http: reqwest::Client::new(),
        }
    }

    /// Full chat-completions URL for the configured deployment.
    pub fn chat_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn request_body<'a>(&self, request: &'a ChatRequest) -> ChatRequestBody<'a> {
        let messages = request
            .messages
            .iter()
            .map(|m| MessagePayload {
                role: m.role.to_string(),
                content: &m.content,
            })
            .collect();

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(
                request
                    .tools
                    .iter()
                    .map(|t| ToolPayload {
                        r#type: "function",
                        function: FunctionPayload {
                            name: &t.name,
                            description: &t.description,
                            parameters: &t.parameters,
                        },
                    })
                    .collect(),
            )
        };

        ChatRequestBody {
            messages,
            tools,
            tool_choice: request.tool_choice.map(|c| c.as_str()),
            response_format: request
                .json_mode
                .then_some(ResponseFormat { r#type: "json_object" }),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Convert the wire response into the crate's inference types.
fn into_inference_response(body: ChatResponse) -> InferenceResponse {
    let message = body
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .unwrap_or(ResponseMessage {
            content: None,
            tool_calls: Vec::new(),
        });

    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|tc| {
            let arguments = serde_json::from_str(&tc.function.arguments).unwrap_or_else(|e| {
                warn!("Unparseable arguments for tool '{}': {}", tc.function.name, e);
                serde_json::Value::Null
            });
            ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments,
            }
        })
        .collect();

    let usage = body
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    InferenceResponse {
        content: message.content,
        tool_calls,
        usage,
    }
}

#[async_trait]
impl ChatModel for InferenceClient {
    async fn chat(&self, request: ChatRequest) -> Result<InferenceResponse> {
        let body = self.request_body(&request);

        debug!(
            "Inference request to deployment {} ({} messages, {} tools)",
            self.deployment,
            request.messages.len(),
            request.tools.len()
        );

        let resp = self
            .http
            .post(self.chat_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AdvisorError::Model(format!("{}: {}", status, text)));
        }

        let parsed: ChatResponse = resp.json().await?;
        let response = into_inference_response(parsed);

        debug!(
            "Inference usage: {} prompt + {} completion tokens",
            response.usage.prompt_tokens, response.usage.completion_tokens
        );

        Ok(response)
    }
}
