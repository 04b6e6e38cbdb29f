//! In-memory model that replays canned responses and records every request.

use crate::error::{AdvisorError, Result};
use crate::llm::model::{ChatModel, ChatRequest};
use crate::types::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<InferenceResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new(replies: Vec<InferenceResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn text(content: &str) -> InferenceResponse {
        InferenceResponse {
            content: Some(content.to_string()),
            ..InferenceResponse::default()
        }
    }

    pub(crate) fn calls(calls: &[(&str, serde_json::Value)]) -> InferenceResponse {
        InferenceResponse {
            content: None,
            tool_calls: calls
                .iter()
                .enumerate()
                .map(|(i, (name, args))| ToolCall {
                    id: format!("call_{}", i + 1),
                    name: name.to_string(),
                    arguments: args.clone(),
                })
                .collect(),
            usage: TokenUsage::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn chat(&self, request: ChatRequest) -> Result<InferenceResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AdvisorError::Model("script exhausted".into()))
    }
}
