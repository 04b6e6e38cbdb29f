pub mod client;
pub mod model;
pub mod structured;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::InferenceClient;
pub use model::{ask_json, ask_text, ChatModel, ChatRequest, ToolChoice};
