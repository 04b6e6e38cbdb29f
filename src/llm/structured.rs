//! Structured output: prompt-side format instructions and reply decoding.

use crate::error::{AdvisorError, Result};
use serde::de::DeserializeOwned;

/// Render the instruction block that asks the model for JSON matching `schema`.
pub fn format_instructions(schema: &serde_json::Value) -> String {
    let rendered = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "A saída deve ser um único objeto JSON que obedeça ao JSON Schema abaixo. \
         Não escreva nada além do objeto JSON.\n\n```json\n{}\n```",
        rendered
    )
}

/// Decode a model reply into `T`, tolerating a surrounding Markdown code fence.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let body = strip_fence(raw.trim());
    serde_json::from_str(body).map_err(|e| AdvisorError::Decode {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the info string (e.g. `json`) up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
