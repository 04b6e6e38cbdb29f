//! Error taxonomy for the advisor library.

use thiserror::Error;

/// Errors raised while configuring, calling the model, or running tools.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// A required setting (endpoint, access key) is absent or blank.
    #[error("Missing configuration: {0} is not set")]
    MissingConfig(String),

    /// The model endpoint answered with a non-success status.
    #[error("Model error: {0}")]
    Model(String),

    /// Model output did not match the requested JSON shape.
    #[error("Structured output decode failed: {reason} (raw: {raw})")]
    Decode { reason: String, raw: String },

    /// The planner named a tool the registry does not know.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Two tools were registered under the same name.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// A dataset could not be read or parsed.
    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias for advisor operations.
pub type Result<T> = std::result::Result<T, AdvisorError>;
