//! The tool-dispatch agent.

pub mod dispatch;
pub mod prompts;

pub use dispatch::{DispatchOutcome, Dispatcher};
