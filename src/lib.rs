//! Advisor — student-advising and travel-planning assistant.
//!
//! A language model plans which registered tools to call, the tools run
//! against local datasets, and a final call answers from their output.

pub mod agent;
pub mod chains;
pub mod config;
pub mod data;
pub mod error;
pub mod llm;
pub mod session;
pub mod tools;
pub mod types;

pub use error::{AdvisorError, Result};
