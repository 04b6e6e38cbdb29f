//! Configuration schema for advisor.toml.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the dispatch loop does with a planner request for an unregistered tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownToolPolicy {
    /// Log and skip the request.
    #[default]
    Drop,
    /// Abort the query with an error.
    Fail,
}

impl fmt::Display for UnknownToolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Azure OpenAI deployment name of the chat model.
    pub deployment: String,

    /// Azure OpenAI REST API version.
    pub api_version: String,

    /// Sampling temperature for every model call.
    pub temperature: f64,

    /// Maximum completion tokens per call.
    pub max_tokens: u32,

    /// Student dataset (comma-separated, header row).
    pub students_csv: String,

    /// Column holding the student identifier.
    pub student_key_column: String,

    /// University dataset (comma-separated, header row).
    pub universities_csv: String,

    /// Column holding the university identifier.
    pub university_key_column: String,

    /// Run a nested model call to pull the name out of free-text tool input.
    pub extract_names: bool,

    /// Handling of planner requests for unregistered tools.
    pub unknown_tool_policy: UnknownToolPolicy,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            deployment: "gpt-4o-mini".into(),
            api_version: "2024-08-01-preview".into(),
            temperature: 0.5,
            max_tokens: 2048,
            students_csv: "documentos/estudantes.csv".into(),
            student_key_column: "USUARIO".into(),
            universities_csv: "documentos/universidades.csv".into(),
            university_key_column: "NOME_FACULDADE".into(),
            extract_names: true,
            unknown_tool_policy: UnknownToolPolicy::Drop,
            log_level: "info".into(),
        }
    }
}

impl AdvisorConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    /// Resolved student dataset path.
    pub fn resolved_students_csv(&self) -> String {
        self.resolve_path(&self.students_csv)
    }

    /// Resolved university dataset path.
    pub fn resolved_universities_csv(&self) -> String {
        self.resolve_path(&self.universities_csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: AdvisorConfig = toml::from_str(
            r#"
            deployment = "gpt-4o"
            unknown_tool_policy = "fail"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.deployment, "gpt-4o");
        assert_eq!(cfg.unknown_tool_policy, UnknownToolPolicy::Fail);
        assert_eq!(cfg.api_version, "2024-08-01-preview");
        assert_eq!(cfg.student_key_column, "USUARIO");
        assert!(cfg.extract_names);
    }

    #[test]
    fn test_default_policy_is_drop() {
        assert_eq!(AdvisorConfig::default().unknown_tool_policy, UnknownToolPolicy::Drop);
    }

    #[test]
    fn test_resolve_path_without_tilde_is_unchanged() {
        let cfg = AdvisorConfig::default();
        assert_eq!(cfg.resolved_students_csv(), "documentos/estudantes.csv");
    }
}
