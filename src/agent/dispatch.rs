//! Named-tool dispatch loop: Plan → Execute → Synthesize.
//!
//! 1. One planner call sees the question and every registered tool.
//! 2. Each requested tool runs in planner order, one at a time.
//! 3. One synthesis call answers from the joined tool output.

use crate::agent::prompts;
use crate::config::UnknownToolPolicy;
use crate::error::{AdvisorError, Result};
use crate::llm::{ask_text, ChatModel, ChatRequest};
use crate::tools::ToolRegistry;
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a dispatched question ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The planner chose no tool; carries whatever text it produced instead.
    NoToolInvoked { planner_reply: Option<String> },
    /// Tools ran (or were all dropped) and the synthesis call answered.
    Answered {
        results: Vec<ToolResult>,
        answer: String,
    },
}

/// Drives one question through planner, tools, and synthesis.
pub struct Dispatcher {
    model: Arc<dyn ChatModel>,
    registry: ToolRegistry,
    unknown_tool_policy: UnknownToolPolicy,
}

impl Dispatcher {
    pub fn new(model: Arc<dyn ChatModel>, registry: ToolRegistry) -> Self {
        Self {
            model,
            registry,
            unknown_tool_policy: UnknownToolPolicy::default(),
        }
    }

    pub fn with_unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool_policy = policy;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Ask the planner which tools to call. Returns its tool calls and free text as-is.
    pub async fn plan(&self, question: &str) -> Result<(Vec<ToolCall>, Option<String>)> {
        let tools = self.registry.definitions();
        let prompt = prompts::planner_prompt(question, &tools);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]).with_tools(tools);

        let response = self.model.chat(request).await?;
        info!("Planner requested {} tool call(s)", response.tool_calls.len());
        Ok((response.tool_calls, response.content))
    }

    /// Run one requested tool. `Ok(None)` means the request was dropped.
    pub async fn execute(&self, call: &ToolCall) -> Result<Option<ToolResult>> {
        let Some(tool) = self.registry.get(&call.name) else {
            return match self.unknown_tool_policy {
                UnknownToolPolicy::Drop => {
                    warn!("Dropping call to unknown tool '{}'", call.name);
                    Ok(None)
                }
                UnknownToolPolicy::Fail => Err(AdvisorError::UnknownTool(call.name.clone())),
            };
        };

        info!("Tool: {}({})", call.name, call.arguments);
        let output = tool.execute(&call.arguments).await?.into_payload()?;
        debug!("Tool result: {} chars", output.len());

        Ok(Some(ToolResult {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            output,
        }))
    }

    /// Answer the question from the tool payloads, joined by newlines.
    pub async fn synthesize(&self, question: &str, results: &[ToolResult]) -> Result<String> {
        let context = results
            .iter()
            .map(|r| r.output.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = prompts::synthesis_prompt(question, &context);
        ask_text(self.model.as_ref(), vec![ChatMessage::user(prompt)]).await
    }

    /// Full loop for one question.
    pub async fn run(&self, question: &str) -> Result<DispatchOutcome> {
        let (calls, planner_reply) = self.plan(question).await?;

        if calls.is_empty() {
            info!("No tool invoked");
            return Ok(DispatchOutcome::NoToolInvoked { planner_reply });
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            if let Some(result) = self.execute(call).await? {
                results.push(result);
            }
        }

        if results.len() < calls.len() {
            warn!("{} of {} tool call(s) dropped", calls.len() - results.len(), calls.len());
        }

        let answer = self.synthesize(question, &results).await?;
        Ok(DispatchOutcome::Answered { results, answer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::llm::scripted::ScriptedModel;
    use crate::tools::{RecordLookupTool, Tool, ToolOutput};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Echoes its name and records the order it was called in.
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Tool for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "records calls"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            json!({"type": "object"})
        }

        async fn execute(&self, _args: &serde_json::Value) -> Result<ToolOutput> {
            self.log.lock().unwrap().push(self.name);
            Ok(ToolOutput::Text(format!("out:{}", self.name)))
        }
    }

    fn recorder_registry(log: &Arc<Mutex<Vec<&'static str>>>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        for name in ["A", "B", "C"] {
            registry
                .register(Arc::new(Recorder { name, log: log.clone() }))
                .unwrap();
        }
        registry
    }

    #[tokio::test]
    async fn test_student_lookup_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("estudantes.csv");
        std::fs::write(&path, "USUARIO,CURSO\nana,Engenharia\nbia,Direito\n").unwrap();

        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(RecordLookupTool::new(
                "DadosDeEstudante",
                "busca estudante",
                Dataset::new(path, "USUARIO"),
                None,
            )))
            .unwrap();

        let model = Arc::new(ScriptedModel::new(vec![
            ScriptedModel::calls(&[("DadosDeEstudante", json!({"input": "Ana"}))]),
            ScriptedModel::text("Ana deve cursar Engenharia."),
        ]));
        let dispatcher = Dispatcher::new(model.clone(), registry);

        let outcome = dispatcher.run("O que Ana estuda?").await.unwrap();
        let DispatchOutcome::Answered { results, answer } = outcome else {
            panic!("expected an answer");
        };
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].output, r#"{"USUARIO":"ana","CURSO":"Engenharia"}"#);
        assert_eq!(answer, "Ana deve cursar Engenharia.");

        let requests = model.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tools.len(), 1);
        let synthesis = &requests[1].messages[0].content;
        assert!(synthesis.contains(r#"{"USUARIO":"ana","CURSO":"Engenharia"}"#));
        assert!(synthesis.contains("O que Ana estuda?"));
        assert!(requests[1].tools.is_empty());
    }

    #[tokio::test]
    async fn test_no_tool_calls_skips_execute_and_synthesis() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(vec![ScriptedModel::text("Não preciso de ferramentas.")]));
        let dispatcher = Dispatcher::new(model.clone(), recorder_registry(&log));

        let outcome = dispatcher.run("Oi").await.unwrap();
        assert_eq!(
            outcome,
            DispatchOutcome::NoToolInvoked {
                planner_reply: Some("Não preciso de ferramentas.".into())
            }
        );
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(model.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_dropped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(vec![
            ScriptedModel::calls(&[("Foo", json!({"input": "x"}))]),
            ScriptedModel::text("Sem dados."),
        ]));
        let dispatcher = Dispatcher::new(model.clone(), recorder_registry(&log));

        let outcome = dispatcher.run("?").await.unwrap();
        let DispatchOutcome::Answered { results, answer } = outcome else {
            panic!("expected synthesis over empty context");
        };
        assert!(results.is_empty());
        assert_eq!(answer, "Sem dados.");
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_unknown_returns_none() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(Vec::new()));
        let dispatcher = Dispatcher::new(model, recorder_registry(&log));

        let call = ToolCall {
            id: "call_1".into(),
            name: "Foo".into(),
            arguments: json!({}),
        };
        assert_eq!(dispatcher.execute(&call).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_tool_fail_policy() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(vec![ScriptedModel::calls(&[(
            "Foo",
            json!({}),
        )])]));
        let dispatcher = Dispatcher::new(model, recorder_registry(&log))
            .with_unknown_tool_policy(UnknownToolPolicy::Fail);

        let err = dispatcher.run("?").await.unwrap_err();
        assert!(matches!(err, AdvisorError::UnknownTool(ref n) if n == "Foo"));
    }

    #[tokio::test]
    async fn test_results_follow_planner_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(vec![
            ScriptedModel::calls(&[("C", json!({})), ("Foo", json!({})), ("A", json!({})), ("C", json!({}))]),
            ScriptedModel::text("ok"),
        ]));
        let dispatcher = Dispatcher::new(model.clone(), recorder_registry(&log));

        let DispatchOutcome::Answered { results, .. } = dispatcher.run("?").await.unwrap() else {
            panic!("expected an answer");
        };
        let names: Vec<&str> = results.iter().map(|r| r.tool_name.as_str()).collect();
        assert_eq!(names, ["C", "A", "C"]);
        assert_eq!(*log.lock().unwrap(), ["C", "A", "C"]);

        let ids: Vec<&str> = results.iter().map(|r| r.tool_call_id.as_str()).collect();
        assert_eq!(ids, ["call_1", "call_3", "call_4"]);

        let synthesis = &model.requests()[1].messages[0].content;
        assert!(synthesis.contains("out:C\nout:A\nout:C"));
    }

    #[tokio::test]
    async fn test_tool_error_is_fatal() {
        let dir = tempdir().unwrap();
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(RecordLookupTool::new(
                "DadosDeEstudante",
                "d",
                Dataset::new(dir.path().join("missing.csv"), "USUARIO"),
                None,
            )))
            .unwrap();
        let model = Arc::new(ScriptedModel::new(vec![ScriptedModel::calls(&[(
            "DadosDeEstudante",
            json!({"input": "ana"}),
        )])]));

        let err = Dispatcher::new(model, registry).run("?").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Data(_)));
    }

    #[tokio::test]
    async fn test_planner_failure_propagates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let model = Arc::new(ScriptedModel::new(Vec::new()));
        let err = Dispatcher::new(model, recorder_registry(&log)).run("?").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Model(_)));
    }
}
