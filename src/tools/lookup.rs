//! Dataset-backed tools: keyed record lookup and full listing.

use super::traits::{text_input, text_input_schema};
use super::{NameExtractor, Tool, ToolOutput};
use crate::data::Dataset;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

/// Finds one record by name, optionally extracting the name from free text first.
pub struct RecordLookupTool {
    name: String,
    description: String,
    dataset: Dataset,
    extractor: Option<NameExtractor>,
}

impl RecordLookupTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        dataset: Dataset,
        extractor: Option<NameExtractor>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dataset,
            extractor,
        }
    }

    async fn lookup_key(&self, input: &str) -> Result<String> {
        match &self.extractor {
            Some(extractor) => extractor.extract(input).await,
            None => Ok(input.to_string()),
        }
    }
}

#[async_trait]
impl Tool for RecordLookupTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        text_input_schema("Texto ou nome que identifica o registro procurado")
    }

    async fn execute(&self, args: &Value) -> Result<ToolOutput> {
        let key = self.lookup_key(text_input(args)).await?;
        let record = self.dataset.find(&key)?;

        info!(
            "{}: '{}' -> {}",
            self.name,
            key,
            if record.is_empty() { "no match" } else { "found" }
        );
        Ok(ToolOutput::Record(Value::Object(record)))
    }
}

/// Returns every record of a dataset; ignores its argument.
pub struct AllRecordsTool {
    name: String,
    description: String,
    dataset: Dataset,
}

impl AllRecordsTool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dataset,
        }
    }
}

#[async_trait]
impl Tool for AllRecordsTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "input": {"type": "string", "description": "Não utilizado"}
            }
        })
    }

    async fn execute(&self, _args: &Value) -> Result<ToolOutput> {
        let rows = self.dataset.all()?;
        info!("{}: {} records", self.name, rows.len());
        Ok(ToolOutput::Record(Value::Array(
            rows.into_iter().map(Value::Object).collect(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedModel;
    use std::sync::Arc;
    use tempfile::tempdir;

    const UNIVERSITIES: &str = "\
NOME_FACULDADE,CIDADE,NOTA_CORTE
USP,São Paulo,8.9
UFABC,Santo André,7.5
";

    fn dataset(dir: &tempfile::TempDir) -> Dataset {
        let path = dir.path().join("universidades.csv");
        std::fs::write(&path, UNIVERSITIES).unwrap();
        Dataset::new(path, "NOME_FACULDADE")
    }

    #[tokio::test]
    async fn test_lookup_without_extractor() {
        let dir = tempdir().unwrap();
        let tool = RecordLookupTool::new("DadosDeUniversidade", "d", dataset(&dir), None);

        let output = tool.execute(&json!({"input": "usp"})).await.unwrap();
        assert_eq!(
            output,
            ToolOutput::Record(json!({"NOME_FACULDADE": "USP", "CIDADE": "São Paulo", "NOTA_CORTE": 8.9}))
        );
    }

    #[tokio::test]
    async fn test_lookup_miss_is_empty_record() {
        let dir = tempdir().unwrap();
        let tool = RecordLookupTool::new("DadosDeUniversidade", "d", dataset(&dir), None);

        let output = tool.execute(&json!({"input": "unicamp"})).await.unwrap();
        assert_eq!(output.into_payload().unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_lookup_missing_argument_is_empty_record() {
        let dir = tempdir().unwrap();
        let tool = RecordLookupTool::new("DadosDeUniversidade", "d", dataset(&dir), None);

        let output = tool.execute(&json!({})).await.unwrap();
        assert_eq!(output, ToolOutput::Record(json!({})));
    }

    #[tokio::test]
    async fn test_lookup_with_extractor() {
        let dir = tempdir().unwrap();
        let model = Arc::new(ScriptedModel::new(vec![ScriptedModel::text(
            r#"{"universidade": "UFABC"}"#,
        )]));
        let tool = RecordLookupTool::new(
            "DadosDeUniversidade",
            "d",
            dataset(&dir),
            Some(NameExtractor::university(model)),
        );

        let output = tool
            .execute(&json!({"input": "Quero saber sobre a UFABC"}))
            .await
            .unwrap();
        let payload = output.into_payload().unwrap();
        assert!(payload.contains("Santo André"));
    }

    #[tokio::test]
    async fn test_all_records() {
        let dir = tempdir().unwrap();
        let tool = AllRecordsTool::new("TodasUniversidades", "d", dataset(&dir));

        let ToolOutput::Record(Value::Array(rows)) = tool.execute(&Value::Null).await.unwrap() else {
            panic!("expected an array of records");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["NOME_FACULDADE"], "USP");
    }
}
