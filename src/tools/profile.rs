//! Academic profile synthesis from already-fetched student data.

use super::traits::{text_input, text_input_schema};
use super::{Tool, ToolOutput};
use crate::error::Result;
use crate::llm::{ask_json, structured, ChatModel};
use crate::types::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// A grade in one subject area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub subject: String,
    pub score: f64,
}

/// Structured student profile produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicProfile {
    pub name: String,
    pub completion_year: i32,
    pub grades: Vec<Grade>,
    pub summary: String,
}

impl AcademicProfile {
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Nome do estudante"},
                "completion_year": {"type": "integer", "description": "Ano de conclusão"},
                "grades": {
                    "type": "array",
                    "description": "Notas por disciplina ou área de conhecimento",
                    "items": {
                        "type": "object",
                        "properties": {
                            "subject": {"type": "string", "description": "Área de conhecimento"},
                            "score": {"type": "number", "description": "Nota na área"}
                        },
                        "required": ["subject", "score"]
                    }
                },
                "summary": {
                    "type": "string",
                    "description": "O que torna este estudante único e um candidato forte para universidades"
                }
            },
            "required": ["name", "completion_year", "grades", "summary"]
        })
    }
}

pub const PROFILE_TOOL: &str = "PerfilAcademico";

/// Turns a blob of student data into an [`AcademicProfile`].
pub struct AcademicProfileTool {
    model: Arc<dyn ChatModel>,
}

impl AcademicProfileTool {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    fn prompt(student_data: &str) -> String {
        format!(
            "Monte um perfil acadêmico detalhado do estudante descrito abaixo.\n\n\
             Orientações:\n\
             - Organize as notas por área e destaque pontos fortes, aptidões e interesses.\n\
             - Escreva como uma orientadora de carreira experiente: objetiva e clara.\n\
             - Termine com um resumo convincente.\n\n\
             Dados do estudante:\n{}\n\n\
             Formato de saída:\n{}",
            student_data,
            structured::format_instructions(&AcademicProfile::schema())
        )
    }

    /// Run the nested profile call directly.
    pub async fn build(&self, student_data: &str) -> Result<AcademicProfile> {
        ask_json(self.model.as_ref(), vec![ChatMessage::user(Self::prompt(student_data))]).await
    }
}

#[async_trait]
impl Tool for AcademicProfileTool {
    fn name(&self) -> &str {
        PROFILE_TOOL
    }

    fn description(&self) -> &str {
        "Cria o perfil acadêmico de um estudante. Exige como entrada todos os dados do \
         estudante; não busca dados por conta própria, então consulte DadosDeEstudante antes."
    }

    fn parameters_schema(&self) -> Value {
        text_input_schema("Dados completos do estudante para gerar o perfil acadêmico")
    }

    async fn execute(&self, args: &Value) -> Result<ToolOutput> {
        let profile = self.build(text_input(args)).await?;
        info!("{}: profile for '{}' with {} grades", PROFILE_TOOL, profile.name, profile.grades.len());
        Ok(ToolOutput::Record(serde_json::to_value(profile)?))
    }
}
