pub mod extract;
pub mod lookup;
pub mod profile;
pub mod registry;
pub mod traits;

pub use extract::NameExtractor;
pub use lookup::{AllRecordsTool, RecordLookupTool};
pub use profile::{AcademicProfile, AcademicProfileTool, Grade, PROFILE_TOOL};
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolDefinition, ToolOutput};

use crate::config::AdvisorConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::llm::ChatModel;
use std::sync::Arc;

pub const STUDENT_TOOL: &str = "DadosDeEstudante";
pub const UNIVERSITY_TOOL: &str = "DadosDeUniversidade";
pub const ALL_UNIVERSITIES_TOOL: &str = "TodasUniversidades";

// ---------------------------------------------------------------------------
// Standard tool set
// ---------------------------------------------------------------------------

/// Student dataset as configured.
pub fn student_dataset(config: &AdvisorConfig) -> Dataset {
    Dataset::new(config.resolved_students_csv(), &config.student_key_column)
}

/// University dataset as configured.
pub fn university_dataset(config: &AdvisorConfig) -> Dataset {
    Dataset::new(config.resolved_universities_csv(), &config.university_key_column)
}

/// Build the registry of advising tools exposed to the planner.
pub fn standard_registry(config: &AdvisorConfig, model: Arc<dyn ChatModel>) -> Result<ToolRegistry> {
    let extractor = |make: fn(Arc<dyn ChatModel>) -> NameExtractor| {
        config.extract_names.then(|| make(model.clone()))
    };

    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(RecordLookupTool::new(
        STUDENT_TOOL,
        "Busca o histórico, as notas e as preferências de um estudante pelo nome.",
        student_dataset(config),
        extractor(NameExtractor::student),
    )))?;

    registry.register(Arc::new(AcademicProfileTool::new(model.clone())))?;

    registry.register(Arc::new(RecordLookupTool::new(
        UNIVERSITY_TOOL,
        "Busca os dados de uma universidade. Passe o nome da universidade como argumento.",
        university_dataset(config),
        extractor(NameExtractor::university),
    )))?;

    registry.register(Arc::new(AllRecordsTool::new(
        ALL_UNIVERSITIES_TOOL,
        "Carrega os dados de todas as universidades. Não precisa de argumento.",
        university_dataset(config),
    )))?;

    Ok(registry)
}
