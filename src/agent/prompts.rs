//! Prompt texts for the planner and synthesis calls.

use crate::tools::ToolDefinition;
use tracing::debug;

/// Question asked when `advise` runs without one.
pub const DEFAULT_QUESTION: &str =
    "Dentre todas as faculdades disponíveis, quais Ana tem mais chance de entrar?";

/// Build the planner message: tool roster, autonomy instruction, then the question.
pub fn planner_prompt(question: &str, tools: &[ToolDefinition]) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "Você é um assistente de orientação acadêmica com acesso a {} ferramenta(s):\n\n",
        tools.len()
    ));
    for (i, tool) in tools.iter().enumerate() {
        prompt.push_str(&format!("{}. {} — {}\n", i + 1, tool.name, tool.description));
    }

    prompt.push_str(
        "\nDecida sozinho quais ferramentas usar, e com quais argumentos, para responder \
         à pergunta do usuário. Se nenhuma for necessária, não chame nenhuma.\n\n",
    );
    prompt.push_str(&format!("Pergunta: \"{}\"\n", question));

    debug!("Planner prompt: {} chars", prompt.len());
    prompt
}

/// Build the synthesis message from the joined tool payloads and the original question.
pub fn synthesis_prompt(question: &str, context: &str) -> String {
    format!(
        "Aqui estão os dados obtidos pelas ferramentas:\n\n\
         {}\n\n\
         Agora responda à pergunta original de forma completa e contextualizada:\n\
         {}",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str) -> ToolDefinition {
        ToolDefinition {
            name: name.into(),
            description: format!("faz {}", name),
            parameters: json!({}),
        }
    }

    #[test]
    fn test_planner_prompt_lists_tools_in_order() {
        let prompt = planner_prompt("Quem é Ana?", &[tool("A"), tool("B")]);
        let a = prompt.find("1. A — faz A").unwrap();
        let b = prompt.find("2. B — faz B").unwrap();
        assert!(a < b);
        assert!(prompt.ends_with("Pergunta: \"Quem é Ana?\"\n"));
    }

    #[test]
    fn test_planner_prompt_allows_no_tool() {
        let prompt = planner_prompt("Oi", &[]);
        assert!(prompt.contains("0 ferramenta(s)"));
        assert!(prompt.contains("não chame nenhuma"));
    }

    #[test]
    fn test_synthesis_prompt_embeds_both() {
        let prompt = synthesis_prompt("Qual curso?", "{\"USUARIO\":\"Ana\"}");
        assert!(prompt.contains("{\"USUARIO\":\"Ana\"}"));
        assert!(prompt.trim_end().ends_with("Qual curso?"));
    }
}
