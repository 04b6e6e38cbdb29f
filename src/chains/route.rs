//! Two-branch router: classify a query as beach or mountain, then answer in persona.

use crate::error::Result;
use crate::llm::{ask_json, ask_text, ChatModel};
use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    #[serde(rename = "praia")]
    Beach,
    #[serde(rename = "montanha")]
    Mountain,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beach => write!(f, "praia"),
            Self::Mountain => write!(f, "montanha"),
        }
    }
}

impl Destination {
    fn persona(&self) -> &'static str {
        match self {
            Self::Beach => "Apresente-se como Sra. Praia. Você é especialista em destinos de praia.",
            Self::Mountain => {
                "Apresente-se como Sr. Montanha. Você é especialista em destinos de montanha \
                 e atividades radicais."
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteDecision {
    destino: Destination,
}

const ROUTER_PROMPT: &str = "Classifique o pedido do usuário. Responda apenas com um objeto JSON \
                             {\"destino\": \"praia\"} ou {\"destino\": \"montanha\"}.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedAnswer {
    pub destination: Destination,
    pub answer: String,
}

/// Router call only.
pub async fn classify(model: &dyn ChatModel, query: &str) -> Result<Destination> {
    let decision: RouteDecision = ask_json(
        model,
        vec![ChatMessage::system(ROUTER_PROMPT), ChatMessage::user(query)],
    )
    .await?;
    Ok(decision.destino)
}

/// Classify, then answer with the chosen consultant.
pub async fn route(model: &dyn ChatModel, query: &str) -> Result<RoutedAnswer> {
    let destination = classify(model, query).await?;
    info!("Routed to {}", destination);

    let answer = ask_text(
        model,
        vec![ChatMessage::system(destination.persona()), ChatMessage::user(query)],
    )
    .await?;

    Ok(RoutedAnswer { destination, answer })
}
