//! Three-step travel chain: destination, then a local restaurant, then culture.

use crate::error::Result;
use crate::llm::{ask_json, ask_text, structured, ChatModel};
use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub city: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub city: String,
    pub restaurant: String,
}

/// Everything the chain produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub destination: Destination,
    pub restaurant: Restaurant,
    pub culture: String,
}

fn destination_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "city": {"type": "string", "description": "Cidade recomendada para visitar"},
            "reason": {"type": "string", "description": "Por que vale a pena visitar essa cidade"}
        },
        "required": ["city", "reason"]
    })
}

fn restaurant_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "city": {"type": "string", "description": "Cidade recomendada"},
            "restaurant": {"type": "string", "description": "Restaurante recomendado na cidade"}
        },
        "required": ["city", "restaurant"]
    })
}

/// Run the chain for one interest (e.g. "praias").
pub async fn plan_trip(model: &dyn ChatModel, interest: &str) -> Result<TripPlan> {
    let destination: Destination = ask_json(
        model,
        vec![ChatMessage::user(format!(
            "Sugira uma cidade para quem se interessa por {}.\n\n{}",
            interest,
            structured::format_instructions(&destination_schema())
        ))],
    )
    .await?;
    info!("Destination: {}", destination.city);

    let restaurant: Restaurant = ask_json(
        model,
        vec![ChatMessage::user(format!(
            "Sugira um restaurante popular entre os moradores de {}.\n\n{}",
            destination.city,
            structured::format_instructions(&restaurant_schema())
        ))],
    )
    .await?;
    info!("Restaurant: {}", restaurant.restaurant);

    let culture = ask_text(
        model,
        vec![ChatMessage::user(format!(
            "Sugira atividades e locais culturais em {}.",
            restaurant.city
        ))],
    )
    .await?;

    Ok(TripPlan {
        destination,
        restaurant,
        culture,
    })
}
