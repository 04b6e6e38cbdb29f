//! Advisor — student-advising and travel-planning assistant.
//!
//! Usage:
//!   advisor advise [QUESTION]          Let the model pick tools and answer
//!   advisor lookup student <NAME>      Look a student up directly
//!   advisor lookup university <NAME>   Look a university up directly
//!   advisor travel --interest praias   Destination, restaurant, culture
//!   advisor chat                       Two-question chat with memory
//!   advisor route [QUERY]              Beach or mountain consultant

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use advisor::agent::{prompts, DispatchOutcome, Dispatcher};
use advisor::chains::{self, chat, TravelGuide};
use advisor::config::{self, AdvisorConfig, Credentials};
use advisor::llm::{ChatModel, InferenceClient};
use advisor::session::SessionStore;
use advisor::tools;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(version = "0.1.0")]
#[command(about = "Student-advising and travel-planning assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the advisor config file.
    #[arg(long, default_value = "advisor.toml")]
    config: PathBuf,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question with the tool-dispatch loop.
    Advise {
        /// Question for the advisor.
        question: Option<String>,
    },

    /// Look a record up without calling the model.
    Lookup {
        #[arg(value_enum)]
        kind: LookupKind,

        /// Name to search for (case-insensitive).
        name: String,
    },

    /// Suggest a destination, a restaurant there, and cultural activities.
    Travel {
        #[arg(long, default_value = "praias")]
        interest: String,
    },

    /// Run the scripted travel-guide conversation with session memory.
    Chat {
        #[arg(long, default_value = chat::DEFAULT_SESSION)]
        session: String,
    },

    /// Route a query to the beach or mountain consultant.
    Route {
        #[arg(default_value = "Quero escalar.")]
        query: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LookupKind {
    Student,
    University,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Pick up AZURE_OPENAI_* from a local .env, if present.
    let _ = dotenvy::dotenv();

    let config_path = config::locate_config(&cli.config);
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(cfg.log_level.as_str());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Advise { question } => cmd_advise(&cfg, question).await,
        Commands::Lookup { kind, name } => cmd_lookup(&cfg, kind, &name),
        Commands::Travel { interest } => cmd_travel(&cfg, &interest).await,
        Commands::Chat { session } => cmd_chat(&cfg, &session).await,
        Commands::Route { query } => cmd_route(&cfg, &query).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_advise(cfg: &AdvisorConfig, question: Option<String>) -> Result<()> {
    let model = connect(cfg)?;
    let registry = tools::standard_registry(cfg, model.clone())?;
    let dispatcher =
        Dispatcher::new(model, registry).with_unknown_tool_policy(cfg.unknown_tool_policy);

    let question = question.unwrap_or_else(|| prompts::DEFAULT_QUESTION.to_string());
    println!("{} {}", "Pergunta:".bold(), question);

    match dispatcher.run(&question).await? {
        DispatchOutcome::NoToolInvoked { planner_reply } => {
            println!("{}", "Nenhuma ferramenta foi chamada.".yellow());
            if let Some(reply) = planner_reply {
                println!("\n{}", reply);
            }
        }
        DispatchOutcome::Answered { results, answer } => {
            println!("\n{} ({})", "Resultados das ferramentas".bold(), results.len());
            for result in &results {
                println!("  {} {}", format!("[{}]", result.tool_name).as_str().cyan(), result.output);
            }
            println!("\n{}", "Resposta final:".green().bold());
            println!("{}", answer);
        }
    }
    Ok(())
}

fn cmd_lookup(cfg: &AdvisorConfig, kind: LookupKind, name: &str) -> Result<()> {
    let dataset = match kind {
        LookupKind::Student => tools::student_dataset(cfg),
        LookupKind::University => tools::university_dataset(cfg),
    };
    let record = dataset
        .find(name)
        .with_context(|| format!("Lookup failed in {}", dataset.path().display()))?;

    if record.is_empty() {
        println!("{} '{}'", "Nenhum registro para".yellow(), name);
    } else {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }
    Ok(())
}

async fn cmd_travel(cfg: &AdvisorConfig, interest: &str) -> Result<()> {
    let model = connect(cfg)?;
    let plan = chains::plan_trip(model.as_ref(), interest).await?;

    println!("{} {} ({})", "Destino:".bold(), plan.destination.city, plan.destination.reason);
    println!("{} {}", "Restaurante:".bold(), plan.restaurant.restaurant);
    println!("\n{}\n{}", "Cultura:".bold(), plan.culture);
    Ok(())
}

async fn cmd_chat(cfg: &AdvisorConfig, session: &str) -> Result<()> {
    let model = connect(cfg)?;
    let guide = TravelGuide::new(model, Arc::new(SessionStore::new()));

    for question in chat::DEFAULT_QUESTIONS {
        let reply = guide.ask(session, question).await?;
        println!("{} {}", "Usuário:".bold(), question);
        println!("{} {}\n", "IA:".green().bold(), reply);
    }
    Ok(())
}

async fn cmd_route(cfg: &AdvisorConfig, query: &str) -> Result<()> {
    let model = connect(cfg)?;
    let routed = chains::route(model.as_ref(), query).await?;

    println!("{} {}", "Rota:".bold(), routed.destination);
    println!("{}", routed.answer);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read credentials and build the model client. Missing credentials are fatal.
fn connect(cfg: &AdvisorConfig) -> Result<Arc<dyn ChatModel>> {
    let credentials = Credentials::from_env().context("Endpoint credentials unavailable")?;
    info!(
        "Using deployment '{}' at {} (api-version {})",
        cfg.deployment, credentials.endpoint, cfg.api_version
    );
    Ok(Arc::new(InferenceClient::new(&credentials, cfg)))
}
