// src/main.rs

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use guestdesk::api::http::router::http_router;
use guestdesk::classifier::{ClassificationRequest, Classifier};
use guestdesk::config::CONFIG;
use guestdesk::llm::MistralGateway;
use guestdesk::state::AppState;
use guestdesk::taxonomy::ServiceCategory;

#[derive(Parser)]
#[command(name = "guestdesk", about = "LLM-backed hotel guest service request classifier")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve,
    /// Classify a single guest message and print the result
    Classify {
        message: String,
        #[arg(long)]
        guest_id: Option<String>,
        #[arg(long)]
        room_number: Option<String>,
    },
    /// Print the open insight payload for a guest message
    Insights { message: String },
    /// List the service category taxonomy
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = CONFIG.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Classify {
            message,
            guest_id,
            room_number,
        } => {
            let classifier = build_classifier()?;
            let request = ClassificationRequest {
                guest_message: message,
                guest_id,
                room_number,
            };
            let result = classifier.classify(&request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Insights { message } => {
            let classifier = build_classifier()?;
            let payload = classifier.insights(&message).await;
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Command::Categories => {
            for category in ServiceCategory::ALL {
                println!("{} ({}): {}", category.key(), category.name(), category.description());
            }
            Ok(())
        }
    }
}

fn build_classifier() -> Result<Classifier> {
    let gateway = Arc::new(MistralGateway::new()?);
    Ok(Classifier::new(gateway))
}

async fn serve() -> Result<()> {
    info!("Starting guestdesk classification service");
    info!("Model: {}", CONFIG.model);

    let classifier = Arc::new(build_classifier()?);
    let app = http_router(AppState::new(classifier));

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
