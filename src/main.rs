//! WikiAgent: answers natural-language questions from Wikipedia
//!
//! This is the main entry point for the application.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wikiagent::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
    Question, Resolver,
};

/// CLI arguments for wikiagent
#[derive(Parser, Debug)]
#[command(name = "wikiagent")]
#[command(version, about = "Answers natural-language questions from Wikipedia")]
#[command(long_about = r#"
Serves a question box and a JSON API (POST /api/ask) backed by the
Wikipedia search and extracts APIs.

Settings are loaded from (in priority order):
1. --config <path>
2. $WIKIAGENT_SETTINGS_PATH
3. ./settings.yml, ./config/settings.yml, /etc/wikiagent/settings.yml
4. ~/.config/wikiagent/settings.yml

Environment overrides: WIKIAGENT_DEBUG, WIKIAGENT_PORT,
WIKIAGENT_BIND_ADDRESS, WIKIAGENT_LANG, WIKIAGENT_REQUEST_TIMEOUT,
WIKIAGENT_EXTRACT_BUDGET
"#)]
struct Cli {
    /// Path to settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolve one question, print the answer as JSON and exit
    #[arg(long, value_name = "QUESTION")]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so `general.debug` can raise the level
    let settings = config::load(cli.config.as_deref())?;

    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting WikiAgent v{}", wikiagent::VERSION);

    // Initialize HTTP client
    let client = Arc::new(HttpClient::with_settings(&settings.outgoing)?);
    info!(
        "HTTP client initialized ({}, timeout {:?})",
        client.user_agent(),
        client.timeout()
    );

    if let Some(question) = cli.ask {
        let resolver = Resolver::with_settings(client, &settings);
        let answer = resolver.resolve(&Question::from(question.trim())).await;
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    // Create application state
    let state = AppState::new(settings.clone(), client)?;
    info!("Application state initialized for: {}", state.instance_name());

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
