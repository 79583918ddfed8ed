// In app/src/main.rs

use anyhow::{Context, Result};
use api_client::ApiClient;
use app_config::Settings;
use clap::{Parser, Subcommand};
use engine::{Engine, PollerHandle, SendOutcome};
use events::ViewEvent;
use render::{AgentsView, DashboardView, MarketsView};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::prelude::*;

mod console;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A terminal client for the AI trading agents backend.")]
struct Cli {
    /// Overrides `api.base_url`, e.g. "http://localhost:8000/api".
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print view models as JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shows portfolio stats.
    Dashboard {
        /// Keep polling and print every update until Ctrl-C.
        #[arg(short, long)]
        watch: bool,
    },

    /// Shows the trading agents and their wallets.
    Agents {
        #[arg(short, long)]
        watch: bool,
    },

    /// Shows market prices, the ticker strip and top picks.
    Markets {
        /// The sector tab to show.
        #[arg(short, long, default_value = render::markets::ALL_SECTORS)]
        sector: String,

        #[arg(short, long)]
        watch: bool,
    },

    /// Chats with the AI assistant. Reads one message per line from stdin.
    Chat,

    /// Pauses or resumes an agent, then shows the re-read agent list.
    Toggle {
        /// The agent id.
        id: u64,
    },

    /// Checks whether the backend is reachable.
    Health,

    /// Serves fixed fixtures on the `stub_server` address, for offline demos.
    ServeStub,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = app_config::load_settings().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.api.base_url = base_url;
    }

    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, base_url = %settings.api.base_url, "Starting client");

    match cli.command {
        Commands::Dashboard { watch } => handle_dashboard(&settings, watch, cli.json).await?,
        Commands::Agents { watch } => handle_agents(&settings, watch, cli.json).await?,
        Commands::Markets { sector, watch } => handle_markets(&settings, &sector, watch, cli.json).await?,
        Commands::Chat => handle_chat(&settings, cli.json).await?,
        Commands::Toggle { id } => handle_toggle(&settings, id, cli.json).await?,
        Commands::Health => handle_health(&settings, cli.json).await?,
        Commands::ServeStub => stub_server::run(settings.stub_server.clone()).await?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only view output.
fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper", tracing::Level::WARN)
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn engine(settings: &Settings) -> Result<Engine> {
    let client = ApiClient::new(&settings.api).context("Failed to build the API client")?;
    Ok(Engine::new(Arc::new(client), settings.polling.clone()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints every event accepted by `show` until Ctrl-C, or only the first
/// one unless `watch` is set. The poller stops when `_handle` is dropped.
async fn follow<F>(mut events: broadcast::Receiver<ViewEvent>, _handle: PollerHandle, watch: bool, mut show: F) -> Result<()>
where
    F: FnMut(ViewEvent) -> Result<bool>,
{
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if show(event)? && !watch {
                        return Ok(());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Display fell behind; skipped updates.");
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(()),
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

async fn handle_dashboard(settings: &Settings, watch: bool, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    let events = engine.subscribe();
    let handle = engine.start_dashboard();

    follow(events, handle, watch, |event| {
        let ViewEvent::Dashboard(update) = event else { return Ok(false) };
        let view = DashboardView::from_state(&update.state);
        if json { print_json(&view)? } else { console::dashboard(&view) }
        Ok(true)
    })
    .await
}

async fn handle_agents(settings: &Settings, watch: bool, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    let events = engine.subscribe();
    let handle = engine.start_agents();

    follow(events, handle, watch, |event| {
        let ViewEvent::Agents(update) = event else { return Ok(false) };
        let view = AgentsView::from_state(&update.state);
        if json { print_json(&view)? } else { console::agents(&view) }
        Ok(true)
    })
    .await
}

async fn handle_markets(settings: &Settings, sector: &str, watch: bool, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    let events = engine.subscribe();
    let handle = engine.start_markets();

    follow(events, handle, watch, |event| {
        let ViewEvent::Markets(update) = event else { return Ok(false) };
        let Some(view) = MarketsView::from_state(&update.state, sector) else {
            return Ok(false);
        };
        let ticker = update.state.snapshot().map(render::markets::ticker).unwrap_or_default();
        if json { print_json(&view)? } else { console::markets(&view, &ticker) }
        Ok(true)
    })
    .await
}

async fn handle_chat(settings: &Settings, json: bool) -> Result<()> {
    let engine = engine(settings)?;
    let session = engine.chat();
    let show = |message: &core_types::ChatMessage| -> Result<()> {
        let rendered = render::render_message(message);
        if json { print_json(&rendered) } else { console::chat_message(&rendered); Ok(()) }
    };

    for message in session.messages() {
        show(&message)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.send(&line).await {
            SendOutcome::Replied(reply) => show(&reply)?,
            SendOutcome::Busy => console::error("Still waiting for the previous reply."),
            SendOutcome::Ignored => {}
        }
    }
    Ok(())
}

async fn handle_toggle(settings: &Settings, id: u64, json: bool) -> Result<()> {
    let engine = engine(settings)?;

    // No periodic poller here, so the list shown is the post-toggle read.
    let (outcome, state) = engine.toggle_and_reread(id).await;
    match outcome {
        Ok(ack) => console::success(&ack.message),
        Err(e) => console::error(&format!("Toggle failed: {e}")),
    }

    let view = AgentsView::from_state(&state);
    if json { print_json(&view) } else { console::agents(&view); Ok(()) }
}

async fn handle_health(settings: &Settings, json: bool) -> Result<()> {
    let client = ApiClient::new(&settings.api).context("Failed to build the API client")?;
    match client.health().await {
        Ok(status) if json => print_json(&status)?,
        Ok(status) => console::success(&format!("{} {} ({})", status.service, status.version, status.status)),
        Err(_) if json => print_json(&serde_json::json!({ "status": "OFFLINE" }))?,
        Err(_) => console::error("OFFLINE"),
    }
    Ok(())
}
