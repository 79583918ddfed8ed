// In crates/stub-server/src/lib.rs

//! A stand-in for the trading-agents backend that serves fixed fixtures
//! over the same HTTP contract. Used by integration tests and by the
//! `serve-stub` command for offline demos.

use app_config::ServerSettings;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use core_types::{Agent, AgentStatus, NewAgent};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub mod error;
pub mod fixtures;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    agents: Arc<Mutex<Vec<Agent>>>,
    holdings: Arc<Mutex<Vec<Value>>>,
}

impl AppState {
    pub fn with_fixtures() -> Self {
        Self {
            agents: Arc::new(Mutex::new(fixtures::agents())),
            holdings: Arc::new(Mutex::new(fixtures::holdings())),
        }
    }

    // A poisoned lock only means a handler panicked mid-update; the data is still usable.
    fn agents(&self) -> MutexGuard<'_, Vec<Agent>> {
        self.agents.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn holdings(&self) -> MutexGuard<'_, Vec<Value>> {
        self.holdings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Creates the router with every backend route mounted under `/api`.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route("/dashboard/stats", get(dashboard_stats_handler))
        .route("/market/prices", get(prices_handler))
        .route("/market/crypto", get(crypto_handler))
        .route("/market/stocks", get(stocks_handler))
        .route("/market/history/{coin_id}", get(history_handler))
        .route("/market/analysis/{symbol}", get(analysis_handler))
        .route("/portfolio/holdings", get(holdings_handler))
        .route("/portfolio/analysis", get(portfolio_analysis_handler))
        .route("/portfolio/rebalance", post(rebalance_handler))
        .route("/agents/", get(list_agents_handler))
        .route("/agents/create", post(create_agent_handler))
        .route("/agents/{id}", get(get_agent_handler))
        .route("/agents/{id}/toggle", post(toggle_agent_handler))
        .route("/chat/send", post(chat_handler));

    Router::new()
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "online", "service": "stub", "version": env!("CARGO_PKG_VERSION") }))
}

async fn dashboard_stats_handler(State(state): State<AppState>) -> Json<core_types::DashboardStats> {
    Json(fixtures::dashboard_stats(&state.agents()))
}

async fn prices_handler() -> Json<Value> {
    let data = fixtures::market_assets();
    Json(json!({ "count": data.len(), "data": data }))
}

async fn crypto_handler() -> Json<Value> {
    let data: Vec<_> = fixtures::market_assets().into_iter().filter(|a| a.sector == "Crypto").collect();
    Json(json!({ "data": data }))
}

async fn stocks_handler() -> Json<Value> {
    let data: Vec<_> = fixtures::market_assets().into_iter().filter(|a| a.sector == "Stocks").collect();
    Json(json!({ "data": data }))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 { 30 }

async fn history_handler(Path(coin_id): Path<String>, Query(params): Query<HistoryParams>) -> Json<Value> {
    let days = params.days.clamp(1, 365);
    let data: Vec<Value> = (0..days)
        .map(|d| {
            let ts = 1_700_000_000_000_i64 + d as i64 * 86_400_000;
            json!({ "timestamp": ts, "date": format!("Day {}", d + 1), "price": 60_000.0 + d as f64 * 25.0 })
        })
        .collect();
    Json(json!({ "coin": coin_id, "days": days, "data": data }))
}

async fn analysis_handler(Path(symbol): Path<String>) -> Result<Json<Value>> {
    fixtures::analysis(&symbol)
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("Symbol {} not found", symbol)))
}

async fn holdings_handler(State(state): State<AppState>) -> Json<Value> {
    let holdings = state.holdings().clone();
    let total: f64 = holdings.iter().filter_map(|h| h["value"].as_f64()).sum();
    Json(json!({ "holdings": holdings, "totalValue": total, "assetCount": holdings.len() }))
}

async fn portfolio_analysis_handler() -> Json<Value> {
    Json(fixtures::portfolio_analysis())
}

#[derive(Debug, Deserialize)]
struct RebalanceBody {
    adjustments: Vec<Value>,
}

async fn rebalance_handler(State(state): State<AppState>, Json(body): Json<RebalanceBody>) -> Json<Value> {
    let mut holdings = state.holdings();
    for adj in &body.adjustments {
        let (Some(name), Some(value)) = (adj["name"].as_str(), adj["value"].as_f64()) else {
            continue;
        };
        if let Some(h) = holdings.iter_mut().find(|h| h["name"] == name) {
            h["value"] = json!(value);
        }
    }
    tracing::info!(count = body.adjustments.len(), "Applied rebalance adjustments.");
    Json(json!({ "message": "Portfolio rebalanced", "holdings": *holdings }))
}

async fn list_agents_handler(State(state): State<AppState>) -> Json<Value> {
    let agents = state.agents().clone();
    Json(json!({ "count": agents.len(), "agents": agents }))
}

async fn get_agent_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Value>> {
    let agents = state.agents();
    let agent = agents
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| Error::NotFound("Agent not found".to_string()))?;
    let mut detail = json!(agent);
    detail["wallet"] = fixtures::raw_wallet(agent);
    detail["tradeHistory"] = json!([]);
    Ok(Json(detail))
}

#[derive(Debug, Deserialize)]
struct CreateAgentBody {
    name: String,
    strategy: String,
    asset: String,
    capital: f64,
}

async fn create_agent_handler(State(state): State<AppState>, Json(body): Json<CreateAgentBody>) -> Json<Value> {
    let spec = NewAgent { name: body.name, strategy: body.strategy, asset: body.asset, capital: body.capital };
    let mut agents = state.agents();
    let id = agents.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    let agent = Agent {
        id,
        name: spec.name.clone(),
        strategy: spec.strategy,
        asset: spec.asset,
        status: AgentStatus::Active,
        runtime: "0s".to_string(),
        capital: spec.capital,
        wallet: None,
    };
    agents.push(agent.clone());
    tracing::info!(id, name = %spec.name, "Created agent.");
    Json(json!({
        "message": format!("Agent '{}' deployed with ${:.2} virtual funds", spec.name, spec.capital),
        "agent": agent
    }))
}

async fn toggle_agent_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Value>> {
    let mut agents = state.agents();
    let agent = agents
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| Error::NotFound("Agent not found".to_string()))?;
    agent.status = match agent.status {
        AgentStatus::Active => AgentStatus::Paused,
        AgentStatus::Paused => AgentStatus::Active,
    };
    tracing::info!(id, status = %agent.status, "Toggled agent.");
    Ok(Json(json!({
        "message": format!("Agent '{}' is now {}", agent.name, agent.status),
        "agent": agent
    })))
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    message: String,
}

async fn chat_handler(State(state): State<AppState>, Json(body): Json<ChatBody>) -> Json<Value> {
    let agents = state.agents().clone();
    Json(fixtures::chat_reply(&body.message, &agents))
}

/// Binds `addr`, serves the stub in a background task, and returns the
/// bound address (useful with port 0) together with the task handle.
pub async fn spawn(addr: &str) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
    let listener = TcpListener::bind(addr).await.map_err(Error::ServerBindError)?;
    let local = listener.local_addr().map_err(Error::ServerBindError)?;
    let app = create_router(AppState::with_fixtures());

    let handle = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.map_err(Error::Serve)
    });
    Ok((local, handle))
}

/// The main entry point for running the stub server.
///
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings) -> Result<()> {
    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Stub backend listening on {}", address);

    let app = create_router(AppState::with_fixtures());
    axum::serve(listener, app.into_make_service()).await.map_err(Error::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn toggle_flips_status_in_memory() {
        let state = AppState::with_fixtures();
        let app = create_router(state.clone());

        let (status, body) = call(app.clone(), "POST", "/api/agents/2/toggle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent"]["status"], "paused");

        let (_, body) = call(app, "GET", "/api/agents/").await;
        assert_eq!(body["agents"][1]["status"], "paused");
        assert_eq!(body["agents"][0]["status"], "active");
    }

    #[tokio::test]
    async fn detail_serves_the_raw_wallet() {
        let app = create_router(AppState::with_fixtures());
        let (status, body) = call(app, "GET", "/api/agents/1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wallet"]["total_value"], 26_340.5);
        assert_eq!(body["wallet"]["trades_count"], 14);
        assert!(body["wallet"].get("totalValue").is_none());
        assert!(body["tradeHistory"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_agent_is_an_error_object() {
        let app = create_router(AppState::with_fixtures());
        let (status, body) = call(app, "POST", "/api/agents/99/toggle").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Agent not found");
    }

    #[tokio::test]
    async fn stats_count_only_active_agents() {
        let state = AppState::with_fixtures();
        let app = create_router(state.clone());
        call(app.clone(), "POST", "/api/agents/1/toggle").await;

        let (_, body) = call(app, "GET", "/api/dashboard/stats").await;
        assert_eq!(body["activeAgents"], 3);
        assert_eq!(body["portfolioHistory"].as_array().unwrap().last().unwrap()["date"], "Today");
    }

    #[test]
    fn chat_reply_picks_variant_by_keyword() {
        let agents = fixtures::agents();
        assert_eq!(fixtures::chat_reply("What are my agents doing?", &agents)["type"], "agents_report");
        assert_eq!(fixtures::chat_reply("show recent trades", &agents)["type"], "trades");
        assert_eq!(fixtures::chat_reply("rebalance please", &agents)["type"], "rebalance");
        assert_eq!(fixtures::chat_reply("analyze btc", &agents)["type"], "analysis");
        assert_eq!(fixtures::chat_reply("hello", &agents)["type"], "text");
    }
}
