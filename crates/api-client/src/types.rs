// In crates/api-client/src/types.rs

use core_types::{Agent, MarketAsset, RebalancePlan};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The client for the trading-agents backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL every endpoint is appended to (e.g., "http://localhost:8000/api").
    pub base_url: String,
}

/// `GET /market/prices`, `/market/crypto`, `/market/stocks`.
#[derive(Debug, Deserialize, Clone)]
pub struct PricesResponse {
    #[serde(default)]
    pub data: Vec<MarketAsset>,
}

/// `GET /market/history/{coin}?days=N`.
#[derive(Debug, Deserialize, Clone)]
pub struct PriceHistory {
    #[serde(default)]
    pub coin: String,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub data: Vec<PricePoint>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PricePoint {
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub date: String,
    pub price: f64,
}

/// `GET /portfolio/holdings`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Holdings {
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub asset_count: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Holding {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub sector: String,
}

/// `GET /portfolio/analysis`.
#[derive(Debug, Deserialize, Clone)]
pub struct PortfolioAnalysis {
    #[serde(flatten)]
    pub plan: RebalancePlan,
    #[serde(default)]
    pub allocations: Vec<AllocationShare>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AllocationShare {
    pub asset: String,
    pub percentage: f64,
}

/// One entry of the `POST /portfolio/rebalance` body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Adjustment {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RebalanceRequest<'a> {
    pub adjustments: &'a [Adjustment],
}

/// The confirmation of `POST /portfolio/rebalance`.
#[derive(Debug, Deserialize, Clone)]
pub struct RebalanceResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

/// `GET /agents/`.
#[derive(Debug, Deserialize, Clone)]
pub struct AgentsResponse {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// `GET /agents/{id}`: the agent plus its recent trade log.
#[derive(Debug, Deserialize, Clone)]
pub struct AgentDetail {
    #[serde(flatten)]
    pub agent: Agent,
    #[serde(default, rename = "tradeHistory")]
    pub trade_history: Vec<Value>,
}

/// The reply of `POST /agents/create` and `POST /agents/{id}/toggle`.
#[derive(Debug, Deserialize, Clone)]
pub struct AgentAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub agent: Option<Agent>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// `GET /health`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}
