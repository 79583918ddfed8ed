// In crates/api-client/src/lib.rs

use app_config::ApiSettings;
use core_types::{Agent, ChatEnvelope, DashboardStats, MarketAsset, NewAgent};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod backend;
pub mod error;
pub mod types;

// Re-export public types
pub use backend::Backend;
pub use error::{Error, Result};
pub use types::*;

/// Default coin and window for `GET /market/history`.
pub const DEFAULT_HISTORY_COIN: &str = "bitcoin";
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

impl ApiClient {
    /// Constructs a new ApiClient from the API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(Error::ClientBuildError)?;

        Ok(ApiClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues one JSON request and decodes the body.
    ///
    /// Every failure (transport, non-2xx, malformed body, or an `{"error": ..}`
    /// body) is logged here, once, and handed back as an `Err` value for the
    /// caller to treat as "unavailable".
    async fn request<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> Result<T> {
        let result = self.execute(endpoint, builder).await;
        if let Err(e) = &result {
            tracing::warn!(endpoint, kind = e.kind(), error = %e, "Backend request failed.");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(Error::RequestFailed)?;
        let value: Value = serde_json::from_str(&text).map_err(Error::DeserializationFailed)?;

        // The backend reports some failures (unknown agent or symbol) as a
        // 200 with an error object, so we check for that first.
        if let Some(message) = value.get("error") {
            let message = message.as_str().map(str::to_string).unwrap_or_else(|| message.to_string());
            return Err(Error::Rejected { message });
        }

        serde_json::from_value(value).map_err(Error::DeserializationFailed)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let builder = self.http_client.request(Method::GET, self.url(endpoint));
        self.request(endpoint, builder).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let mut builder = self.http_client.request(Method::POST, self.url(endpoint));
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        self.request(endpoint, builder).await
    }

    // --- Market data ---

    /// `GET /market/prices`: crypto and stock quotes together.
    pub async fn market_prices(&self) -> Result<Vec<MarketAsset>> {
        self.get::<PricesResponse>("/market/prices").await.map(|r| r.data)
    }

    /// `GET /market/crypto`.
    pub async fn crypto_prices(&self) -> Result<Vec<MarketAsset>> {
        self.get::<PricesResponse>("/market/crypto").await.map(|r| r.data)
    }

    /// `GET /market/stocks`.
    pub async fn stock_prices(&self) -> Result<Vec<MarketAsset>> {
        self.get::<PricesResponse>("/market/stocks").await.map(|r| r.data)
    }

    /// `GET /market/history/{coin_id}?days={days}`.
    pub async fn price_history(&self, coin_id: &str, days: u32) -> Result<PriceHistory> {
        self.get(&format!("/market/history/{}?days={}", coin_id, days)).await
    }

    /// `GET /market/analysis/{symbol}`: the AI signal for one asset.
    pub async fn market_analysis(&self, symbol: &str) -> Result<core_types::AnalysisReport> {
        self.get(&format!("/market/analysis/{}", symbol)).await
    }

    // --- Portfolio ---

    pub async fn portfolio_holdings(&self) -> Result<Holdings> {
        self.get("/portfolio/holdings").await
    }

    pub async fn portfolio_analysis(&self) -> Result<PortfolioAnalysis> {
        self.get("/portfolio/analysis").await
    }

    /// `POST /portfolio/rebalance` with `{adjustments}`.
    pub async fn rebalance(&self, adjustments: &[Adjustment]) -> Result<RebalanceResult> {
        self.post("/portfolio/rebalance", Some(&RebalanceRequest { adjustments }))
            .await
    }

    // --- Agents ---

    /// `GET /agents/`.
    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.get::<AgentsResponse>("/agents/").await.map(|r| r.agents)
    }

    /// `GET /agents/{id}`.
    pub async fn get_agent(&self, id: u64) -> Result<AgentDetail> {
        self.get(&format!("/agents/{}", id)).await
    }

    /// `POST /agents/create`.
    pub async fn create_agent(&self, spec: &NewAgent) -> Result<AgentAck> {
        self.post("/agents/create", Some(spec)).await
    }

    /// `POST /agents/{id}/toggle`: pauses an active agent or resumes a paused one.
    pub async fn toggle_agent(&self, id: u64) -> Result<AgentAck> {
        self.post::<_, ()>(&format!("/agents/{}/toggle", id), None).await
    }

    // --- Chat, health, dashboard ---

    /// `POST /chat/send` with `{message}`.
    pub async fn send_chat(&self, message: &str) -> Result<ChatEnvelope> {
        self.post("/chat/send", Some(&ChatRequest { message })).await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health").await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/dashboard/stats").await
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &ApiSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}
