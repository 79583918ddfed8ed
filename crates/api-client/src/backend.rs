// In crates/api-client/src/backend.rs

use crate::{AgentAck, ApiClient, Result};
use async_trait::async_trait;
use core_types::{Agent, ChatEnvelope, DashboardStats, MarketAsset};

/// The slice of the backend that the live views depend on.
///
/// `ApiClient` is the real implementation; pollers, the chat session and
/// the agent actions only see this trait, so they can run against fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    async fn list_agents(&self) -> Result<Vec<Agent>>;

    async fn toggle_agent(&self, id: u64) -> Result<AgentAck>;

    async fn market_prices(&self) -> Result<Vec<MarketAsset>>;

    async fn send_chat(&self, message: &str) -> Result<ChatEnvelope>;
}

#[async_trait]
impl Backend for ApiClient {
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        ApiClient::dashboard_stats(self).await
    }

    async fn list_agents(&self) -> Result<Vec<Agent>> {
        ApiClient::list_agents(self).await
    }

    async fn toggle_agent(&self, id: u64) -> Result<AgentAck> {
        ApiClient::toggle_agent(self, id).await
    }

    async fn market_prices(&self) -> Result<Vec<MarketAsset>> {
        ApiClient::market_prices(self).await
    }

    async fn send_chat(&self, message: &str) -> Result<ChatEnvelope> {
        ApiClient::send_chat(self, message).await
    }
}
