// In crates/engine/src/testing.rs

//! A scripted `Backend` for unit tests. Every call is counted; each
//! resource answers `Ok` with its canned value unless told to fail.

use api_client::{AgentAck, Backend, Error, Result};
use async_trait::async_trait;
use core_types::{Agent, ChatEnvelope, DashboardStats, MarketAsset};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeBackend {
    pub stats: Option<DashboardStats>,
    pub agents: Option<Vec<Agent>>,
    pub markets: Option<Vec<MarketAsset>>,
    pub chat: Option<ChatEnvelope>,
    pub toggle_ok: bool,
    /// When set, chat replies are held until the gate is notified.
    pub chat_gate: Option<Arc<Notify>>,
    pub(crate) calls: Mutex<HashMap<&'static str, usize>>,
}

impl FakeBackend {
    pub fn calls(&self, endpoint: &'static str) -> usize {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    fn hit<T: Clone>(&self, endpoint: &'static str, value: &Option<T>) -> Result<T> {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
        value.clone().ok_or_else(|| Error::Status { endpoint: endpoint.to_string(), status: 503 })
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.hit("/dashboard/stats", &self.stats)
    }

    async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.hit("/agents/", &self.agents)
    }

    async fn toggle_agent(&self, id: u64) -> Result<AgentAck> {
        let ack = self.toggle_ok.then(|| AgentAck { message: format!("Agent {id} toggled"), agent: None });
        self.hit("/agents/{id}/toggle", &ack)
    }

    async fn market_prices(&self) -> Result<Vec<MarketAsset>> {
        self.hit("/market/prices", &self.markets)
    }

    async fn send_chat(&self, _message: &str) -> Result<ChatEnvelope> {
        let reply = self.hit("/chat/send", &self.chat);
        if let Some(gate) = &self.chat_gate {
            gate.notified().await;
        }
        reply
    }
}
