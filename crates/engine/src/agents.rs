// In crates/engine/src/agents.rs

use crate::Result;
use crate::poller::{Refresh, Source};
use api_client::{AgentAck, Backend};
use async_trait::async_trait;
use core_types::Agent;
use std::sync::Arc;

/// The agent list. Failures keep the last list on screen.
pub struct AgentsSource {
    backend: Arc<dyn Backend>,
}

impl AgentsSource {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Source for AgentsSource {
    type Snapshot = Vec<Agent>;

    fn name(&self) -> &'static str {
        "agents"
    }

    async fn fetch(&self) -> Result<Vec<Agent>> {
        Ok(self.backend.list_agents().await?)
    }
}

/// Pauses or resumes agent `id`, then re-reads the agent list exactly once.
///
/// The re-read happens whether or not the toggle succeeded: the list on
/// screen only ever changes by reading it back from the backend.
pub async fn toggle_agent<R>(backend: &dyn Backend, id: u64, view: &mut R) -> api_client::Result<AgentAck>
where
    R: Refresh + ?Sized,
{
    let outcome = backend.toggle_agent(id).await;
    match &outcome {
        Ok(ack) => tracing::info!(id, message = %ack.message, "Agent toggled."),
        Err(e) => tracing::warn!(id, error = %e, "Agent toggle failed; re-reading the list anyway."),
    }
    view.refresh().await;
    outcome
}
