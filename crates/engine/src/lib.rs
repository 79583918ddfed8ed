// In crates/engine/src/lib.rs

pub mod agents;
pub mod chat;
pub mod dashboard;
pub mod error;
pub mod markets;
pub mod poller;

#[cfg(test)]
mod testing;

pub use agents::{AgentsSource, toggle_agent};
pub use chat::{ChatSession, SendOutcome};
pub use dashboard::DashboardSource;
pub use error::{Error, Result};
pub use markets::MarketsSource;
pub use poller::{Poller, PollerHandle, Refresh, Source};

use api_client::{AgentAck, Backend};
use app_config::PollingSettings;
use core_types::{Agent, ViewState};
use events::ViewEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Capacity of the view event channel. Slow subscribers lag rather than
/// block pollers.
pub const EVENT_CAPACITY: usize = 64;

/// Wires the live views to one backend and fans their updates out as
/// `ViewEvent`s.
///
/// Each `start_*` call spawns one poller; the returned handle owns it, so
/// a view stops polling when its handle is dropped.
pub struct Engine {
    backend: Arc<dyn Backend>,
    polling: PollingSettings,
    events: broadcast::Sender<ViewEvent>,
}

impl Engine {
    pub fn new(backend: Arc<dyn Backend>, polling: PollingSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { backend, polling, events }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Subscribes to updates from every poller and chat session started
    /// by this engine.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn start_dashboard(&self) -> PollerHandle {
        let source = DashboardSource::new(self.backend.clone());
        self.start(source, self.polling.dashboard())
    }

    pub fn start_agents(&self) -> PollerHandle {
        let source = AgentsSource::new(self.backend.clone());
        self.start(source, self.polling.agents())
    }

    pub fn start_markets(&self) -> PollerHandle {
        let source = MarketsSource::new(self.backend.clone());
        self.start(source, self.polling.markets())
    }

    /// Toggles agent `id` and reads the list back once, with no periodic
    /// poller running, so the returned state is always the post-toggle read.
    pub async fn toggle_and_reread(&self, id: u64) -> (api_client::Result<AgentAck>, ViewState<Vec<Agent>>) {
        let mut poller = Poller::new(AgentsSource::new(self.backend.clone()));
        let outcome = toggle_agent(self.backend(), id, &mut poller).await;
        (outcome, poller.state().clone())
    }

    /// Opens a chat session whose messages are also published as events.
    pub fn chat(&self) -> ChatSession {
        ChatSession::new(self.backend.clone()).with_events(self.events.clone())
    }

    fn start<S>(&self, source: S, period: Duration) -> PollerHandle
    where
        S: Source,
        ViewEvent: From<ViewState<S::Snapshot>>,
    {
        let events = self.events.clone();
        poller::spawn(Poller::new(source), period, move |state| {
            // Nobody listening is not an error.
            let _ = events.send(ViewEvent::from(state.clone()));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use core_types::{AgentStatus, DashboardStats, Liveness};

    #[tokio::test(start_paused = true)]
    async fn pollers_publish_their_state() {
        let backend = Arc::new(FakeBackend {
            stats: Some(DashboardStats::default()),
            ..Default::default()
        });
        let engine = Engine::new(backend, PollingSettings::default());
        let mut events = engine.subscribe();

        let _dashboard = engine.start_dashboard();
        let _markets = engine.start_markets();

        let mut seen = Vec::new();
        for _ in 0..2 {
            match events.recv().await.unwrap() {
                ViewEvent::Dashboard(update) => seen.push(("dashboard", update.state.liveness())),
                ViewEvent::Markets(update) => {
                    assert!(update.state.snapshot().is_some_and(|b| b.demo));
                    seen.push(("markets", update.state.liveness()));
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        seen.sort_by_key(|(view, _)| *view);
        assert_eq!(seen, [("dashboard", Liveness::Live), ("markets", Liveness::Offline)]);
    }

    #[tokio::test]
    async fn toggle_returns_the_list_read_after_it() {
        let agent = Agent {
            id: 3,
            name: "Scout".to_string(),
            strategy: "Grid".to_string(),
            asset: "BTC".to_string(),
            status: AgentStatus::Paused,
            runtime: String::new(),
            capital: 1_000.0,
            wallet: None,
        };
        let backend = Arc::new(FakeBackend { agents: Some(vec![agent]), toggle_ok: true, ..Default::default() });
        let engine = Engine::new(backend.clone(), PollingSettings::default());

        let (ack, state) = engine.toggle_and_reread(3).await;

        assert!(ack.is_ok());
        assert!(state.is_live());
        assert_eq!(state.snapshot().map(|agents| agents[0].id), Some(3));
        assert_eq!(backend.calls("/agents/{id}/toggle"), 1);
        assert_eq!(backend.calls("/agents/"), 1);
    }
}
