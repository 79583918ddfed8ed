// In crates/engine/src/poller.rs

use crate::Result;
use async_trait::async_trait;
use core_types::{Liveness, ViewState};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Where a poller gets its snapshots from.
#[async_trait]
pub trait Source: Send + Sync + 'static {
    type Snapshot: Clone + Send + Sync + 'static;

    /// The view name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches one complete snapshot.
    async fn fetch(&self) -> Result<Self::Snapshot>;

    /// Data to show in place of the previous snapshot when a fetch fails.
    /// `None` (the default) keeps the previous snapshot.
    fn fallback(&self) -> Option<Self::Snapshot> {
        None
    }
}

/// Owns one view's state and refreshes it from its source.
pub struct Poller<S: Source> {
    source: S,
    state: ViewState<S::Snapshot>,
}

impl<S: Source> Poller<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ViewState::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    pub fn state(&self) -> &ViewState<S::Snapshot> {
        &self.state
    }

    /// Issues exactly one fetch and folds its outcome into the state.
    pub async fn poll_once(&mut self) -> &ViewState<S::Snapshot> {
        let before = self.state.liveness();

        match self.source.fetch().await {
            Ok(snapshot) => self.state.succeed(snapshot),
            Err(e) => match self.source.fallback() {
                Some(fallback) => self.state.fail_with(&e, fallback),
                None => self.state.fail(&e),
            },
        }

        let view = self.source.name();
        match (before, self.state.liveness()) {
            (Liveness::Live, Liveness::Live) => tracing::debug!(view, "Poll succeeded."),
            (Liveness::Offline, Liveness::Offline) => {
                tracing::debug!(view, error = ?self.state.last_error(), "Backend still unavailable.")
            }
            (_, Liveness::Live) => tracing::info!(view, "View is live."),
            (_, _) => tracing::info!(view, error = ?self.state.last_error(), "View is offline."),
        }
        &self.state
    }
}

/// Anything that can re-read a view's data on demand.
#[async_trait]
pub trait Refresh: Send {
    async fn refresh(&mut self);
}

#[async_trait]
impl<S: Source> Refresh for Poller<S> {
    async fn refresh(&mut self) {
        self.poll_once().await;
    }
}

/// A running poller. Dropping the handle stops the poller; no fetch is
/// started after that.
pub struct PollerHandle {
    name: &'static str,
    refresh: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the poller and waits until its task has ended.
    pub async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::debug!(view = self.name, "Poller stopped.");
    }
}

#[async_trait]
impl Refresh for PollerHandle {
    /// Queues one out-of-band fetch. It runs after any fetch already in flight.
    async fn refresh(&mut self) {
        if self.refresh.send(()).await.is_err() {
            tracing::warn!(view = self.name, "Refresh requested after the poller stopped.");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs `poller` in a background task: one fetch immediately, then one per
/// `period`, plus one per refresh request. `publish` sees the state after
/// every fetch.
///
/// Fetches never overlap. A tick that comes due while a fetch is still in
/// flight is skipped rather than queued.
pub fn spawn<S, F>(mut poller: Poller<S>, period: Duration, publish: F) -> PollerHandle
where
    S: Source,
    F: Fn(&ViewState<S::Snapshot>) + Send + 'static,
{
    let name = poller.name();
    let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(8);

    let task = tokio::spawn(async move {
        tracing::info!(view = name, period = ?period, "Starting poller.");
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                request = refresh_rx.recv() => {
                    if request.is_none() {
                        break;
                    }
                    tracing::debug!(view = name, "Out-of-band refresh.");
                }
            }
            let state = poller.poll_once().await;
            publish(state);
        }
    });

    PollerHandle {
        name,
        refresh: refresh_tx,
        task,
    }
}
