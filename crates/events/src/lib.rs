// --- View update events, broadcast from pollers and the chat session ---

use chrono::{DateTime, Utc};
use core_types::{Agent, ChatMessage, DashboardStats, ViewState};
use serde::Serialize;

/// The markets view snapshot: rows plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketBoard {
    pub rows: Vec<MarketRow>,
    /// True when the rows are the built-in demo dataset, not backend data.
    pub demo: bool,
}

/// A market table row with its rendered sparkline series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketRow {
    pub asset: core_types::MarketAsset,
    /// Display volume such as "1.2B" or "45M".
    pub volume: String,
    pub chart: Vec<f64>,
}

/// A view's state at the moment it changed.
#[derive(Debug, Clone, Serialize)]
pub struct ViewUpdate<T> {
    pub at: DateTime<Utc>,
    pub state: ViewState<T>,
}

impl<T> ViewUpdate<T> {
    pub fn now(state: ViewState<T>) -> Self {
        Self { at: Utc::now(), state }
    }
}

/// The top-level event enum.
/// `tag` and `content` are used by serde for clean JSON representation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum ViewEvent {
    Dashboard(ViewUpdate<DashboardStats>),
    Agents(ViewUpdate<Vec<Agent>>),
    Markets(ViewUpdate<MarketBoard>),
    ChatMessage(ChatMessage),
}

impl From<ViewState<DashboardStats>> for ViewEvent {
    fn from(state: ViewState<DashboardStats>) -> Self {
        ViewEvent::Dashboard(ViewUpdate::now(state))
    }
}

impl From<ViewState<Vec<Agent>>> for ViewEvent {
    fn from(state: ViewState<Vec<Agent>>) -> Self {
        ViewEvent::Agents(ViewUpdate::now(state))
    }
}

impl From<ViewState<MarketBoard>> for ViewEvent {
    fn from(state: ViewState<MarketBoard>) -> Self {
        ViewEvent::Markets(ViewUpdate::now(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_with_type_and_payload() {
        let mut state: ViewState<Vec<Agent>> = ViewState::new();
        state.fail("HTTP 503 from /agents/");
        let value = serde_json::to_value(ViewEvent::from(state)).unwrap();

        assert_eq!(value["type"], "Agents");
        assert_eq!(value["payload"]["state"]["liveness"], "offline");
        assert!(value["payload"]["state"]["snapshot"].is_null());
    }
}
