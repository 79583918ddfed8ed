// In crates/render/src/agents.rs

use crate::format::{format_currency, format_number, format_percentage};
use crate::{Badge, Tone};
use core_types::{Agent, ViewState};
use serde::Serialize;

pub const LOADING_AGENTS: &str = "Loading simulation data...";

/// Fleet-wide totals shown above the agent cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTotals {
    pub aum: String,
    pub pnl: String,
    pub pnl_tone: Tone,
    pub trades: u64,
    /// `"3 / 4"`: active agents out of all agents.
    pub active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionLine {
    pub symbol: String,
    pub qty: String,
    pub unrealized_pnl: String,
    pub tone: Tone,
}

/// One agent's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCard {
    pub id: u64,
    pub name: String,
    pub strategy: String,
    pub asset: String,
    pub status: String,
    pub status_tone: Tone,
    pub runtime: String,
    pub value: String,
    pub pnl: String,
    pub pnl_percentage: String,
    pub pnl_tone: Tone,
    pub win_rate: String,
    pub cash: String,
    /// `"14 trades (9W / 5L)"`.
    pub record: String,
    pub positions: Vec<PositionLine>,
    /// The label of the toggle action: "Pause" or "Start".
    pub action: &'static str,
}

/// The agents view, or its loading placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AgentsView {
    Loading { badge: Badge },
    Ready { badge: Badge, totals: AgentTotals, cards: Vec<AgentCard> },
}

impl AgentsView {
    pub fn from_state(state: &ViewState<Vec<Agent>>) -> Self {
        let badge = Badge::for_liveness(state.liveness());
        match state.snapshot() {
            None => AgentsView::Loading { badge },
            Some(agents) => AgentsView::Ready {
                badge,
                totals: totals(agents),
                cards: agents.iter().map(card).collect(),
            },
        }
    }
}

pub fn totals(agents: &[Agent]) -> AgentTotals {
    let aum: f64 = agents.iter().map(Agent::current_value).sum();
    let pnl: f64 = agents.iter().map(Agent::pnl).sum();
    let active = agents.iter().filter(|a| a.is_active()).count();
    AgentTotals {
        aum: format_currency(aum),
        pnl: format_currency(pnl),
        pnl_tone: Tone::of_change(pnl),
        trades: agents.iter().map(Agent::trades_count).sum(),
        active: format!("{} / {}", active, agents.len()),
    }
}

pub fn card(agent: &Agent) -> AgentCard {
    let wallet = agent.wallet.clone().unwrap_or_default();
    let cash = if wallet.cash != 0.0 { wallet.cash } else { agent.capital };
    let positions = wallet
        .positions
        .iter()
        .map(|(symbol, p)| PositionLine {
            symbol: symbol.clone(),
            qty: format!("{:.4}", p.qty),
            unrealized_pnl: format!("{}{}", if p.unrealized_pnl >= 0.0 { "+" } else { "" }, format_currency(p.unrealized_pnl)),
            tone: Tone::of_change(p.unrealized_pnl),
        })
        .collect();

    AgentCard {
        id: agent.id,
        name: agent.name.clone(),
        strategy: agent.strategy.clone(),
        asset: agent.asset.clone(),
        status: agent.status.to_string(),
        status_tone: if agent.is_active() { Tone::Positive } else { Tone::Caution },
        runtime: agent.runtime.clone(),
        value: format_currency(agent.current_value()),
        pnl: format_currency(wallet.pnl),
        pnl_percentage: format_percentage(wallet.pnl_percentage),
        pnl_tone: Tone::of_change(wallet.pnl),
        win_rate: format!("{}%", format_number(wallet.win_rate)),
        cash: format_currency(cash),
        record: format!("{} trades ({}W / {}L)", wallet.trades_count, wallet.wins, wallet.losses),
        positions,
        action: if agent.is_active() { "Pause" } else { "Start" },
    }
}
