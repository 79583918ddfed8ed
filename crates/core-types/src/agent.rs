// In crates/core-types/src/agent.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The run state of a trading agent. The client only ever flips it through
/// the toggle action; it never edits it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Paused,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Paused => write!(f, "paused"),
        }
    }
}

/// An agent as returned by `GET /agents/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u64,
    pub name: String,
    pub strategy: String,
    pub asset: String,
    pub status: AgentStatus,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub capital: f64,
    #[serde(default)]
    pub wallet: Option<Wallet>,
}

impl Agent {
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }

    /// The agent's current value: its wallet value, or the starting capital
    /// when the wallet has no value yet.
    pub fn current_value(&self) -> f64 {
        match &self.wallet {
            Some(w) if w.total_value != 0.0 => w.total_value,
            _ => self.capital,
        }
    }

    pub fn pnl(&self) -> f64 {
        self.wallet.as_ref().map_or(0.0, |w| w.pnl)
    }

    pub fn trades_count(&self) -> u64 {
        self.wallet.as_ref().map_or(0, |w| w.trades_count)
    }
}

/// The simulated wallet attached to an agent.
///
/// The list route sends camelCase keys; the detail route passes the
/// simulator's raw snake_case wallet through, so both spellings decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wallet {
    #[serde(alias = "total_value")]
    pub total_value: f64,
    pub pnl: f64,
    #[serde(alias = "pnlPct", alias = "pnl_pct")]
    pub pnl_percentage: f64,
    #[serde(alias = "win_rate")]
    pub win_rate: f64,
    pub cash: f64,
    #[serde(alias = "trades_count")]
    pub trades_count: u64,
    pub wins: u64,
    pub losses: u64,
    /// Open positions keyed by symbol.
    pub positions: BTreeMap<String, Position>,
    #[serde(alias = "last_trade")]
    pub last_trade: Option<LastTrade>,
}

/// An open position inside a wallet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Position {
    pub qty: f64,
    pub unrealized_pnl: f64,
}

/// The most recent trade an agent made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastTrade {
    pub action: String,
    pub symbol: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub success: bool,
}

/// The request body of `POST /agents/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAgent {
    pub name: String,
    pub strategy: String,
    pub asset: String,
    pub capital: f64,
}
