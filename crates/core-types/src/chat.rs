// In crates/core-types/src/chat.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// The raw response of `POST /chat/send`: `{text, type?, data?}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The structured part of an AI message, selected by the envelope's `type`.
///
/// Serializes back to the wire shape: `{"type": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChatPayload {
    #[default]
    Text,
    Analysis(AnalysisReport),
    AgentsReport(AgentsReport),
    Trades(TradeList),
    Rebalance(RebalancePlan),
    /// A `type` this client does not know. Only the text is shown.
    Unknown(String),
}

impl ChatPayload {
    /// Selects the payload variant for a `type` discriminant and its `data`.
    ///
    /// An absent type, `"text"`, or a known type without data all yield
    /// `Text`. An unrecognized type yields `Unknown`. The only error is a
    /// known type whose data does not match that type's shape.
    pub fn decode(kind: Option<&str>, data: Option<Value>) -> Result<Self, serde_json::Error> {
        let Some(kind) = kind else {
            return Ok(ChatPayload::Text);
        };
        let known = matches!(kind, "analysis" | "agents_report" | "trades" | "rebalance");
        if !known {
            return Ok(match kind {
                "text" => ChatPayload::Text,
                other => ChatPayload::Unknown(other.to_string()),
            });
        }
        let Some(data) = data.filter(|d| !d.is_null()) else {
            return Ok(ChatPayload::Text);
        };

        let payload = match kind {
            "analysis" => ChatPayload::Analysis(serde_json::from_value(data)?),
            "agents_report" => ChatPayload::AgentsReport(serde_json::from_value(data)?),
            "trades" => ChatPayload::Trades(serde_json::from_value(data)?),
            _ => ChatPayload::Rebalance(serde_json::from_value(data)?),
        };
        Ok(payload)
    }

    /// True when the payload carries a structured card, not just text.
    pub fn has_card(&self) -> bool {
        !matches!(self, ChatPayload::Text | ChatPayload::Unknown(_))
    }
}

/// A message in the chat history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub time: String,
    #[serde(flatten)]
    pub payload: ChatPayload,
}

// --- Payload shapes, one per known `type` ---

/// `type: "analysis"` — a trading signal for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub signal: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub indicators: Option<Indicators>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Technical indicators attached to an analysis. Any of them may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Indicators {
    pub rsi: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema12: Option<f64>,
    pub momentum: Option<f64>,
    pub volatility: Option<f64>,
    pub current_price: Option<f64>,
}

impl Indicators {
    pub fn is_empty(&self) -> bool {
        *self == Indicators::default()
    }
}

/// `type: "agents_report"` — what every agent is doing right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentsReport {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub total_pnl: f64,
    #[serde(default)]
    pub agents: Vec<AgentSummary>,
    #[serde(default)]
    pub recent_trades: Option<Vec<RecentTrade>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub name: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub positions: u32,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTrade {
    pub agent: String,
    pub action: String,
    pub symbol: String,
    #[serde(default)]
    pub value: f64,
}

/// `type: "trades"` — a list of executed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeList {
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub agent: String,
    pub action: String,
    pub symbol: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub value: f64,
}

/// `type: "rebalance"` — portfolio exposure and suggested adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub crypto_exposure: f64,
    #[serde(default)]
    pub stock_exposure: f64,
    #[serde(default)]
    pub suggestions: Option<Vec<Suggestion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub priority: String,
    pub message: String,
}

impl Suggestion {
    pub fn is_high_priority(&self) -> bool {
        self.priority == "high"
    }
}
