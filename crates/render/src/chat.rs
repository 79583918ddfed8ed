// In crates/render/src/chat.rs

//! Turns chat payloads into cards. Which card is chosen depends only on
//! the payload variant; text-only payloads produce no card at all.

use crate::Tone;
use crate::format::{format_currency, format_number};
use core_types::{
    AgentsReport, AnalysisReport, ChatMessage, ChatPayload, Indicators, RebalancePlan, Sender,
    TradeList,
};
use serde::Serialize;

/// Recent trades shown under an agents report.
pub const MAX_RECENT_TRADES: usize = 4;

/// A labelled value with its color class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl Cell {
    fn new(label: &'static str, value: String, tone: Tone) -> Self {
        Self { label, value, tone }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentLine {
    pub name: String,
    pub strategy: String,
    pub positions: u32,
    pub win_rate: String,
    pub pnl: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeLine {
    pub agent: String,
    pub action: String,
    pub action_tone: Tone,
    pub symbol: String,
    /// Empty for the short form used in agents reports.
    pub qty: String,
    pub price: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionLine {
    pub tone: Tone,
    pub message: String,
}

/// The structured section of an AI message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum Card {
    Analysis {
        symbol: String,
        signal: String,
        signal_tone: Tone,
        confidence: String,
        indicators: Vec<Cell>,
        reason: Option<String>,
    },
    AgentsReport {
        total_value: String,
        total_pnl: Cell,
        agents: Vec<AgentLine>,
        recent_trades: Vec<TradeLine>,
    },
    Trades {
        rows: Vec<TradeLine>,
    },
    Rebalance {
        risk_score: String,
        crypto_exposure: String,
        stock_exposure: String,
        suggestions: Vec<SuggestionLine>,
    },
}

/// A chat message ready for display: its text, plus a card when the
/// payload has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMessage {
    pub id: u64,
    pub sender: Sender,
    pub time: String,
    pub text: String,
    pub card: Option<Card>,
}

pub fn render_message(message: &ChatMessage) -> RenderedMessage {
    RenderedMessage {
        id: message.id,
        sender: message.sender,
        time: message.time.clone(),
        text: message.text.clone(),
        card: card(&message.payload),
    }
}

/// Selects the card layout for a payload. `Text` and unrecognized types
/// have none.
pub fn card(payload: &ChatPayload) -> Option<Card> {
    match payload {
        ChatPayload::Text | ChatPayload::Unknown(_) => None,
        ChatPayload::Analysis(report) => Some(analysis_card(report)),
        ChatPayload::AgentsReport(report) => Some(agents_card(report)),
        ChatPayload::Trades(list) => Some(trades_card(list)),
        ChatPayload::Rebalance(plan) => Some(rebalance_card(plan)),
    }
}

fn analysis_card(report: &AnalysisReport) -> Card {
    Card::Analysis {
        symbol: report.symbol.clone(),
        signal: report.signal.clone(),
        signal_tone: Tone::of_signal(&report.signal),
        confidence: format!("{}%", format_number(report.confidence)),
        indicators: report.indicators.as_ref().map(indicator_cells).unwrap_or_default(),
        reason: report.reason.clone(),
    }
}

/// One cell per indicator that is present, in a fixed order.
fn indicator_cells(ind: &Indicators) -> Vec<Cell> {
    let mut cells = Vec::new();
    if let Some(rsi) = ind.rsi {
        let tone = if rsi < 30.0 {
            Tone::Positive
        } else if rsi > 70.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        };
        cells.push(Cell::new("RSI", format_number(rsi), tone));
    }
    if let Some(sma20) = ind.sma20 {
        cells.push(Cell::new("SMA20", format_currency(sma20), Tone::Neutral));
    }
    if let Some(momentum) = ind.momentum {
        let tone = if momentum > 0.0 { Tone::Positive } else { Tone::Negative };
        cells.push(Cell::new("Momentum", format!("{}%", format_number(momentum)), tone));
    }
    if let Some(volatility) = ind.volatility {
        cells.push(Cell::new("Volatility", format!("{}%", format_number(volatility)), Tone::Neutral));
    }
    if let Some(price) = ind.current_price {
        cells.push(Cell::new("Price", format_currency(price), Tone::Neutral));
    }
    if let Some(ema12) = ind.ema12 {
        cells.push(Cell::new("EMA12", format_currency(ema12), Tone::Neutral));
    }
    cells
}

fn signed_currency(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}", format_currency(value))
}

fn action_tone(action: &str) -> Tone {
    if action == "BUY" { Tone::Positive } else { Tone::Negative }
}

fn agents_card(report: &AgentsReport) -> Card {
    let agents = report
        .agents
        .iter()
        .map(|a| AgentLine {
            name: a.name.clone(),
            strategy: a.strategy.clone(),
            positions: a.positions,
            win_rate: format!("{}%", format_number(a.win_rate)),
            pnl: Cell::new("PnL", signed_currency(a.pnl), Tone::of_change(a.pnl)),
        })
        .collect();

    let recent_trades = report
        .recent_trades
        .iter()
        .flatten()
        .take(MAX_RECENT_TRADES)
        .map(|t| TradeLine {
            agent: t.agent.clone(),
            action: t.action.clone(),
            action_tone: action_tone(&t.action),
            symbol: t.symbol.clone(),
            qty: String::new(),
            price: String::new(),
            value: format_currency(t.value),
        })
        .collect();

    Card::AgentsReport {
        total_value: format_currency(report.total_value),
        total_pnl: Cell::new("Total PnL", format_currency(report.total_pnl), Tone::of_change(report.total_pnl)),
        agents,
        recent_trades,
    }
}

fn trades_card(list: &TradeList) -> Card {
    let rows = list
        .trades
        .iter()
        .map(|t| TradeLine {
            agent: t.agent.clone(),
            action: t.action.clone(),
            action_tone: action_tone(&t.action),
            symbol: t.symbol.clone(),
            qty: format_number(t.qty),
            price: format_currency(t.price),
            value: format_currency(t.value),
        })
        .collect();
    Card::Trades { rows }
}

fn rebalance_card(plan: &RebalancePlan) -> Card {
    let suggestions = plan
        .suggestions
        .iter()
        .flatten()
        .map(|s| SuggestionLine {
            tone: if s.is_high_priority() { Tone::Negative } else { Tone::Caution },
            message: s.message.clone(),
        })
        .collect();

    Card::Rebalance {
        risk_score: format_number(plan.risk_score),
        crypto_exposure: format!("{}%", format_number(plan.crypto_exposure)),
        stock_exposure: format!("{}%", format_number(plan.stock_exposure)),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded(kind: &str, data: serde_json::Value) -> ChatPayload {
        ChatPayload::decode(Some(kind), Some(data)).unwrap()
    }

    fn signal_tone(signal: &str) -> Tone {
        match card(&decoded("analysis", json!({"symbol": "BTC", "signal": signal, "confidence": 70}))) {
            Some(Card::Analysis { signal_tone, .. }) => signal_tone,
            other => panic!("expected an analysis card, got {other:?}"),
        }
    }

    #[test]
    fn analysis_signal_color_follows_keywords() {
        assert_eq!(signal_tone("STRONG BUY"), Tone::Positive);
        assert_eq!(signal_tone("SELL"), Tone::Negative);
        assert_eq!(signal_tone("HOLD"), Tone::Neutral);
        assert_eq!(signal_tone("wait and see"), Tone::Neutral);
    }

    #[test]
    fn text_and_unknown_types_have_no_card() {
        assert_eq!(card(&ChatPayload::Text), None);
        assert_eq!(card(&ChatPayload::decode(None, None).unwrap()), None);
        assert_eq!(card(&ChatPayload::decode(Some("forecast"), Some(json!({"x": 1}))).unwrap()), None);
        assert_eq!(card(&ChatPayload::decode(Some("trades"), None).unwrap()), None);
    }

    #[test]
    fn only_present_indicators_become_cells() {
        let payload = decoded(
            "analysis",
            json!({"symbol": "ETH", "signal": "BUY", "confidence": 64.5,
                   "indicators": {"rsi": 25.0, "momentum": -1.2, "currentPrice": 3450.2}}),
        );
        let Some(Card::Analysis { indicators, confidence, .. }) = card(&payload) else {
            panic!("expected an analysis card");
        };

        let labels: Vec<&str> = indicators.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["RSI", "Momentum", "Price"]);
        assert_eq!(indicators[0].tone, Tone::Positive);
        assert_eq!(indicators[1].tone, Tone::Negative);
        assert_eq!(indicators[2].value, "$3,450.20");
        assert_eq!(confidence, "64.5%");
    }

    #[test]
    fn agents_report_caps_recent_trades() {
        let trades: Vec<_> = (0..6)
            .map(|i| json!({"agent": "Alpha", "action": if i % 2 == 0 { "BUY" } else { "SELL" }, "symbol": "BTC", "value": 100.0}))
            .collect();
        let payload = decoded(
            "agents_report",
            json!({"totalValue": 82500.0, "totalPnl": -120.5,
                   "agents": [{"name": "Alpha", "strategy": "Trend", "positions": 2, "winRate": 64.3, "pnl": 1340.5}],
                   "recentTrades": trades}),
        );
        let Some(Card::AgentsReport { total_pnl, agents, recent_trades, .. }) = card(&payload) else {
            panic!("expected an agents report card");
        };

        assert_eq!(total_pnl.tone, Tone::Negative);
        assert_eq!(agents[0].pnl.value, "+$1,340.50");
        assert_eq!(recent_trades.len(), MAX_RECENT_TRADES);
        assert_eq!(recent_trades[1].action_tone, Tone::Negative);
    }

    #[test]
    fn high_priority_suggestions_are_negative() {
        let payload = decoded(
            "rebalance",
            json!({"riskScore": 62, "cryptoExposure": 58.5, "stockExposure": 33,
                   "suggestions": [{"priority": "high", "message": "Trim BTC"},
                                   {"priority": "medium", "message": "Add stocks"}]}),
        );
        let Some(Card::Rebalance { suggestions, crypto_exposure, .. }) = card(&payload) else {
            panic!("expected a rebalance card");
        };

        assert_eq!(suggestions[0].tone, Tone::Negative);
        assert_eq!(suggestions[1].tone, Tone::Caution);
        assert_eq!(crypto_exposure, "58.5%");
    }

    #[test]
    fn rendered_message_keeps_text_alongside_card() {
        let message = ChatMessage {
            id: 4,
            sender: Sender::Ai,
            text: "Recent trades across all agents.".to_string(),
            time: "09:41".to_string(),
            payload: decoded("trades", json!({"trades": [
                {"agent": "Alpha", "action": "BUY", "symbol": "BTC", "qty": 0.12, "price": 64230.5, "value": 7707.66}
            ]})),
        };

        let rendered = render_message(&message);

        assert_eq!(rendered.text, message.text);
        let Some(Card::Trades { rows }) = rendered.card else {
            panic!("expected a trades card");
        };
        assert_eq!(rows[0].qty, "0.12");
        assert_eq!(rows[0].value, "$7,707.66");
    }
}
