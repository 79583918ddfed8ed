// In crates/core-types/src/dashboard.rs

use serde::{Deserialize, Serialize};

/// The aggregated stats returned by `GET /dashboard/stats`.
///
/// Each poll replaces the whole snapshot; nothing is merged client-side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub portfolio_value: f64,
    #[serde(rename = "dailyPnL")]
    pub daily_pnl: f64,
    #[serde(rename = "dailyPnLPercentage")]
    pub daily_pnl_percentage: f64,
    pub active_agents: u32,
    pub win_rate: f64,
    pub total_trades: u64,
    pub portfolio_history: Vec<HistoryPoint>,
    pub asset_allocation: Vec<AllocationSlice>,
    pub sentiment: Sentiment,
}

/// One point of the portfolio value chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub value: f64,
}

/// One slice of the asset allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub color: String,
}

/// Market sentiment as a 0..=100 score plus a label ("Greed", "Fear", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub label: String,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            score: 50.0,
            label: "Neutral".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_deserialize_from_backend_payload() {
        let json = r##"{
            "portfolioValue": 81234.5,
            "dailyPnL": 1234.5,
            "dailyPnLPercentage": 1.6,
            "activeAgents": 4,
            "winRate": 62.5,
            "totalTrades": 48,
            "assetAllocation": [{"name":"BTC","value":30000,"color":"#f59e0b"}],
            "sentiment": {"score": 71, "label": "Greed"},
            "portfolioHistory": [{"date":"Jan 01","value":80000},{"date":"Today","value":81234.5}]
        }"##;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.daily_pnl, 1234.5);
        assert_eq!(stats.active_agents, 4);
        assert_eq!(stats.sentiment.label, "Greed");
        assert_eq!(stats.portfolio_history.len(), 2);
    }

    #[test]
    fn fractional_sentiment_score_decodes() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"sentiment": {"score": 62.5, "label": "Greed"}}"#).unwrap();
        assert_eq!(stats.sentiment.score, 62.5);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let stats: DashboardStats = serde_json::from_str(r#"{"portfolioValue": 10}"#).unwrap();
        assert_eq!(stats.portfolio_value, 10.0);
        assert!(stats.asset_allocation.is_empty());
        assert_eq!(stats.sentiment.score, 50.0);
    }
}
