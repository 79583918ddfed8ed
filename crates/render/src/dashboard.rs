// In crates/render/src/dashboard.rs

use crate::format::{format_currency, format_number, format_percentage};
use crate::{Badge, Tone};
use core_types::{DashboardStats, ViewState};
use serde::Serialize;

pub const LOADING: &str = "Loading...";

/// A headline number with an optional trend line under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub trend: Option<String>,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRow {
    pub name: String,
    pub value: String,
    /// Share of the allocation total, e.g. `"42.5%"`.
    pub share: String,
}

/// First and last value of the portfolio history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub points: usize,
    pub first: String,
    pub last: String,
    pub change: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPanel {
    pub cards: Vec<MetricCard>,
    pub allocation: Vec<AllocationRow>,
    pub sentiment: String,
    pub history: Option<HistorySummary>,
    pub total_trades: String,
}

/// The dashboard: a badge plus either the panel or the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub badge: Badge,
    pub panel: Option<DashboardPanel>,
}

impl DashboardView {
    pub fn from_state(state: &ViewState<DashboardStats>) -> Self {
        Self {
            badge: Badge::for_liveness(state.liveness()),
            panel: state.snapshot().map(panel),
        }
    }
}

pub fn panel(stats: &DashboardStats) -> DashboardPanel {
    let cards = vec![
        MetricCard {
            title: "Total Portfolio Value",
            value: format_currency(stats.portfolio_value),
            trend: None,
            tone: Tone::Neutral,
        },
        MetricCard {
            title: "24h Profit / Loss",
            value: format_currency(stats.daily_pnl),
            trend: Some(format_percentage(stats.daily_pnl_percentage)),
            tone: Tone::of_change(stats.daily_pnl),
        },
        MetricCard {
            title: "Active Agents",
            value: stats.active_agents.to_string(),
            trend: None,
            tone: Tone::Neutral,
        },
        MetricCard {
            title: "AI Win Rate",
            value: format!("{}%", stats.win_rate),
            trend: None,
            tone: Tone::Neutral,
        },
    ];

    let total: f64 = stats.asset_allocation.iter().map(|s| s.value).sum();
    let allocation = stats
        .asset_allocation
        .iter()
        .map(|slice| AllocationRow {
            name: slice.name.clone(),
            value: format_currency(slice.value),
            share: if total > 0.0 {
                format!("{:.1}%", slice.value / total * 100.0)
            } else {
                "0.0%".to_string()
            },
        })
        .collect();

    let history = match (stats.portfolio_history.first(), stats.portfolio_history.last()) {
        (Some(first), Some(last)) => {
            let change = if first.value != 0.0 { (last.value - first.value) / first.value * 100.0 } else { 0.0 };
            Some(HistorySummary {
                points: stats.portfolio_history.len(),
                first: format_currency(first.value),
                last: format_currency(last.value),
                change: format_percentage(change),
                tone: Tone::of_change(change),
            })
        }
        _ => None,
    };

    DashboardPanel {
        cards,
        allocation,
        sentiment: format!("{} ({})", stats.sentiment.score, stats.sentiment.label),
        history,
        total_trades: format_number(stats.total_trades as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AllocationSlice, HistoryPoint};

    fn stats() -> DashboardStats {
        DashboardStats {
            portfolio_value: 82_450.75,
            daily_pnl: -1_200.0,
            daily_pnl_percentage: -1.43,
            active_agents: 3,
            win_rate: 61.2,
            total_trades: 1_532,
            portfolio_history: vec![
                HistoryPoint { date: "Day 1".to_string(), value: 80_000.0 },
                HistoryPoint { date: "Today".to_string(), value: 82_000.0 },
            ],
            asset_allocation: vec![
                AllocationSlice { name: "Positions".to_string(), value: 60_000.0, color: String::new() },
                AllocationSlice { name: "Cash".to_string(), value: 20_000.0, color: String::new() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn metric_cards_format_their_values() {
        let p = panel(&stats());

        assert_eq!(p.cards[0].value, "$82,450.75");
        assert_eq!(p.cards[1].trend.as_deref(), Some("-1.43%"));
        assert_eq!(p.cards[1].tone, Tone::Negative);
        assert_eq!(p.cards[3].value, "61.2%");
        assert_eq!(p.total_trades, "1,532");
        assert_eq!(p.sentiment, "50 (Neutral)");
    }

    #[test]
    fn allocation_shares_and_history_change() {
        let p = panel(&stats());

        assert_eq!(p.allocation[0].share, "75.0%");
        let history = p.history.unwrap();
        assert_eq!(history.change, "+2.50%");
        assert_eq!(history.points, 2);
    }

    #[test]
    fn offline_keeps_the_last_panel() {
        let mut state = ViewState::new();
        assert_eq!(DashboardView::from_state(&state).panel, None);

        state.succeed(stats());
        state.fail("HTTP 500 from /dashboard/stats");
        let view = DashboardView::from_state(&state);

        assert_eq!(view.badge, Badge::Offline);
        assert_eq!(view.panel.map(|p| p.cards[0].value.clone()), Some("$82,450.75".to_string()));
    }
}
