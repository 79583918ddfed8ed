// In crates/render/src/markets.rs

use crate::format::{format_currency, format_percentage};
use crate::{Badge, Tone};
use core_types::ViewState;
use events::{MarketBoard, MarketRow};
use serde::Serialize;

pub const ALL_SECTORS: &str = "All";
pub const TOP_PICKS: usize = 3;

/// One entry of the scrolling ticker strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerItem {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub tone: Tone,
}

/// An asset highlighted as a top pick, with a conviction score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPick {
    pub symbol: String,
    pub name: String,
    pub change: String,
    /// `floor(70 + |change| * 5)`, in percent.
    pub conviction: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: String,
    pub change: String,
    pub tone: Tone,
    pub volume: String,
    pub chart: Vec<f64>,
}

impl From<&MarketRow> for TableRow {
    fn from(row: &MarketRow) -> Self {
        let tick = &row.asset.tick;
        Self {
            symbol: tick.symbol.clone(),
            name: row.asset.name.clone(),
            sector: row.asset.sector.clone(),
            price: format_currency(tick.price),
            change: format_percentage(tick.change),
            tone: Tone::of_change(tick.change),
            volume: row.volume.clone(),
            chart: row.chart.clone(),
        }
    }
}

/// The markets view for one sector tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketsView {
    pub badge: Badge,
    pub sectors: Vec<String>,
    pub selected: String,
    pub rows: Vec<TableRow>,
    pub top_picks: Vec<TopPick>,
}

impl MarketsView {
    /// `None` until the first poll resolves. After that there is always a
    /// board, live or demo.
    pub fn from_state(state: &ViewState<MarketBoard>, sector: &str) -> Option<Self> {
        let board = state.snapshot()?;
        let selected = if sector.is_empty() { ALL_SECTORS } else { sector };
        Some(Self {
            badge: board_badge(board),
            sectors: sectors(board),
            selected: selected.to_string(),
            rows: filter(board, selected).into_iter().map(TableRow::from).collect(),
            top_picks: top_picks(board),
        })
    }
}

/// `DEMO` while the board is the built-in dataset, `LIVE` otherwise.
pub fn board_badge(board: &MarketBoard) -> Badge {
    if board.demo { Badge::Demo } else { Badge::Live }
}

/// `All`, then each distinct sector in the order it first appears.
pub fn sectors(board: &MarketBoard) -> Vec<String> {
    let mut out = vec![ALL_SECTORS.to_string()];
    for row in &board.rows {
        if !out.contains(&row.asset.sector) {
            out.push(row.asset.sector.clone());
        }
    }
    out
}

pub fn filter<'a>(board: &'a MarketBoard, sector: &str) -> Vec<&'a MarketRow> {
    board
        .rows
        .iter()
        .filter(|r| sector == ALL_SECTORS || r.asset.sector == sector)
        .collect()
}

/// The three biggest gainers (or smallest losers) by 24h change.
pub fn top_picks(board: &MarketBoard) -> Vec<TopPick> {
    let mut rows: Vec<&MarketRow> = board.rows.iter().collect();
    rows.sort_by(|a, b| b.asset.tick.change.total_cmp(&a.asset.tick.change));
    rows.into_iter()
        .take(TOP_PICKS)
        .map(|r| TopPick {
            symbol: r.asset.tick.symbol.clone(),
            name: r.asset.name.clone(),
            change: format_percentage(r.asset.tick.change),
            conviction: (70.0 + r.asset.tick.change.abs() * 5.0).floor() as u32,
        })
        .collect()
}

pub fn ticker(board: &MarketBoard) -> Vec<TickerItem> {
    board
        .rows
        .iter()
        .map(|r| TickerItem {
            symbol: r.asset.tick.symbol.clone(),
            price: format_currency(r.asset.tick.price),
            change: format_percentage(r.asset.tick.change),
            tone: Tone::of_change(r.asset.tick.change),
        })
        .collect()
}
