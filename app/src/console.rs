// In app/src/console.rs

//! Terminal output for the view models.

use colored::*;
use core_types::Sender;
use render::agents::{AgentCard, AgentTotals};
use render::chat::{Cell, TradeLine};
use render::dashboard::{DashboardPanel, LOADING};
use render::markets::TickerItem;
use render::{AgentsView, Badge, Card, DashboardView, MarketsView, RenderedMessage, Tone};

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.bright_green(),
        Tone::Negative => text.bright_red(),
        Tone::Caution => text.yellow(),
        Tone::Neutral => text.normal(),
    }
}

fn badge(badge: Badge) -> ColoredString {
    paint(&format!("[{badge}]"), badge.tone()).bold()
}

/// Print a section header with the view's status badge.
pub fn section(title: &str, status: Badge) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {} {}", title.bright_white().bold(), badge(status));
    println!("{}", "━".repeat(60).bright_black());
}

fn labeled(label: &str, value: ColoredString) {
    println!("  {}: {}", label.bright_white(), value);
}

fn placeholder(text: &str) {
    println!("  {}", text.bright_black());
}

pub fn dashboard(view: &DashboardView) {
    section("Dashboard", view.badge);
    let Some(panel) = &view.panel else {
        placeholder(LOADING);
        return;
    };
    dashboard_panel(panel);
}

fn dashboard_panel(panel: &DashboardPanel) {
    for card in &panel.cards {
        let value = paint(&card.value, card.tone);
        match &card.trend {
            Some(trend) => println!("  {}: {} ({})", card.title.bright_white(), value, paint(trend, card.tone)),
            None => labeled(card.title, value.bright_cyan()),
        }
    }
    labeled("Total Trades", panel.total_trades.bright_cyan());
    labeled("Sentiment", panel.sentiment.bright_cyan());
    if let Some(h) = &panel.history {
        println!(
            "  {}: {} → {} {} over {} points",
            "History".bright_white(),
            h.first,
            h.last,
            paint(&h.change, h.tone),
            h.points
        );
    }
    if !panel.allocation.is_empty() {
        println!("  {}", "Allocation".bright_white());
        for row in &panel.allocation {
            println!("      {:<12} {:>14} {:>7}", row.name, row.value, row.share.bright_cyan());
        }
    }
}

pub fn agents(view: &AgentsView) {
    match view {
        AgentsView::Loading { badge } => {
            section("Agents", *badge);
            placeholder(render::agents::LOADING_AGENTS);
        }
        AgentsView::Ready { badge, totals, cards } => {
            section("Agents", *badge);
            agent_totals(totals);
            for card in cards {
                agent_card(card);
            }
        }
    }
}

fn agent_totals(t: &AgentTotals) {
    labeled("Total AUM", t.aum.bright_cyan());
    labeled("Total PnL", paint(&t.pnl, t.pnl_tone));
    labeled("Total Trades", t.trades.to_string().bright_cyan());
    labeled("Active", t.active.bright_cyan());
}

fn agent_card(c: &AgentCard) {
    println!();
    println!(
        "  {} {} {} {}",
        format!("#{}", c.id).bright_black(),
        c.name.bright_white().bold(),
        paint(&c.status, c.status_tone),
        format!("({} · {} · {})", c.strategy, c.asset, c.runtime).bright_black()
    );
    println!(
        "      value {}  pnl {} ({})  win rate {}",
        c.value.bright_cyan(),
        paint(&c.pnl, c.pnl_tone),
        paint(&c.pnl_percentage, c.pnl_tone),
        c.win_rate
    );
    println!("      cash {}  {}  [{}]", c.cash, c.record, c.action.bright_blue());
    for p in &c.positions {
        println!("      {:<6} {:>12} {}", p.symbol, p.qty, paint(&p.unrealized_pnl, p.tone));
    }
}

pub fn markets(view: &MarketsView, ticker: &[TickerItem]) {
    section("Markets", view.badge);
    let strip: Vec<String> = ticker
        .iter()
        .map(|t| format!("{} {} {}", t.symbol.bold(), t.price, paint(&t.change, t.tone)))
        .collect();
    println!("  {}", strip.join("  |  "));

    let tabs: Vec<String> = view
        .sectors
        .iter()
        .map(|s| if *s == view.selected { format!("[{s}]").bright_white().bold().to_string() } else { s.clone() })
        .collect();
    println!("  {}", tabs.join(" "));

    for row in &view.rows {
        println!(
            "  {:<6} {:<16} {:>14} {:>9} {:>7}  {}",
            row.symbol.bold(),
            row.name,
            row.price,
            paint(&row.change, row.tone),
            row.volume,
            paint(&sparkline(&row.chart), row.tone)
        );
    }

    if !view.top_picks.is_empty() {
        println!("  {}", "Top picks".bright_white());
        for pick in &view.top_picks {
            println!("      {:<6} {:>9}  conviction {}%", pick.symbol.bold(), pick.change, pick.conviction);
        }
    }
}

/// Draws a series as a row of block characters.
fn sparkline(series: &[f64]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);
    series
        .iter()
        .map(|v| BARS[((((v - min) / span) * 7.0).round() as usize).min(BARS.len() - 1)])
        .collect()
}

pub fn chat_message(message: &RenderedMessage) {
    let who = match message.sender {
        Sender::User => "you".bright_blue().bold(),
        Sender::Ai => "ai".bright_magenta().bold(),
    };
    println!("{} {} {}", message.time.bright_black(), who, message.text);
    if let Some(card) = &message.card {
        chat_card(card);
    }
}

fn cell(c: &Cell) -> String {
    format!("{} {}", c.label.bright_black(), paint(&c.value, c.tone))
}

fn trade_line(t: &TradeLine) {
    let mut line = format!("      {} {} {}", t.agent, paint(&t.action, t.action_tone).bold(), t.symbol);
    if !t.qty.is_empty() {
        line.push_str(&format!(" {} @ {}", t.qty, t.price));
    }
    println!("{line}  {}", t.value.bright_cyan());
}

fn chat_card(card: &Card) {
    match card {
        Card::Analysis { symbol, signal, signal_tone, confidence, indicators, reason } => {
            println!("      {} {} confidence {}", symbol.bold(), paint(signal, *signal_tone).bold(), confidence.bright_cyan());
            if !indicators.is_empty() {
                let cells: Vec<String> = indicators.iter().map(cell).collect();
                println!("      {}", cells.join("  "));
            }
            if let Some(reason) = reason {
                println!("      {}", reason.bright_black());
            }
        }
        Card::AgentsReport { total_value, total_pnl, agents, recent_trades } => {
            println!("      value {}  {}", total_value.bright_cyan(), cell(total_pnl));
            for a in agents {
                println!(
                    "      {:<18} {:<20} {} pos  {} win  {}",
                    a.name, a.strategy, a.positions, a.win_rate, paint(&a.pnl.value, a.pnl.tone)
                );
            }
            recent_trades.iter().for_each(trade_line);
        }
        Card::Trades { rows } => rows.iter().for_each(trade_line),
        Card::Rebalance { risk_score, crypto_exposure, stock_exposure, suggestions } => {
            println!(
                "      risk {}  crypto {}  stocks {}",
                risk_score.bright_cyan(),
                crypto_exposure.bright_cyan(),
                stock_exposure.bright_cyan()
            );
            for s in suggestions {
                println!("      {} {}", paint("●", s.tone), s.message);
            }
        }
    }
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}
