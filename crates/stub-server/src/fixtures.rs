// In crates/stub-server/src/fixtures.rs

//! Fixed data served by the stub. Nothing here changes over time except
//! agent status, which the toggle route flips.

use core_types::{
    Agent, AgentStatus, AllocationSlice, DashboardStats, HistoryPoint, MarketAsset, Position,
    PriceTick, Sentiment, Volume, Wallet,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub fn agents() -> Vec<Agent> {
    vec![
        agent(1, "Alpha Momentum", "Trend Following", "Crypto (BTC/ETH)", 25_000.0,
            wallet(26_340.5, 1_340.5, 14, 9, 15_100.0, &[("BTC", 0.12, 410.2), ("ETH", 1.6, -35.8)])),
        agent(2, "Tech Breakout", "Volatility Breakout", "Stocks (AAPL/NVDA/MSFT)", 30_000.0,
            wallet(30_812.0, 812.0, 9, 5, 21_400.0, &[("NVDA", 8.0, 120.4)])),
        agent(3, "Stable Yield", "Mean Reversion", "Crypto (BTC/ETH)", 15_000.0,
            wallet(14_760.3, -239.7, 11, 4, 14_760.3, &[])),
        agent(4, "Altcoin Scalper", "High Frequency", "Crypto (SOL/AVAX/MATIC)", 10_000.0,
            wallet(10_455.9, 455.9, 31, 19, 7_520.0, &[("SOL", 20.0, 62.0)])),
    ]
}

fn agent(id: u64, name: &str, strategy: &str, asset: &str, capital: f64, wallet: Wallet) -> Agent {
    Agent {
        id,
        name: name.to_string(),
        strategy: strategy.to_string(),
        asset: asset.to_string(),
        status: AgentStatus::Active,
        runtime: format!("{}d {}h", id * 3, id + 2),
        capital,
        wallet: Some(wallet),
    }
}

fn wallet(total: f64, pnl: f64, trades: u64, wins: u64, cash: f64, positions: &[(&str, f64, f64)]) -> Wallet {
    let initial = total - pnl;
    Wallet {
        total_value: total,
        pnl,
        pnl_percentage: (pnl / initial * 10_000.0).round() / 100.0,
        win_rate: (wins as f64 / trades.max(1) as f64 * 1000.0).round() / 10.0,
        cash,
        trades_count: trades,
        wins,
        losses: trades - wins,
        positions: positions
            .iter()
            .map(|(sym, qty, upnl)| (sym.to_string(), Position { qty: *qty, unrealized_pnl: *upnl }))
            .collect::<BTreeMap<_, _>>(),
        last_trade: None,
    }
}

/// The wallet as the simulator stores it, which is what the detail route
/// returns: snake_case keys and no derived win rate.
pub fn raw_wallet(agent: &Agent) -> Value {
    let Some(w) = &agent.wallet else { return json!({}) };
    let positions: serde_json::Map<String, Value> = w
        .positions
        .iter()
        .map(|(sym, p)| (sym.clone(), json!({ "qty": p.qty, "avgEntry": 0.0, "currentPrice": 0.0 })))
        .collect();
    json!({
        "initial_capital": agent.capital,
        "cash": w.cash,
        "positions": positions,
        "total_value": w.total_value,
        "pnl": w.pnl,
        "pnl_pct": w.pnl_percentage,
        "trades_count": w.trades_count,
        "wins": w.wins,
        "losses": w.losses,
        "strategy": agent.strategy,
        "asset_focus": agent.asset,
        "last_trade": w.last_trade,
    })
}

pub fn market_assets() -> Vec<MarketAsset> {
    [
        ("BTC", "Bitcoin", 64_230.50, 2.4, "Crypto", 1_200_000_000.0),
        ("ETH", "Ethereum", 3_450.20, 1.8, "Crypto", 850_000_000.0),
        ("SOL", "Solana", 145.60, -1.2, "Crypto", 320_000_000.0),
        ("AAPL", "Apple Inc.", 178.40, -0.5, "Stocks", 45_000_000.0),
        ("NVDA", "Nvidia Corp.", 890.20, 3.2, "Stocks", 62_000_000.0),
        ("MSFT", "Microsoft", 410.30, 0.8, "Stocks", 22_000_000.0),
    ]
    .into_iter()
    .map(|(symbol, name, price, change, sector, volume)| MarketAsset {
        tick: PriceTick { symbol: symbol.to_string(), price, change },
        name: name.to_string(),
        sector: sector.to_string(),
        volume: Some(Volume::Amount(volume)),
    })
    .collect()
}

/// Aggregates the agent wallets the same way the backend's stats route does.
pub fn dashboard_stats(agents: &[Agent]) -> DashboardStats {
    let wallets: Vec<&Wallet> = agents.iter().filter_map(|a| a.wallet.as_ref()).collect();
    let total_value: f64 = wallets.iter().map(|w| w.total_value).sum();
    let total_pnl: f64 = wallets.iter().map(|w| w.pnl).sum();
    let initial = total_value - total_pnl;
    let trades: u64 = wallets.iter().map(|w| w.trades_count).sum();
    let wins: u64 = wallets.iter().map(|w| w.wins).sum();
    let cash: f64 = wallets.iter().map(|w| w.cash).sum();

    let mut allocation = vec![AllocationSlice {
        name: "Positions".to_string(),
        value: round2(total_value - cash),
        color: "#8b5cf6".to_string(),
    }];
    allocation.push(AllocationSlice { name: "Cash".to_string(), value: round2(cash), color: "#94a3b8".to_string() });

    // A straight line from 92% of today's value, like the backend's synthetic curve minus the noise.
    let start = total_value * 0.92;
    let mut history: Vec<HistoryPoint> = (0..30)
        .map(|i| HistoryPoint {
            date: format!("Day {}", i + 1),
            value: round2(start + (total_value - start) * i as f64 / 30.0),
        })
        .collect();
    history.push(HistoryPoint { date: "Today".to_string(), value: round2(total_value) });

    DashboardStats {
        portfolio_value: round2(total_value),
        daily_pnl: round2(total_pnl),
        daily_pnl_percentage: if initial > 0.0 { round2(total_pnl / initial * 100.0) } else { 0.0 },
        active_agents: agents.iter().filter(|a| a.is_active()).count() as u32,
        win_rate: (wins as f64 / trades.max(1) as f64 * 1000.0).round() / 10.0,
        total_trades: trades,
        portfolio_history: history,
        asset_allocation: allocation,
        sentiment: Sentiment { score: 64.0, label: "Greed".to_string() },
    }
}

pub fn holdings() -> Vec<Value> {
    vec![
        json!({"name": "BTC", "value": 45000.0, "sector": "Crypto"}),
        json!({"name": "AAPL", "value": 32000.0, "sector": "Stocks"}),
        json!({"name": "ETH", "value": 28000.0, "sector": "Crypto"}),
        json!({"name": "NVDA", "value": 18000.0, "sector": "Stocks"}),
        json!({"name": "SOL", "value": 12000.0, "sector": "Crypto"}),
        json!({"name": "Cash", "value": 12832.5, "sector": "Cash"}),
    ]
}

pub fn analysis(symbol: &str) -> Option<Value> {
    let asset = market_assets().into_iter().find(|a| a.tick.symbol.eq_ignore_ascii_case(symbol))?;
    let price = asset.tick.price;
    let (signal, confidence) = if asset.tick.change > 2.0 {
        ("STRONG_BUY", 82.5)
    } else if asset.tick.change > 0.0 {
        ("BUY", 64.0)
    } else {
        ("SELL", 58.0)
    };
    Some(json!({
        "symbol": asset.tick.symbol,
        "signal": signal,
        "confidence": confidence,
        "reason": format!("24h change of {:.1}%", asset.tick.change),
        "indicators": {
            "rsi": 48.2,
            "sma20": round2(price * 0.98),
            "sma50": round2(price * 0.95),
            "ema12": round2(price * 0.99),
            "momentum": asset.tick.change,
            "volatility": 2.1,
            "currentPrice": price
        }
    }))
}

pub fn portfolio_analysis() -> Value {
    json!({
        "riskScore": 62,
        "cryptoExposure": 58.5,
        "stockExposure": 33.0,
        "allocations": [
            {"asset": "BTC", "percentage": 30.4},
            {"asset": "AAPL", "percentage": 21.6},
            {"asset": "ETH", "percentage": 18.9}
        ],
        "suggestions": [
            {"type": "REDUCE", "asset": "BTC", "priority": "high",
             "message": "BTC represents 30.4% of portfolio, consider reducing to below 30% for better diversification."},
            {"type": "REBALANCE", "asset": "Portfolio", "priority": "medium",
             "message": "Crypto exposure at 58% is high. Consider adding more stocks for stability."}
        ]
    })
}

/// A canned reply chosen by keyword. The stub does not understand language.
pub fn chat_reply(message: &str, agents: &[Agent]) -> Value {
    let lower = message.to_lowercase();
    if lower.contains("agent") || lower.contains("doing") {
        let total_value: f64 = agents.iter().map(Agent::current_value).sum();
        let total_pnl: f64 = agents.iter().map(Agent::pnl).sum();
        let rows: Vec<Value> = agents
            .iter()
            .map(|a| {
                let w = a.wallet.clone().unwrap_or_default();
                json!({"name": a.name, "strategy": a.strategy, "positions": w.positions.len(),
                       "winRate": w.win_rate, "pnl": w.pnl})
            })
            .collect();
        json!({
            "type": "agents_report",
            "text": "Here's what your agents are doing right now.",
            "data": {
                "totalValue": round2(total_value),
                "totalPnl": round2(total_pnl),
                "agents": rows,
                "recentTrades": [
                    {"agent": "Alpha Momentum", "action": "BUY", "symbol": "BTC", "value": 7707.66},
                    {"agent": "Altcoin Scalper", "action": "SELL", "symbol": "SOL", "value": 1456.0}
                ]
            }
        })
    } else if lower.contains("trade") {
        json!({
            "type": "trades",
            "text": "Recent trades across all agents.",
            "data": {"trades": [
                {"agent": "Alpha Momentum", "action": "BUY", "symbol": "BTC", "qty": 0.12, "price": 64230.5, "value": 7707.66},
                {"agent": "Altcoin Scalper", "action": "SELL", "symbol": "SOL", "qty": 10.0, "price": 145.6, "value": 1456.0}
            ]}
        })
    } else if lower.contains("rebalance") || lower.contains("portfolio") {
        json!({
            "type": "rebalance",
            "text": "I've analyzed your portfolio. Here are my findings.",
            "data": portfolio_analysis()
        })
    } else if let Some(data) = ["btc", "eth", "sol", "aapl", "nvda", "msft"]
        .iter()
        .find(|s| lower.split(|c: char| !c.is_alphanumeric()).any(|w| w == **s))
        .and_then(|s| analysis(s))
    {
        json!({
            "type": "analysis",
            "text": "Here's my technical analysis.",
            "data": data
        })
    } else {
        json!({
            "type": "text",
            "text": "Try asking 'What are my agents doing?', 'Show recent trades', 'Rebalance my portfolio' or 'Analyze BTC'."
        })
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
