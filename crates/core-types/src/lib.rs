// In crates/core-types/src/lib.rs

pub mod agent;
pub mod chat;
pub mod dashboard;
pub mod market;
pub mod view;

// Re-export the most important types for easy access from other crates.
pub use agent::{Agent, AgentStatus, LastTrade, NewAgent, Position, Wallet};
pub use chat::{
    AgentSummary, AgentsReport, AnalysisReport, ChatEnvelope, ChatMessage, ChatPayload,
    Indicators, RebalancePlan, RecentTrade, Sender, Suggestion, TradeList, TradeRecord,
};
pub use dashboard::{AllocationSlice, DashboardStats, HistoryPoint, Sentiment};
pub use market::{MarketAsset, PriceTick, Volume};
pub use view::{Liveness, ViewState};
