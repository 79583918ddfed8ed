// In crates/render/src/lib.rs

//! View models for the terminal client: formatted strings, tone classes and
//! badges, computed from view snapshots. Nothing in here does I/O.

pub mod agents;
pub mod chat;
pub mod dashboard;
pub mod format;
pub mod markets;
pub mod tone;

pub use agents::AgentsView;
pub use chat::{Card, RenderedMessage, card, render_message};
pub use dashboard::DashboardView;
pub use format::{format_currency, format_number, format_percentage};
pub use markets::MarketsView;
pub use tone::Tone;

use core_types::Liveness;
use serde::Serialize;
use std::fmt;

/// The status badge in a view header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Badge {
    Loading,
    Live,
    Offline,
    /// Backend data is unavailable and the built-in dataset is shown.
    Demo,
}

impl Badge {
    pub fn for_liveness(liveness: Liveness) -> Self {
        match liveness {
            Liveness::Loading => Badge::Loading,
            Liveness::Live => Badge::Live,
            Liveness::Offline => Badge::Offline,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Badge::Live => Tone::Positive,
            Badge::Offline => Tone::Negative,
            Badge::Demo => Tone::Caution,
            Badge::Loading => Tone::Neutral,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Badge::Loading => "LOADING",
            Badge::Live => "LIVE",
            Badge::Offline => "OFFLINE",
            Badge::Demo => "DEMO",
        })
    }
}
