// In crates/render/src/tone.rs

use serde::Serialize;
use std::fmt;

/// The color class a value is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Caution,
}

impl Tone {
    /// Positive at or above zero, negative below.
    pub fn of_change(value: f64) -> Self {
        if value >= 0.0 { Tone::Positive } else { Tone::Negative }
    }

    /// Buy-side signals are positive, sell-side negative, anything else
    /// (hold, neutral, empty) is neutral. Matching is by case-sensitive
    /// substring, so `"STRONG BUY"` and `"STRONG_SELL"` count.
    pub fn of_signal(signal: &str) -> Self {
        if signal.contains("BUY") {
            Tone::Positive
        } else if signal.contains("SELL") {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Neutral => "neutral",
            Tone::Caution => "caution",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_resolve_by_keyword() {
        assert_eq!(Tone::of_signal("STRONG BUY"), Tone::Positive);
        assert_eq!(Tone::of_signal("BUY"), Tone::Positive);
        assert_eq!(Tone::of_signal("SELL"), Tone::Negative);
        assert_eq!(Tone::of_signal("STRONG_SELL"), Tone::Negative);
        assert_eq!(Tone::of_signal("HOLD"), Tone::Neutral);
        assert_eq!(Tone::of_signal(""), Tone::Neutral);
        assert_eq!(Tone::of_signal("buy"), Tone::Neutral);
    }

    #[test]
    fn zero_change_counts_as_up() {
        assert_eq!(Tone::of_change(0.0), Tone::Positive);
        assert_eq!(Tone::of_change(-0.1).to_string(), "negative");
    }
}
