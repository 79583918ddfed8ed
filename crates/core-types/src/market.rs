// In crates/core-types/src/market.rs

use serde::{Deserialize, Serialize};

/// A single price quote as shown in the ticker strip and the market table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    /// The asset symbol (e.g., "BTC", "AAPL").
    pub symbol: String,
    /// The last traded price. Never negative for a valid tick.
    pub price: f64,
    /// The 24h change in percent. May be negative.
    #[serde(default)]
    pub change: f64,
}

impl PriceTick {
    /// A tick is usable when its price is a finite, non-negative number.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0 && self.change.is_finite()
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Trading volume as sent by the backend: either a raw amount or a
/// preformatted label such as "1.2B".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Volume {
    Amount(f64),
    Label(String),
}

/// A row of `GET /market/prices`: a tick plus descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    #[serde(flatten)]
    pub tick: PriceTick,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub volume: Option<Volume>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_asset_accepts_numeric_and_label_volume() {
        let json = r#"[
            {"symbol":"BTC","name":"Bitcoin","price":64230.5,"change":2.4,"sector":"Crypto","volume":1200000000},
            {"symbol":"AAPL","name":"Apple Inc.","price":178.4,"change":-0.5,"sector":"Stocks","volume":"45M"},
            {"symbol":"SOL","price":145.6}
        ]"#;
        let assets: Vec<MarketAsset> = serde_json::from_str(json).unwrap();

        assert_eq!(assets[0].volume, Some(Volume::Amount(1_200_000_000.0)));
        assert_eq!(assets[1].volume, Some(Volume::Label("45M".into())));
        assert!(!assets[1].tick.is_up());
        assert_eq!(assets[2].volume, None);
        assert_eq!(assets[2].tick.change, 0.0);
    }

    #[test]
    fn negative_or_nan_price_is_invalid() {
        let tick = |price| PriceTick { symbol: "X".into(), price, change: 0.0 };
        assert!(tick(0.0).is_valid());
        assert!(!tick(-1.0).is_valid());
        assert!(!tick(f64::NAN).is_valid());
    }
}
