// In crates/engine/src/markets.rs

use crate::poller::Source;
use crate::{Error, Result};
use api_client::Backend;
use async_trait::async_trait;
use core_types::{MarketAsset, PriceTick, Volume};
use events::{MarketBoard, MarketRow};
use rand::Rng;
use std::sync::Arc;

/// Points in a generated sparkline.
pub const SPARKLINE_POINTS: usize = 30;

/// Market prices. An unavailable or empty price list swaps in the demo
/// board rather than keeping stale prices.
pub struct MarketsSource {
    backend: Arc<dyn Backend>,
}

impl MarketsSource {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Source for MarketsSource {
    type Snapshot = MarketBoard;

    fn name(&self) -> &'static str {
        "markets"
    }

    async fn fetch(&self) -> Result<MarketBoard> {
        let assets = self.backend.market_prices().await?;
        let total = assets.len();
        let valid: Vec<MarketAsset> = assets.into_iter().filter(|a| a.tick.is_valid()).collect();
        if valid.len() < total {
            tracing::warn!(dropped = total - valid.len(), "Dropped market rows with invalid prices.");
        }
        if valid.is_empty() {
            return Err(Error::Empty("market prices"));
        }

        let mut rng = rand::rng();
        Ok(live_board(valid, &mut rng))
    }

    fn fallback(&self) -> Option<MarketBoard> {
        Some(demo_board(&mut rand::rng()))
    }
}

/// Builds the live board: every row gets a sparkline and a display volume.
pub fn live_board(assets: Vec<MarketAsset>, rng: &mut impl Rng) -> MarketBoard {
    let rows = assets
        .into_iter()
        .map(|asset| MarketRow {
            volume: format_volume(asset.volume.as_ref()),
            chart: sparkline(asset.tick.change >= 0.0, rng),
            asset,
        })
        .collect();
    MarketBoard { rows, demo: false }
}

/// The fixed dataset shown while the backend has no prices.
pub fn demo_board(rng: &mut impl Rng) -> MarketBoard {
    let rows = [
        ("BTC", "Bitcoin", 64_230.50, 2.4, "Crypto", "1.2B"),
        ("ETH", "Ethereum", 3_450.20, 1.8, "Crypto", "850M"),
        ("SOL", "Solana", 145.60, -1.2, "Crypto", "320M"),
        ("AAPL", "Apple Inc.", 178.40, -0.5, "Stocks", "45M"),
        ("NVDA", "Nvidia Corp.", 890.20, 3.2, "Stocks", "62M"),
        ("MSFT", "Microsoft", 410.30, 0.8, "Stocks", "22M"),
    ]
    .into_iter()
    .map(|(symbol, name, price, change, sector, volume)| MarketRow {
        asset: MarketAsset {
            tick: PriceTick { symbol: symbol.to_string(), price, change },
            name: name.to_string(),
            sector: sector.to_string(),
            volume: Some(Volume::Label(volume.to_string())),
        },
        volume: volume.to_string(),
        chart: sparkline(change >= 0.0, rng),
    })
    .collect();
    MarketBoard { rows, demo: true }
}

/// A multiplicative random walk from 100 that trends up (or down) on
/// average. Purely decorative: it is not price history.
pub fn sparkline(up: bool, rng: &mut impl Rng) -> Vec<f64> {
    let bias = if up { 0.4 } else { 0.6 };
    let mut price = 100.0;
    (0..SPARKLINE_POINTS)
        .map(|_| {
            price *= 1.0 + (rng.random::<f64>() - bias) * 0.05;
            price
        })
        .collect()
}

/// Numeric volumes become "1.2B" above a billion and "45M" otherwise;
/// labels pass through; a missing volume is "0".
pub fn format_volume(volume: Option<&Volume>) -> String {
    match volume {
        Some(Volume::Amount(v)) if *v > 1e9 => format!("{:.1}B", v / 1e9),
        Some(Volume::Amount(v)) => format!("{:.0}M", v / 1e6),
        Some(Volume::Label(label)) if !label.is_empty() => label.clone(),
        _ => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::Poller;
    use crate::testing::FakeBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn asset(symbol: &str, price: f64, change: f64, volume: Option<Volume>) -> MarketAsset {
        MarketAsset {
            tick: PriceTick { symbol: symbol.to_string(), price, change },
            name: symbol.to_string(),
            sector: "Crypto".to_string(),
            volume,
        }
    }

    #[test]
    fn volumes_are_abbreviated() {
        assert_eq!(format_volume(Some(&Volume::Amount(1_200_000_000.0))), "1.2B");
        assert_eq!(format_volume(Some(&Volume::Amount(850_000_000.0))), "850M");
        assert_eq!(format_volume(Some(&Volume::Amount(1e9))), "1000M");
        assert_eq!(format_volume(Some(&Volume::Label("45M".to_string()))), "45M");
        assert_eq!(format_volume(Some(&Volume::Label(String::new()))), "0");
        assert_eq!(format_volume(None), "0");
    }

    #[test]
    fn sparklines_have_thirty_points_and_follow_the_trend() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ups = 0.0;
        let mut downs = 0.0;
        for _ in 0..50 {
            let up = sparkline(true, &mut rng);
            let down = sparkline(false, &mut rng);
            assert_eq!(up.len(), SPARKLINE_POINTS);
            assert!(up.iter().all(|p| p.is_finite() && *p > 0.0));
            ups += up[SPARKLINE_POINTS - 1];
            downs += down[SPARKLINE_POINTS - 1];
        }
        assert!(ups / 50.0 > 100.0);
        assert!(downs / 50.0 < 100.0);
    }

    #[test]
    fn demo_board_is_the_six_fixed_assets() {
        let board = demo_board(&mut StdRng::seed_from_u64(1));
        let symbols: Vec<&str> = board.rows.iter().map(|r| r.asset.tick.symbol.as_str()).collect();

        assert!(board.demo);
        assert_eq!(symbols, ["BTC", "ETH", "SOL", "AAPL", "NVDA", "MSFT"]);
        assert_eq!(board.rows[0].volume, "1.2B");
    }

    #[tokio::test]
    async fn live_rows_drop_invalid_prices() {
        let backend = Arc::new(FakeBackend {
            markets: Some(vec![
                asset("BTC", 64_000.0, 1.0, Some(Volume::Amount(2.5e9))),
                asset("BAD", -1.0, 0.0, None),
                asset("NAN", f64::NAN, 0.0, None),
            ]),
            ..Default::default()
        });
        let mut poller = Poller::new(MarketsSource::new(backend));

        let state = poller.poll_once().await;
        let board = state.snapshot().unwrap();

        assert!(state.is_live());
        assert!(!board.demo);
        assert_eq!(board.rows.len(), 1);
        assert_eq!(board.rows[0].volume, "2.5B");
    }

    #[tokio::test]
    async fn empty_or_unavailable_prices_fall_back_to_demo() {
        for markets in [None, Some(vec![])] {
            let backend = Arc::new(FakeBackend { markets, ..Default::default() });
            let mut poller = Poller::new(MarketsSource::new(backend));

            let state = poller.poll_once().await;

            assert!(state.is_offline());
            assert!(state.snapshot().is_some_and(|b| b.demo && b.rows.len() == 6));
        }
    }
}
