use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{PriceSample, Result};

/// Abstraction over the market data provider.
///
/// `YahooClient` in `crates/engine` implements this for live data.
/// Tests implement it with canned price windows.
///
/// Only the tick runner should hold a reference to a `dyn MarketData`.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent close prices for an instrument, oldest first,
    /// at most `lookback` samples. An empty result means the provider had
    /// no data for this instrument right now.
    async fn recent_closes(&self, instrument: &str, lookback: usize) -> Result<Vec<PriceSample>>;

    /// Whether the market session is active at `now`. When false the
    /// orchestrator skips the cycle's fetches entirely.
    fn is_session_open(&self, now: DateTime<Utc>) -> bool;
}
