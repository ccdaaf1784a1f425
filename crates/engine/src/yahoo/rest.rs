use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{Error, MarketData, PriceSample, Result};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// REST client for the Yahoo Finance chart API. Used for 1-minute close
/// price windows on forex pairs.
pub struct YahooClient {
    http: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            http: Client::builder()
                .use_rustls_tls()
                .user_agent("Mozilla/5.0 (compatible; pipwatch/0.1)")
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Yahoo quotes forex pairs under a `=X` suffix, e.g. `EURUSD=X`.
    fn symbol(instrument: &str) -> String {
        format!("{instrument}=X")
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketData for YahooClient {
    async fn recent_closes(&self, instrument: &str, lookback: usize) -> Result<Vec<PriceSample>> {
        let url = format!(
            "{BASE_URL}/v8/finance/chart/{}?range=1d&interval=1m",
            Self::symbol(instrument)
        );

        debug!(instrument, "Fetching price window");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::DataFetch(format!("HTTP {status}: {body}")));
        }

        let chart: ChartResponse = serde_json::from_str(&body)?;
        let result = chart
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| Error::DataFetch(format!("no chart data for {instrument}")))?;

        let closes = result
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or(&[]);

        // Yahoo pads minutes without trades with nulls; drop those slots so
        // the sequence stays strictly increasing with one close per sample.
        let mut samples: Vec<PriceSample> = result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&ts, close)| {
                let close = (*close)?;
                let timestamp = Utc.timestamp_opt(ts, 0).single()?;
                Some(PriceSample { timestamp, close })
            })
            .collect();

        if samples.len() > lookback {
            samples.drain(..samples.len() - lookback);
        }
        Ok(samples)
    }

    /// Forex trades around the clock on weekdays; Saturday and Sunday are
    /// treated as closed, everything else as an active session.
    fn is_session_open(&self, now: DateTime<Utc>) -> bool {
        !matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
