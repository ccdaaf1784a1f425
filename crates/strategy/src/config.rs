use serde::{Deserialize, Serialize};

/// Watchlist and strategy parameter file (TOML).
///
/// Example `config/watchlist.toml`:
/// ```toml
/// instruments = ["EURUSD", "GBPUSD", "USDJPY"]
///
/// [indicators]
/// sma_window = 21
/// rsi_period = 14
///
/// [signal]
/// holding_period_secs = 180
/// pip_scale = 10000.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchlistConfig {
    /// Tracked currency pairs, evaluated in order each cycle.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub signal: SignalParams,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicatorParams {
    #[serde(default = "default_sma_window")]
    pub sma_window: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalParams {
    #[serde(default = "default_holding_period_secs")]
    pub holding_period_secs: u64,
    #[serde(default = "default_pip_scale")]
    pub pip_scale: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_window: default_sma_window(),
            rsi_period: default_rsi_period(),
        }
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            holding_period_secs: default_holding_period_secs(),
            pip_scale: default_pip_scale(),
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            indicators: IndicatorParams::default(),
            signal: SignalParams::default(),
        }
    }
}

impl WatchlistConfig {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            panic!("Failed to read watchlist config at '{path}': {e}")
        });
        let cfg: WatchlistConfig = toml::from_str(&content).unwrap_or_else(|e| {
            panic!("Failed to parse watchlist config at '{path}': {e}")
        });
        tracing::info!(
            instruments = cfg.instruments.len(),
            sma_window = cfg.indicators.sma_window,
            rsi_period = cfg.indicators.rsi_period,
            "Watchlist loaded"
        );
        cfg
    }
}

fn default_sma_window() -> usize {
    21
}

fn default_rsi_period() -> usize {
    14
}

fn default_holding_period_secs() -> u64 {
    180
}

fn default_pip_scale() -> f64 {
    10_000.0
}

fn default_instruments() -> Vec<String> {
    [
        "EURUSD", "GBPUSD", "USDJPY", "AUDUSD", "USDCAD", "USDCHF", "NZDUSD", "EURGBP", "EURJPY",
        "GBPJPY", "AUDJPY", "EURCHF", "GBPCHF", "CADJPY", "CHFJPY",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
