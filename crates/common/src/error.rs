use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Insufficient data: got {got} samples, need {need}")]
    InsufficientData { got: usize, need: usize },

    #[error("Indicator undefined for the latest samples")]
    IndicatorUndefined,

    #[error("Market is closed")]
    MarketClosed,

    #[error("Market data error: {0}")]
    DataFetch(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the per-instrument skip conditions that are part of normal
    /// operation (too little history, degenerate oscillator window).
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Error::InsufficientData { .. } | Error::IndicatorUndefined
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
