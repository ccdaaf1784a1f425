use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One close price observation for an instrument.
///
/// Sequences are ordered oldest-first, strictly increasing by timestamp,
/// with no duplicate timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "Buy"),
            Direction::Sell => write!(f, "Sell"),
        }
    }
}

/// Classification of the transition between the two most recent samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Price dropped below its average while the oscillator crossed under 50.
    Buy,
    /// Price rose above its average while the oscillator crossed over 50.
    Sell,
    /// No crossover on the latest sample.
    Neutral,
}

impl Crossover {
    /// Direction to open for this crossover, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Crossover::Buy => Some(Direction::Buy),
            Crossover::Sell => Some(Direction::Sell),
            Crossover::Neutral => None,
        }
    }
}

/// Win/loss outcome of a resolved signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won => write!(f, "Won 🎯"),
            Outcome::Lost => write!(f, "Lost 📉"),
        }
    }
}

/// Reference to a delivered chat message, needed to edit it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    pub chat_id: i64,
    pub message_id: i32,
}

/// An announced signal awaiting resolution.
///
/// At most one exists per instrument at any time. The announcement `text`
/// is kept so the resolution edit can append to it.
#[derive(Debug, Clone)]
pub struct OpenSignal {
    pub instrument: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub opened_at: DateTime<Utc>,
    pub handle: MessageHandle,
    pub text: String,
}

/// How a resolved signal turned out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Absolute pip movement between entry and close.
    pub pips: f64,
    pub close_price: f64,
}
