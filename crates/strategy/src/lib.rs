pub mod config;
pub mod crossover;
pub mod indicators;

pub use config::WatchlistConfig;
pub use crossover::{detect, IndicatorSnapshot};
pub use indicators::{RsiIndicator, SmaIndicator};

use common::{Crossover, Error, Result};

/// The SMA/RSI crossover strategy: evaluates one instrument's price window
/// and classifies the most recent transition.
#[derive(Debug, Clone)]
pub struct CrossoverStrategy {
    sma: SmaIndicator,
    rsi: RsiIndicator,
}

impl CrossoverStrategy {
    pub fn new(sma_window: usize, rsi_period: usize) -> Self {
        Self {
            sma: SmaIndicator::new(sma_window),
            rsi: RsiIndicator::new(rsi_period),
        }
    }

    /// Minimum number of samples required before evaluation is possible.
    pub fn min_samples(&self) -> usize {
        self.sma.window.max(self.rsi.period) + 1
    }

    /// Evaluate a close price window (oldest first).
    ///
    /// Fails with `InsufficientData` when the window is too short and with
    /// `IndicatorUndefined` when either indicator has no value for the two
    /// most recent positions (flat oscillator window). Both are treated by
    /// the orchestrator as "skip this instrument this cycle".
    pub fn evaluate(&self, closes: &[f64]) -> Result<Crossover> {
        let need = self.min_samples();
        if closes.len() < need {
            return Err(Error::InsufficientData {
                got: closes.len(),
                need,
            });
        }

        let sma = self.sma.compute(closes);
        let rsi = self.rsi.compute(closes);
        let n = closes.len();

        let snapshot = IndicatorSnapshot {
            latest_close: closes[n - 1],
            prev_close: closes[n - 2],
            latest_sma: sma[n - 1].ok_or(Error::IndicatorUndefined)?,
            prev_sma: sma[n - 2].ok_or(Error::IndicatorUndefined)?,
            latest_rsi: rsi[n - 1].ok_or(Error::IndicatorUndefined)?,
            prev_rsi: rsi[n - 2].ok_or(Error::IndicatorUndefined)?,
        };

        Ok(detect(&snapshot))
    }
}
