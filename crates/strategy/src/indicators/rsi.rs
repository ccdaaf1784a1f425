/// RSI-style momentum oscillator.
///
/// Uses a simple rolling mean of gains and losses over the trailing
/// `period` close-to-close deltas (Cutler's variant, not Wilder's
/// smoothing). Produces a series aligned to its input: `None` for the
/// first `period` positions, and `None` wherever the trailing window is
/// perfectly flat, since a window with no gains and no losses leaves the
/// oscillator undefined.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }

    /// Compute the oscillator series from a slice of close prices
    /// (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

        closes
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if i < self.period {
                    return None;
                }
                // Trailing `period` deltas ending at position i.
                let window = &deltas[i - self.period..i];

                let avg_gain = window.iter().filter(|&&d| d > 0.0).sum::<f64>()
                    / self.period as f64;
                let avg_loss = window.iter().filter(|&&d| d < 0.0).map(|d| d.abs()).sum::<f64>()
                    / self.period as f64;

                if avg_loss == 0.0 {
                    if avg_gain > 0.0 {
                        return Some(100.0);
                    }
                    return None; // flat window
                }

                let rs = avg_gain / avg_loss;
                Some(100.0 - 100.0 / (1.0 + rs))
            })
            .collect()
    }
}
