/// Simple moving average indicator.
///
/// Produces a series aligned to its input: `None` until `window` values
/// exist, the arithmetic mean of the trailing `window` closes after that.
#[derive(Debug, Clone)]
pub struct SmaIndicator {
    pub window: usize,
}

impl SmaIndicator {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "SMA window must be >= 1");
        Self { window }
    }

    /// Compute the rolling mean of a slice of close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        closes
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if i + 1 < self.window {
                    return None;
                }
                let trailing = &closes[i + 1 - self.window..=i];
                Some(trailing.iter().sum::<f64>() / self.window as f64)
            })
            .collect()
    }
}
