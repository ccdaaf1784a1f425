use common::Crossover;

/// The aligned price/indicator values for the two most recent samples.
/// All values must be defined; `CrossoverStrategy::evaluate` fails with
/// `IndicatorUndefined` before a snapshot with missing values is built.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSnapshot {
    pub latest_close: f64,
    pub prev_close: f64,
    pub latest_sma: f64,
    pub prev_sma: f64,
    pub latest_rsi: f64,
    pub prev_rsi: f64,
}

/// Classify the transition between the previous and latest samples.
///
/// A sell fires when price crosses above its average while the oscillator
/// crosses up through the midline; a buy is the mirror image. The two are
/// mutually exclusive: price cannot be on both sides of the average at
/// once.
pub fn detect(s: &IndicatorSnapshot) -> Crossover {
    let price_above_sma = s.latest_close > s.latest_sma;
    let price_was_below_sma = s.prev_close < s.prev_sma;
    let rsi_above_50 = s.latest_rsi >= 50.0;
    let rsi_was_below_50 = s.prev_rsi < 50.0;

    let price_below_sma = s.latest_close < s.latest_sma;
    let price_was_above_sma = s.prev_close > s.prev_sma;
    let rsi_below_50 = s.latest_rsi <= 50.0;
    let rsi_was_above_50 = s.prev_rsi > 50.0;

    if price_above_sma && price_was_below_sma && rsi_above_50 && rsi_was_below_50 {
        Crossover::Sell
    } else if price_below_sma && price_was_above_sma && rsi_below_50 && rsi_was_above_50 {
        Crossover::Buy
    } else {
        Crossover::Neutral
    }
}
