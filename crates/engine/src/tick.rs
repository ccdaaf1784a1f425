use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use common::{MarketData, Notifier, Result};
use signals::{OpenOutcome, SignalRegistry};
use strategy::CrossoverStrategy;

/// How many samples to request per fetch. Comfortably above the indicator
/// minimum so a few null-padded minutes never starve the evaluation.
const LOOKBACK: usize = 200;

/// Drives one evaluation cycle per instrument per tick interval.
///
/// Owns the registry and the strategy; the market data and notification
/// collaborators are the only I/O. Everything runs on one task, so each
/// instrument's read-modify-write of the registry is a single synchronous
/// step.
pub struct TickRunner {
    instruments: Vec<String>,
    strategy: CrossoverStrategy,
    registry: SignalRegistry,
    market: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl TickRunner {
    pub fn new(
        instruments: Vec<String>,
        strategy: CrossoverStrategy,
        registry: SignalRegistry,
        market: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            instruments,
            strategy,
            registry,
            market,
            notifier,
            interval,
        }
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Run the tick loop forever. Call from `tokio::spawn`.
    pub async fn run(mut self) {
        info!(
            instruments = self.instruments.len(),
            interval_secs = self.interval.as_secs(),
            "TickRunner running"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle(Utc::now()).await;
        }
    }

    /// Evaluate every tracked instrument once.
    ///
    /// Takes `now` as a parameter so tests drive time explicitly. A failure
    /// on one instrument is logged and never aborts the rest of the cycle.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) {
        if !self.market.is_session_open(now) {
            info!("Market is closed — skipping cycle");
            return;
        }

        debug!(open_signals = self.registry.open_count(), "Checking signals");

        let instruments = self.instruments.clone();
        for instrument in &instruments {
            match self.evaluate_instrument(instrument, now).await {
                Ok(()) => {}
                Err(e) if e.is_skip() => {
                    debug!(instrument, reason = %e, "Instrument skipped");
                }
                Err(e) => {
                    warn!(instrument, error = %e, "Instrument evaluation failed");
                }
            }
        }
    }

    /// One instrument's step: fetch, resolve a due signal, detect, open.
    async fn evaluate_instrument(&mut self, instrument: &str, now: DateTime<Utc>) -> Result<()> {
        let window = self.market.recent_closes(instrument, LOOKBACK).await?;

        // An empty window leaves any open signal pending: the registry
        // never force-closes on missing data.
        let Some(latest) = window.last() else {
            return Err(common::Error::DataFetch("empty price window".into()));
        };

        // Resolution comes first so a due signal is scored before a new
        // crossover can be considered for the same instrument.
        if let Some(resolution) = self
            .registry
            .resolve_due(self.notifier.as_ref(), instrument, latest.close, now)
            .await?
        {
            info!(
                instrument,
                outcome = ?resolution.outcome,
                pips = resolution.pips,
                "Outcome delivered"
            );
        }

        let closes: Vec<f64> = window.iter().map(|s| s.close).collect();
        let crossover = self.strategy.evaluate(&closes)?;

        if let Some(direction) = crossover.direction() {
            match self
                .registry
                .open(self.notifier.as_ref(), instrument, direction, latest.close, now)
                .await?
            {
                OpenOutcome::Opened => {
                    info!(instrument, %direction, price = latest.close, "Signal announced");
                }
                OpenOutcome::AlreadyOpen => {
                    debug!(instrument, "Crossover ignored — signal already open");
                }
            }
        }

        Ok(())
    }
}
