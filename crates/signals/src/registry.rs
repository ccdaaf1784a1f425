use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use common::{Direction, Notifier, OpenSignal, Outcome, Resolution, Result};

/// User-configurable signal lifecycle parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Seconds a signal stays open before it is scored against the close.
    pub holding_period_secs: u64,
    /// Price-to-pip multiplier for the tracked instrument classes.
    pub pip_scale: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            holding_period_secs: 180,
            pip_scale: 10_000.0,
        }
    }
}

/// Result of an open attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A signal for this instrument is still awaiting resolution; the new
    /// crossover is dropped. Explicit policy: overlapping signals neither
    /// queue nor replace the open one.
    AlreadyOpen,
}

/// The open-signal registry: at most one unresolved signal per instrument.
///
/// Owned and mutated by the tick runner only. Every transition pairs a
/// notification side effect with the state change, ordered so the registry
/// never diverges from what was actually delivered: a failed announcement
/// creates no entry, and a failed resolution edit keeps the entry for a
/// retry on the next cycle.
pub struct SignalRegistry {
    config: SignalConfig,
    open: HashMap<String, OpenSignal>,
}

impl SignalRegistry {
    pub fn new(config: SignalConfig) -> Self {
        Self {
            config,
            open: HashMap::new(),
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn is_open(&self, instrument: &str) -> bool {
        self.open.contains_key(instrument)
    }

    /// Idle → Open transition.
    ///
    /// Posts the announcement first; the entry is recorded only once a
    /// message handle exists. Returns `AlreadyOpen` without side effects
    /// when the instrument still has an unresolved signal.
    pub async fn open(
        &mut self,
        notifier: &dyn Notifier,
        instrument: &str,
        direction: Direction,
        entry_price: f64,
        now: DateTime<Utc>,
    ) -> Result<OpenOutcome> {
        if self.open.contains_key(instrument) {
            return Ok(OpenOutcome::AlreadyOpen);
        }

        let text = self.announcement(instrument, direction, entry_price);
        let handle = notifier.post(&text).await?;

        info!(instrument, %direction, entry_price, "Signal opened");
        self.open.insert(
            instrument.to_string(),
            OpenSignal {
                instrument: instrument.to_string(),
                direction,
                entry_price,
                opened_at: now,
                handle,
                text,
            },
        );
        Ok(OpenOutcome::Opened)
    }

    /// Open → Idle transition.
    ///
    /// Resolves the instrument's open signal on the first observation at or
    /// after the holding-period deadline; a late observation resolves late
    /// rather than never. Returns `Ok(None)` when there is nothing to do:
    /// no open signal (which also makes double resolution a no-op) or a
    /// deadline still in the future.
    pub async fn resolve_due(
        &mut self,
        notifier: &dyn Notifier,
        instrument: &str,
        latest_close: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Resolution>> {
        let Some(signal) = self.open.get(instrument) else {
            return Ok(None);
        };

        let elapsed = (now - signal.opened_at).num_seconds();
        if elapsed < self.config.holding_period_secs as i64 {
            return Ok(None);
        }

        let (outcome, pips) = score(
            signal.direction,
            signal.entry_price,
            latest_close,
            self.config.pip_scale,
        );

        let text = format!(
            "{}\nClose Price: {:.4}\nPips: {:.1}\nResult: {}",
            signal.text, latest_close, pips, outcome
        );

        // Edit before removing: a failed delivery keeps the entry so the
        // outcome is retried next cycle instead of dropped.
        if let Err(e) = notifier.edit(&signal.handle, &text).await {
            warn!(instrument, error = %e, "Resolution edit failed — will retry");
            return Err(e);
        }

        info!(instrument, ?outcome, pips, elapsed, "Signal resolved");
        self.open.remove(instrument);
        Ok(Some(Resolution {
            outcome,
            pips,
            close_price: latest_close,
        }))
    }

    fn announcement(&self, instrument: &str, direction: Direction, entry_price: f64) -> String {
        let emoji = match direction {
            Direction::Buy => "🟢",
            Direction::Sell => "🔴",
        };
        let minutes = self.config.holding_period_secs / 60;
        format!("{emoji} *{instrument}* {direction} Signal\nPrice: {entry_price:.4}\nTime {minutes} min")
    }
}

/// Score a signal against the close observed at resolution time.
///
/// `pip_diff = (close − entry) × pip_scale`; a buy wins on positive
/// movement, a sell on negative. Zero movement loses either way. The
/// reported magnitude is the absolute pip difference.
pub fn score(
    direction: Direction,
    entry_price: f64,
    close_price: f64,
    pip_scale: f64,
) -> (Outcome, f64) {
    let pip_diff = (close_price - entry_price) * pip_scale;
    let outcome = match direction {
        Direction::Buy if pip_diff > 0.0 => Outcome::Won,
        Direction::Sell if pip_diff < 0.0 => Outcome::Won,
        _ => Outcome::Lost,
    };
    (outcome, pip_diff.abs())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
