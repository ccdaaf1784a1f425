use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::{Error, MarketData, MessageHandle, Notifier, PriceSample, Result};
use engine::TickRunner;
use signals::{SignalConfig, SignalRegistry};
use strategy::CrossoverStrategy;

// ─── Test doubles ─────────────────────────────────────────────────────────────

/// Serves canned close windows per instrument; tests swap windows between
/// cycles to simulate market movement.
#[derive(Default)]
struct FakeMarket {
    windows: Mutex<HashMap<String, Vec<f64>>>,
    session_closed: AtomicBool,
    fetches: AtomicUsize,
}

impl FakeMarket {
    fn set_window(&self, instrument: &str, closes: Vec<f64>) {
        self.windows
            .lock()
            .unwrap()
            .insert(instrument.to_string(), closes);
    }

    fn clear_window(&self, instrument: &str) {
        self.windows.lock().unwrap().remove(instrument);
    }

    fn close_session(&self) {
        self.session_closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn recent_closes(&self, instrument: &str, lookback: usize) -> Result<Vec<PriceSample>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let closes = self
            .windows
            .lock()
            .unwrap()
            .get(instrument)
            .cloned()
            .unwrap_or_default();

        let base: DateTime<Utc> = "2026-01-05T08:00:00Z".parse().unwrap();
        Ok(closes
            .into_iter()
            .take(lookback)
            .enumerate()
            .map(|(i, close)| PriceSample {
                timestamp: base + chrono::Duration::minutes(i as i64),
                close,
            })
            .collect())
    }

    fn is_session_open(&self, _now: DateTime<Utc>) -> bool {
        !self.session_closed.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct FakeNotifier {
    posts: Mutex<Vec<String>>,
    edits: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn post(&self, text: &str) -> Result<MessageHandle> {
        let mut posts = self.posts.lock().unwrap();
        posts.push(text.to_string());
        Ok(MessageHandle {
            chat_id: 42,
            message_id: posts.len() as i32,
        })
    }

    async fn edit(&self, _handle: &MessageHandle, text: &str) -> Result<()> {
        self.edits.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Market double whose fetches always fail, for error-isolation tests.
struct BrokenMarket;

#[async_trait]
impl MarketData for BrokenMarket {
    async fn recent_closes(&self, _instrument: &str, _lookback: usize) -> Result<Vec<PriceSample>> {
        Err(Error::DataFetch("provider unreachable".into()))
    }

    fn is_session_open(&self, _now: DateTime<Utc>) -> bool {
        true
    }
}

// ─── Price window builders ────────────────────────────────────────────────────

/// 21 closes oscillating tightly around 1.1000: enough history for the
/// default indicators without tripping either crossover rule.
fn flat_history() -> Vec<f64> {
    (0..21)
        .map(|i| 1.1000 + if i % 2 == 0 { 0.0002 } else { -0.0002 })
        .collect()
}

/// History whose last step jumps from below the average to above it while
/// the oscillator crosses up through 50: a sell fires at 1.1100.
fn sell_crossover_window() -> Vec<f64> {
    let mut closes = flat_history();
    closes.push(1.0950);
    closes.push(1.1100);
    closes
}

/// Mirror image: a buy fires at 1.0900.
fn buy_crossover_window() -> Vec<f64> {
    let mut closes = flat_history();
    closes.push(1.1050);
    closes.push(1.0900);
    closes
}

fn runner(market: Arc<dyn MarketData>, notifier: Arc<dyn Notifier>, instruments: &[&str]) -> TickRunner {
    TickRunner::new(
        instruments.iter().map(|s| s.to_string()).collect(),
        CrossoverStrategy::new(21, 14),
        SignalRegistry::new(SignalConfig::default()),
        market,
        notifier,
        Duration::from_secs(180),
    )
}

fn t0() -> DateTime<Utc> {
    "2026-01-05T12:00:00Z".parse().unwrap()
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sell_signal_opens_and_wins_on_lower_close() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD"]);

    market.set_window("EURUSD", sell_crossover_window());
    runner.run_cycle(t0()).await;

    assert!(runner.registry().is_open("EURUSD"));
    {
        let posts = notifier.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].contains("Sell Signal"));
        assert!(posts[0].contains("1.1100"));
    }

    // 180 s later the close sits 10 pips below the entry.
    let mut next = sell_crossover_window();
    next.push(1.1090);
    market.set_window("EURUSD", next);
    runner.run_cycle(t0() + chrono::Duration::seconds(180)).await;

    assert!(!runner.registry().is_open("EURUSD"));
    let edits = notifier.edits.lock().unwrap();
    assert_eq!(edits.len(), 1);
    assert!(edits[0].contains("Close Price: 1.1090"));
    assert!(edits[0].contains("Pips: 10.0"));
    assert!(edits[0].contains("Won"));
}

#[tokio::test]
async fn sell_signal_loses_on_higher_close() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD"]);

    market.set_window("EURUSD", sell_crossover_window());
    runner.run_cycle(t0()).await;
    assert!(runner.registry().is_open("EURUSD"));

    // 5 pips against the sell at resolution time.
    let mut next = sell_crossover_window();
    next.push(1.1105);
    market.set_window("EURUSD", next);
    runner.run_cycle(t0() + chrono::Duration::seconds(180)).await;

    let edits = notifier.edits.lock().unwrap();
    assert_eq!(edits.len(), 1);
    assert!(edits[0].contains("Pips: 5.0"));
    assert!(edits[0].contains("Lost"));
}

#[tokio::test]
async fn crossover_while_open_does_not_stack_signals() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD"]);

    market.set_window("EURUSD", buy_crossover_window());
    runner.run_cycle(t0()).await;
    assert_eq!(runner.registry().open_count(), 1);

    // A fresh crossover fires one minute later, well inside the holding
    // period of the open buy.
    let mut next = buy_crossover_window();
    next.push(1.1100);
    market.set_window("EURUSD", next);
    runner.run_cycle(t0() + chrono::Duration::seconds(60)).await;

    assert_eq!(runner.registry().open_count(), 1);
    assert_eq!(
        notifier.posts.lock().unwrap().len(),
        1,
        "No second announcement while a signal is open"
    );
}

#[tokio::test]
async fn empty_fetch_leaves_due_signal_pending() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD"]);

    market.set_window("EURUSD", sell_crossover_window());
    runner.run_cycle(t0()).await;
    assert!(runner.registry().is_open("EURUSD"));

    // Past the deadline, but the provider returns nothing.
    market.clear_window("EURUSD");
    runner.run_cycle(t0() + chrono::Duration::seconds(200)).await;

    assert!(runner.registry().is_open("EURUSD"), "Signal stays pending");
    assert!(notifier.edits.lock().unwrap().is_empty());

    // Data returns on a later cycle: delayed resolution, not a drop.
    let mut next = sell_crossover_window();
    next.push(1.1090);
    market.set_window("EURUSD", next);
    runner.run_cycle(t0() + chrono::Duration::seconds(400)).await;

    assert!(!runner.registry().is_open("EURUSD"));
    assert_eq!(notifier.edits.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn closed_session_skips_all_fetches() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD", "GBPUSD"]);

    market.set_window("EURUSD", sell_crossover_window());
    market.close_session();
    runner.run_cycle(t0()).await;

    assert_eq!(market.fetches.load(Ordering::SeqCst), 0);
    assert!(notifier.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn short_window_is_skipped_without_signal() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(market.clone(), notifier.clone(), &["EURUSD"]);

    market.set_window("EURUSD", vec![1.1000; 10]);
    runner.run_cycle(t0()).await;

    assert_eq!(runner.registry().open_count(), 0);
    assert!(notifier.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn one_instrument_failure_does_not_abort_the_cycle() {
    let market = Arc::new(FakeMarket::default());
    let notifier = Arc::new(FakeNotifier::default());
    // First instrument has no data (fetch yields an empty window, an
    // error); the second still gets evaluated and fires.
    let mut runner = runner(market.clone(), notifier.clone(), &["GBPUSD", "EURUSD"]);

    market.set_window("EURUSD", sell_crossover_window());
    runner.run_cycle(t0()).await;

    assert_eq!(market.fetches.load(Ordering::SeqCst), 2);
    assert!(runner.registry().is_open("EURUSD"));
}

#[tokio::test]
async fn unreachable_provider_never_panics_the_cycle() {
    let notifier = Arc::new(FakeNotifier::default());
    let mut runner = runner(Arc::new(BrokenMarket), notifier.clone(), &["EURUSD", "GBPUSD"]);

    runner.run_cycle(t0()).await;

    assert_eq!(runner.registry().open_count(), 0);
    assert!(notifier.posts.lock().unwrap().is_empty());
}
