use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use engine::{TickRunner, YahooClient};
use signals::{SignalConfig, SignalRegistry};
use strategy::{CrossoverStrategy, WatchlistConfig};
use telegram_notify::{start_bot, TelegramNotifier};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(tick_interval_secs = cfg.tick_interval_secs, "PipWatch starting");

    let watchlist = WatchlistConfig::load(&cfg.watchlist_config_path);

    // ── Collaborators ─────────────────────────────────────────────────────────
    let bot = teloxide::Bot::new(cfg.telegram_token.clone());
    let notifier = Arc::new(TelegramNotifier::new(bot.clone(), cfg.telegram_chat_id));
    let market = Arc::new(YahooClient::new());

    // ── Signal engine ─────────────────────────────────────────────────────────
    let strategy = CrossoverStrategy::new(
        watchlist.indicators.sma_window,
        watchlist.indicators.rsi_period,
    );
    let registry = SignalRegistry::new(SignalConfig {
        holding_period_secs: watchlist.signal.holding_period_secs,
        pip_scale: watchlist.signal.pip_scale,
    });

    let runner = TickRunner::new(
        watchlist.instruments.clone(),
        strategy,
        registry,
        market,
        notifier,
        Duration::from_secs(cfg.tick_interval_secs),
    );

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    tokio::spawn(runner.run());
    tokio::spawn(start_bot(bot));

    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}
