/// All process configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    /// Channel or chat the bot posts signals into.
    pub telegram_chat_id: i64,

    // Evaluation cadence
    pub tick_interval_secs: u64,

    // Watchlist / strategy parameter file path
    pub watchlist_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_chat_id = required_env("TELEGRAM_CHAT_ID")
            .parse::<i64>()
            .unwrap_or_else(|_| {
                panic!("TELEGRAM_CHAT_ID must be a numeric chat id")
            });

        Config {
            telegram_token: required_env("TELEGRAM_TOKEN"),
            telegram_chat_id,
            tick_interval_secs: optional_env("TICK_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(180),
            watchlist_config_path: optional_env("WATCHLIST_CONFIG_PATH")
                .unwrap_or_else(|| "config/watchlist.toml".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
