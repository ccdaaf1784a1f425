pub mod commands;
pub mod notify;

pub use commands::start_bot;
pub use notify::TelegramNotifier;
