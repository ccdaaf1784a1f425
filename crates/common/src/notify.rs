use async_trait::async_trait;

use crate::{MessageHandle, Result};

/// Abstraction over the notification channel.
///
/// `TelegramNotifier` in `crates/telegram` implements this for live
/// delivery. The registry posts a message when a signal opens and edits
/// the same message when it resolves.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a new message and return a handle for later edits.
    async fn post(&self, text: &str) -> Result<MessageHandle>;

    /// Replace the text of a previously delivered message.
    async fn edit(&self, handle: &MessageHandle, text: &str) -> Result<()>;
}
