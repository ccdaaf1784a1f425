use async_trait::async_trait;
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ParseMode};

use common::{Error, MessageHandle, Notifier, Result};

/// Delivers signal announcements to a Telegram chat and edits them in
/// place when the signal resolves.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn post(&self, text: &str) -> Result<MessageHandle> {
        let message = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| Error::Notification(e.to_string()))?;

        Ok(MessageHandle {
            chat_id: self.chat_id.0,
            message_id: message.id.0,
        })
    }

    async fn edit(&self, handle: &MessageHandle, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(ChatId(handle.chat_id), MessageId(handle.message_id), text)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| Error::Notification(e.to_string()))?;
        Ok(())
    }
}
