use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    utils::command::BotCommands,
};
use tracing::info;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Commands the bot answers in chat. Signal delivery itself is proactive;
/// the command surface only describes the bot.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "PipWatch commands:")]
pub enum Command {
    #[command(description = "Show what this bot does")]
    Start,
}

/// Start the Telegram command dispatcher in long-polling mode.
pub async fn start_bot(bot: Bot) {
    info!("Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start));

    Update::filter_message().branch(command_handler)
}

async fn handle_start(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "PipWatch posts SMA/RSI crossover signals for major forex pairs and \
         updates each signal with its Won/Lost outcome after the holding period.",
    )
    .await?;
    Ok(())
}
