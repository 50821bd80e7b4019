use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::ensure_owner;
use crate::bot::handlers::{HandlerResult, SendDialogue, SendState};
use crate::bot::BotContext;

/// Entry point of the interactive send flow: list the saved chats as an
/// inline keyboard and wait for the selection callback.
pub async fn handle_send(bot: Bot, dialogue: SendDialogue, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let chats = ctx.chats.list()?;
    if chats.is_empty() {
        bot.send_message(msg.chat.id, "No chats saved. Use /add_chat in a group/channel first.")
            .await?;
        return Ok(());
    }

    let keyboard: Vec<Vec<InlineKeyboardButton>> = chats
        .iter()
        .map(|(chat_id, entry)| {
            vec![InlineKeyboardButton::callback(
                format!("{} ({})", entry.title, entry.kind),
                chat_id.clone(),
            )]
        })
        .collect();

    bot.send_message(msg.chat.id, "Please select a destination:")
        .reply_markup(InlineKeyboardMarkup::new(keyboard))
        .await?;
    dialogue.update(SendState::SelectingChat).await?;
    Ok(())
}

/// Abandon the interactive send flow.
pub async fn handle_cancel(bot: Bot, dialogue: SendDialogue, msg: Message) -> HandlerResult {
    dialogue.exit().await?;
    bot.send_message(msg.chat.id, "Operation cancelled.").await?;
    Ok(())
}
