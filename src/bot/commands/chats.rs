use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;
use crate::storage::chats::ChatKind;
use crate::utils::html::escape_html;

/// Save the chat the command was issued in as a broadcast destination.
/// Only meaningful in groups and channels; private chats are rejected.
pub async fn handle_add_chat(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    if msg.chat.is_private() {
        bot.send_message(msg.chat.id, "This command can only be used in a group or channel.")
            .await?;
        return Ok(());
    }

    let kind = if msg.chat.is_channel() {
        ChatKind::Channel
    } else if msg.chat.is_supergroup() {
        ChatKind::Supergroup
    } else {
        ChatKind::Group
    };
    let title = msg.chat.title().unwrap_or("Untitled").to_string();

    ctx.chats.register(&msg.chat.id.0.to_string(), &title, kind)?;
    bot.send_message(
        msg.chat.id,
        format!("Success! Chat '{title}' ({kind}) has been saved."),
    )
    .await?;
    Ok(())
}

pub async fn handle_list_chats(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let chats = ctx.chats.list()?;
    if chats.is_empty() {
        bot.send_message(
            msg.chat.id,
            "No chats have been saved yet. Use /add_chat in a group or channel to save it.",
        )
        .await?;
        return Ok(());
    }

    let mut message = String::from("<b>Saved Chats:</b>\n\n");
    for (chat_id, entry) in &chats {
        message.push_str(&format!("<b>Title:</b> {}\n", escape_html(&entry.title)));
        message.push_str(&format!("<b>Type:</b> {}\n", entry.kind));
        message.push_str(&format!("<b>ID:</b> <code>{}</code>\n", escape_html(chat_id)));
        message.push_str("--------------------\n");
    }

    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
