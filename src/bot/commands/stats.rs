use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;

pub async fn handle_stats(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let subscriber_count = ctx.subscribers.count()?;
    let chat_count = ctx.chats.count()?;
    let template_count = ctx.templates.list()?.len();
    let pending_jobs = ctx.scheduler.active_jobs().len();

    let message = format!(
        "<b>Bot Statistics:</b>\n\n\
        <b>Subscribed Users:</b> {subscriber_count}\n\
        <b>Saved Chats:</b> {chat_count}\n\
        <b>Templates:</b> {template_count}\n\
        <b>Pending Scheduled Jobs:</b> {pending_jobs}\n"
    );

    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
