use teloxide::prelude::*;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;
use crate::services::dispatch::{DispatchError, DispatchTarget, OutgoingMessage};

/// Send a message to every subscriber, reporting aggregate counts.
///
/// Individual delivery failures never abort the broadcast; they only show
/// up in the final counts.
pub async fn handle_broadcast(bot: Bot, msg: Message, message: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let message = message.trim();
    if message.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Please provide a message to broadcast. Usage: /broadcast <message>",
        )
        .await?;
        return Ok(());
    }

    let outgoing = OutgoingMessage::text(message);
    let reply = match ctx
        .engine
        .dispatch(&DispatchTarget::AllSubscribers, &outgoing)
        .await
    {
        Ok(report) => format!(
            "Broadcast finished.\nSent: {}\nFailed: {}",
            report.sent,
            report.failed()
        ),
        Err(DispatchError::NoRecipients) => "No users have started the bot yet.".to_string(),
        Err(e) => {
            tracing::error!("Broadcast aborted: {e}");
            format!("Broadcast failed: {e}")
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
