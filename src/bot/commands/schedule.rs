use std::time::Duration;

use teloxide::prelude::*;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;
use crate::services::dispatch::{DispatchTarget, OutgoingMessage};
use crate::utils::datetime::format_datetime;
use crate::utils::duration::parse_duration;

const USAGE: &str = "Usage: /schedule <time> <target|all> <message>";

/// Defer a message: `/schedule 1h30m all Big sale starts soon!`
///
/// The job is named after the submitting message id, which Telegram keeps
/// unique per chat, so every submission gets its own job key.
pub async fn handle_schedule(bot: Bot, msg: Message, args: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let mut words = args.split_whitespace();
    let (Some(time_str), Some(target_str)) = (words.next(), words.next()) else {
        bot.send_message(msg.chat.id, USAGE).await?;
        return Ok(());
    };
    let message: String = words.collect::<Vec<_>>().join(" ");
    if message.is_empty() {
        bot.send_message(msg.chat.id, USAGE).await?;
        return Ok(());
    }

    let delay = parse_duration(time_str);
    if delay == 0 {
        bot.send_message(
            msg.chat.id,
            "Invalid time format. Please use a format like 1d2h3m4s.",
        )
        .await?;
        return Ok(());
    }

    let target = DispatchTarget::parse(target_str);
    let name = format!("schedule-{}", msg.id.0);
    match ctx.scheduler.schedule(
        Some(name),
        target.clone(),
        OutgoingMessage::text(message),
        Duration::from_secs(delay),
    ) {
        Ok(ack) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Message scheduled to be sent to {target} in {time_str} (fires {}).",
                    format_datetime(&ack.fire_at)
                ),
            )
            .await?;
        }
        Err(e) => {
            bot.send_message(msg.chat.id, format!("Could not schedule message: {e}"))
                .await?;
        }
    }
    Ok(())
}
