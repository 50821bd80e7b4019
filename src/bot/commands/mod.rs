pub mod broadcast;
pub mod chats;
pub mod keywords;
pub mod schedule;
pub mod send;
pub mod stats;
pub mod templates;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::handlers::HandlerResult;

/// All operator and subscriber commands understood by the bot.
pub fn command_overview() -> String {
    Command::descriptions().to_string()
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Marketing bot commands:")]
pub enum Command {
    #[command(description = "show the welcome message and register for updates.")]
    Start,
    #[command(description = "display this help message.")]
    Help,
    #[command(description = "save the current group or channel as a destination.")]
    AddChat,
    #[command(description = "list saved destination chats.")]
    ListChats,
    #[command(description = "save a template: /add_template <name> <content> [| <button text> | <button url>]")]
    AddTemplate(String),
    #[command(description = "list saved templates.")]
    ListTemplates,
    #[command(description = "delete a template by name.")]
    DeleteTemplate(String),
    #[command(description = "save a keyword auto-reply: /add_keyword <keyword> <reply>")]
    AddKeyword(String),
    #[command(description = "list keyword auto-replies.")]
    ListKeywords,
    #[command(description = "delete a keyword auto-reply.")]
    DeleteKeyword(String),
    #[command(description = "send a message to every subscriber.")]
    Broadcast(String),
    #[command(description = "interactively send a template to a saved chat.")]
    Send,
    #[command(description = "schedule a message: /schedule <duration> <target|all> <message>")]
    Schedule(String),
    #[command(description = "show bot statistics.")]
    Stats,
    #[command(description = "cancel the current operation.")]
    Cancel,
}

/// Owner gate shared by all administrative commands. Replies to the caller
/// and returns `false` when the sender is not the configured owner.
pub async fn ensure_owner(bot: &Bot, msg: &Message, owner_id: i64) -> HandlerResult<bool> {
    let from_owner = msg
        .from()
        .map(|user| user.id.0 as i64 == owner_id)
        .unwrap_or(false);
    if !from_owner {
        bot.send_message(msg.chat.id, "You are not authorized to use this command.")
            .await?;
    }
    Ok(from_owner)
}
