use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::{HandlerResult, SendDialogue};
use crate::bot::commands::{self, Command};
use crate::bot::BotContext;
use crate::utils::html::mention_html;
use crate::utils::text::find_keyword_reply;

pub async fn command_handler(
    bot: Bot,
    dialogue: SendDialogue,
    msg: Message,
    cmd: Command,
    ctx: BotContext,
) -> HandlerResult {
    match cmd {
        Command::Start => handle_start(bot, msg, &ctx).await?,
        Command::Help => {
            bot.send_message(msg.chat.id, commands::command_overview())
                .await?;
        }
        Command::AddChat => commands::chats::handle_add_chat(bot, msg, &ctx).await?,
        Command::ListChats => commands::chats::handle_list_chats(bot, msg, &ctx).await?,
        Command::AddTemplate(args) => {
            commands::templates::handle_add_template(bot, msg, args, &ctx).await?
        }
        Command::ListTemplates => {
            commands::templates::handle_list_templates(bot, msg, &ctx).await?
        }
        Command::DeleteTemplate(name) => {
            commands::templates::handle_delete_template(bot, msg, name, &ctx).await?
        }
        Command::AddKeyword(args) => {
            commands::keywords::handle_add_keyword(bot, msg, args, &ctx).await?
        }
        Command::ListKeywords => commands::keywords::handle_list_keywords(bot, msg, &ctx).await?,
        Command::DeleteKeyword(keyword) => {
            commands::keywords::handle_delete_keyword(bot, msg, keyword, &ctx).await?
        }
        Command::Broadcast(message) => {
            commands::broadcast::handle_broadcast(bot, msg, message, &ctx).await?
        }
        Command::Send => commands::send::handle_send(bot, dialogue, msg, &ctx).await?,
        Command::Schedule(args) => {
            commands::schedule::handle_schedule(bot, msg, args, &ctx).await?
        }
        Command::Stats => commands::stats::handle_stats(bot, msg, &ctx).await?,
        Command::Cancel => commands::send::handle_cancel(bot, dialogue, msg).await?,
    }
    Ok(())
}

/// Register the sender as a subscriber and show the command overview.
async fn handle_start(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    let greeting = match msg.from() {
        Some(user) => {
            ctx.subscribers.register(user.id.0 as i64)?;
            format!("Hello {}! Welcome to your new marketing bot.", mention_html(user.id.0, &user.full_name()))
        }
        None => "Hello! Welcome to your new marketing bot.".to_string(),
    };

    let welcome_message = format!(
        "{greeting}\n\n\
        Here are the commands you can use:\n\
        /start - Shows this welcome message and registers you for updates.\n\
        --- Chat Management ---\n\
        /add_chat - Use in a group/channel to save it.\n\
        /list_chats - Show saved chats.\n\
        --- Template Management ---\n\
        /add_template &lt;name&gt; &lt;content&gt; [| &lt;btn_text&gt; | &lt;btn_url&gt;]\n\
        /list_templates\n\
        /delete_template &lt;name&gt;\n\
        --- Keyword Replies ---\n\
        /add_keyword &lt;keyword&gt; &lt;reply&gt;\n\
        /list_keywords\n\
        /delete_keyword &lt;keyword&gt;\n\
        --- Messaging ---\n\
        /broadcast &lt;message&gt; - Sends a message to all users.\n\
        /send - Interactively send a template to a saved chat.\n\
        /schedule &lt;time&gt; &lt;target|all&gt; &lt;message&gt; - Schedules a message. Time format: 1d2h3m4s.\n\
        --- Other ---\n\
        /stats - Show bot statistics.\n"
    );

    bot.send_message(msg.chat.id, welcome_message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Keyword auto-replies for plain text messages. At most one reply per
/// message; commands never trigger it.
pub async fn text_handler(bot: Bot, msg: Message, ctx: BotContext) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.starts_with('/') {
        return Ok(());
    }

    let keywords = ctx.keywords.list()?;
    if let Some(reply) = find_keyword_reply(text, &keywords) {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}
