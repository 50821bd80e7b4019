use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;
use crate::utils::html::escape_html;

/// Store `/add_keyword <keyword> <reply>`. The keyword is matched as a
/// whole word against incoming text messages.
pub async fn handle_add_keyword(bot: Bot, msg: Message, args: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let args = args.trim();
    let Some((keyword, reply)) = args.split_once(char::is_whitespace) else {
        bot.send_message(msg.chat.id, "Usage: /add_keyword <keyword> <reply>")
            .await?;
        return Ok(());
    };

    ctx.keywords.put(keyword, reply.trim())?;
    bot.send_message(msg.chat.id, format!("Keyword '{keyword}' saved successfully."))
        .await?;
    Ok(())
}

pub async fn handle_list_keywords(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let keywords = ctx.keywords.list()?;
    if keywords.is_empty() {
        bot.send_message(msg.chat.id, "No keywords saved yet. Use /add_keyword to create one.")
            .await?;
        return Ok(());
    }

    let mut message = String::from("<b>Keyword Replies:</b>\n\n");
    for (keyword, reply) in &keywords {
        message.push_str(&format!(
            "<b>{}</b> → {}\n",
            escape_html(keyword),
            escape_html(reply)
        ));
    }

    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_delete_keyword(bot: Bot, msg: Message, keyword: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let keyword = keyword.trim();
    if keyword.is_empty() {
        bot.send_message(msg.chat.id, "Usage: /delete_keyword <keyword>").await?;
        return Ok(());
    }

    let reply = if ctx.keywords.remove(keyword)? {
        format!("Keyword '{keyword}' deleted successfully.")
    } else {
        format!("Keyword '{keyword}' not found.")
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
