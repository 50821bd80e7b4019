use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::ensure_owner;
use crate::bot::handlers::HandlerResult;
use crate::bot::BotContext;
use crate::storage::templates::{MessageButton, TemplateError};
use crate::utils::html::escape_html;

const ADD_USAGE: &str = "Usage: /add_template <name> <content> [| <button_text> | <button_url>]";

/// Parse and store `/add_template <name> <content> [| <text> | <url>]`.
pub async fn handle_add_template(bot: Bot, msg: Message, args: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let args = args.trim();
    let Some((name, rest)) = args.split_once(char::is_whitespace) else {
        bot.send_message(msg.chat.id, ADD_USAGE).await?;
        return Ok(());
    };

    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    let (content, button) = match parts.as_slice() {
        [content] => (*content, None),
        [content, text, url] => (
            *content,
            Some(MessageButton {
                text: (*text).to_string(),
                url: (*url).to_string(),
            }),
        ),
        _ => {
            bot.send_message(
                msg.chat.id,
                "Button text and URL must both be provided if you use the button syntax.",
            )
            .await?;
            return Ok(());
        }
    };

    if content.is_empty() {
        bot.send_message(msg.chat.id, ADD_USAGE).await?;
        return Ok(());
    }

    match ctx.templates.put(name, content.to_string(), button.clone()) {
        Ok(()) => {
            let suffix = if button.is_some() { " with button" } else { "" };
            bot.send_message(
                msg.chat.id,
                format!("Template '{name}'{suffix} saved successfully."),
            )
            .await?;
        }
        Err(TemplateError::Storage(e)) => return Err(e.into()),
        Err(e) => {
            bot.send_message(msg.chat.id, e.to_string()).await?;
        }
    }
    Ok(())
}

pub async fn handle_list_templates(bot: Bot, msg: Message, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let templates = ctx.templates.list()?;
    if templates.is_empty() {
        bot.send_message(msg.chat.id, "No templates saved yet. Use /add_template to create one.")
            .await?;
        return Ok(());
    }

    let mut message = String::from("<b>Saved Templates:</b>\n\n");
    for (name, template) in &templates {
        message.push_str(&format!("<b>Name:</b> {}\n", escape_html(name)));
        // Template bodies are operator-authored HTML; shown as stored.
        message.push_str(&format!("<b>Content:</b> {}\n", template.content));
        if let Some(button) = template.button() {
            message.push_str(&format!(
                "<b>Button:</b> {} → {}\n",
                escape_html(&button.text),
                escape_html(&button.url)
            ));
        }
        message.push_str("--------------------\n");
    }

    bot.send_message(msg.chat.id, message)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_delete_template(bot: Bot, msg: Message, name: String, ctx: &BotContext) -> HandlerResult {
    if !ensure_owner(&bot, &msg, ctx.owner_id).await? {
        return Ok(());
    }

    let name = name.trim();
    if name.is_empty() {
        bot.send_message(msg.chat.id, "Usage: /delete_template <name>").await?;
        return Ok(());
    }

    let reply = if ctx.templates.delete(name)? {
        format!("Template '{name}' deleted successfully.")
    } else {
        format!("Template '{name}' not found.")
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
