use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{HandlerResult, SendDialogue, SendState};
use crate::bot::BotContext;
use crate::services::dispatch::{DispatchTarget, OutgoingMessage, Recipient};

/// Drives the interactive `/send` conversation: first callback picks the
/// destination chat, second picks the template, then the engine delivers.
pub async fn callback_handler(
    bot: Bot,
    dialogue: SendDialogue,
    q: CallbackQuery,
    ctx: BotContext,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.clone() else {
        return Ok(());
    };
    let Some(message) = q.message.clone() else {
        return Ok(());
    };

    let state = dialogue.get().await?.unwrap_or_default();
    match state {
        SendState::Idle => {
            bot.edit_message_text(message.chat.id, message.id, "No send operation in progress. Use /send to start one.")
                .await?;
        }
        SendState::SelectingChat => {
            select_chat(&bot, &dialogue, &message, data, &ctx).await?;
        }
        SendState::SelectingTemplate { chat_id } => {
            select_template_and_send(&bot, &dialogue, &message, chat_id, data, &ctx).await?;
        }
    }
    Ok(())
}

/// Destination chosen; offer the saved templates.
async fn select_chat(
    bot: &Bot,
    dialogue: &SendDialogue,
    message: &Message,
    chat_id: String,
    ctx: &BotContext,
) -> HandlerResult {
    let templates = ctx.templates.list()?;
    if templates.is_empty() {
        bot.edit_message_text(message.chat.id, message.id, "No templates found. Please add one with /add_template.")
            .await?;
        dialogue.exit().await?;
        return Ok(());
    }

    let keyboard: Vec<Vec<InlineKeyboardButton>> = templates
        .keys()
        .map(|name| vec![InlineKeyboardButton::callback(name.clone(), name.clone())])
        .collect();

    bot.edit_message_text(message.chat.id, message.id, "Please select a message template:")
        .reply_markup(InlineKeyboardMarkup::new(keyboard))
        .await?;
    dialogue
        .update(SendState::SelectingTemplate { chat_id })
        .await?;
    Ok(())
}

/// Template chosen; render it and dispatch to the selected chat.
async fn select_template_and_send(
    bot: &Bot,
    dialogue: &SendDialogue,
    message: &Message,
    chat_id: String,
    template_name: String,
    ctx: &BotContext,
) -> HandlerResult {
    let Some(template) = ctx.templates.get(&template_name)? else {
        bot.edit_message_text(message.chat.id, message.id, "Error: Could not find chat or template. Please start again.")
            .await?;
        dialogue.exit().await?;
        return Ok(());
    };

    let outgoing = OutgoingMessage::from_template(&template);
    let target = DispatchTarget::Single(Recipient::parse(&chat_id));

    let feedback = match ctx.engine.dispatch(&target, &outgoing).await {
        Ok(report) if report.failed() == 0 => {
            format!("Message sent successfully to chat ID {chat_id}.")
        }
        Ok(report) => {
            let reason = report
                .failures
                .first()
                .map(|f| f.reason.clone())
                .unwrap_or_else(|| "unknown delivery failure".to_string());
            format!("Failed to send message. Error: {reason}")
        }
        Err(e) => format!("Failed to send message. Error: {e}"),
    };

    bot.edit_message_text(message.chat.id, message.id, feedback)
        .await?;
    dialogue.exit().await?;
    Ok(())
}
