use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, Recipient as TgRecipient};
use url::Url;

use crate::services::dispatch::{OutgoingMessage, Recipient, Transport, TransportError};

/// Telegram Bot API implementation of the dispatch transport.
///
/// Bodies are sent in HTML parse mode; a template button becomes a single
/// inline URL keyboard row. Telegram-side failures (blocked bot, unknown
/// chat, bad handle) come back as [`TransportError`] values and stay
/// per-recipient.
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn deliver(&self, recipient: &Recipient, message: &OutgoingMessage) -> Result<(), TransportError> {
        let destination = match recipient {
            Recipient::Id(id) => TgRecipient::Id(ChatId(*id)),
            Recipient::Handle(handle) => TgRecipient::ChannelUsername(handle.clone()),
        };

        let mut request = self
            .bot
            .send_message(destination, message.body.clone())
            .parse_mode(ParseMode::Html);

        if let Some(button) = &message.button {
            let url = Url::parse(&button.url)
                .map_err(|e| TransportError(format!("invalid button url '{}': {e}", button.url)))?;
            let keyboard = InlineKeyboardMarkup::new([[InlineKeyboardButton::url(button.text.clone(), url)]]);
            request = request.reply_markup(keyboard);
        }

        request.await.map_err(|e| TransportError(e.to_string()))?;
        Ok(())
    }
}
