pub mod callback;
pub mod message;

use teloxide::dispatching::dialogue::{self, Dialogue, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::BotContext;

/// Result type shared by all update handlers.
pub type HandlerResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Steps of the interactive `/send` conversation.
///
/// The flow is front-end plumbing only: the dialogue collects a destination
/// and a template name, then hands both to the dispatch engine in one call.
#[derive(Clone, Default)]
pub enum SendState {
    #[default]
    Idle,
    SelectingChat,
    SelectingTemplate {
        chat_id: String,
    },
}

/// Dialogue handle backing the `/send` conversation.
pub type SendDialogue = Dialogue<SendState, InMemStorage<SendState>>;

pub struct BotHandler {
    ctx: BotContext,
}

impl BotHandler {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let ctx_command = self.ctx.clone();
        let ctx_text = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        dialogue::enter::<Update, InMemStorage<SendState>, SendState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, dialogue: SendDialogue, msg: Message, cmd: Command| {
                        let ctx = ctx_command.clone();
                        async move { message::command_handler(bot, dialogue, msg, cmd, ctx).await }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let ctx = ctx_text.clone();
                async move { message::text_handler(bot, msg, ctx).await }
            }))
            .branch(
                Update::filter_callback_query().endpoint(move |bot: Bot, dialogue: SendDialogue, q: CallbackQuery| {
                    let ctx = ctx_callback.clone();
                    async move { callback::callback_handler(bot, dialogue, q, ctx).await }
                }),
            )
    }
}
