//! Chat-command front end: teloxide command handlers, the interactive send
//! dialogue and the Telegram transport binding.

pub mod commands;
pub mod handlers;
pub mod transport;

use std::sync::Arc;

use crate::services::dispatch::DispatchEngine;
use crate::services::scheduler::Scheduler;
use crate::storage::chats::ChatStore;
use crate::storage::keywords::KeywordStore;
use crate::storage::subscribers::SubscriberStore;
use crate::storage::templates::TemplateStore;

/// Shared dependencies handed to every bot handler.
#[derive(Clone)]
pub struct BotContext {
    pub owner_id: i64,
    pub subscribers: SubscriberStore,
    pub chats: ChatStore,
    pub templates: TemplateStore,
    pub keywords: KeywordStore,
    pub engine: Arc<DispatchEngine>,
    pub scheduler: Arc<Scheduler>,
}
