//! Main entry point: initializes logging and configuration, wires the
//! stores, dispatch engine and scheduler, and runs the Telegram bot and
//! the HTTP admin API side by side.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketing_bot::api::auth::AuthSettings;
use marketing_bot::api::{ApiService, AppState};
use marketing_bot::bot::handlers::{BotHandler, SendState};
use marketing_bot::bot::transport::TelegramTransport;
use marketing_bot::bot::BotContext;
use marketing_bot::config::Config;
use marketing_bot::services::dispatch::DispatchEngine;
use marketing_bot::services::scheduler::Scheduler;
use marketing_bot::storage::chats::ChatStore;
use marketing_bot::storage::keywords::KeywordStore;
use marketing_bot::storage::subscribers::SubscriberStore;
use marketing_bot::storage::templates::TemplateStore;
use marketing_bot::storage::{Backend, FileBackend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketing_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Marketing Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Data dir: {}, HTTP Port: {}",
        config.data_dir.display(),
        config.http_port
    );

    // Wire the stores to file-backed storage
    let backend: Backend = Arc::new(FileBackend::new(&config.data_dir));
    let subscribers = SubscriberStore::new(backend.clone());
    let chats = ChatStore::new(backend.clone());
    let templates = TemplateStore::new(backend.clone());
    let keywords = KeywordStore::new(backend);

    // Initialize bot, dispatch engine and scheduler
    let bot = Bot::new(&config.telegram_bot_token);
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let engine = Arc::new(DispatchEngine::new(transport, subscribers.clone()));
    let scheduler = Arc::new(Scheduler::new(engine.clone()));

    let ctx = BotContext {
        owner_id: config.owner_id,
        subscribers: subscribers.clone(),
        chats: chats.clone(),
        templates: templates.clone(),
        keywords,
        engine: engine.clone(),
        scheduler: scheduler.clone(),
    };
    let handler = BotHandler::new(ctx);

    // Initialize the admin API
    let auth = AuthSettings {
        username: config.api_user.clone(),
        password: config.api_password.clone(),
        jwt_secret: config.jwt_secret.clone(),
    };
    let api = ApiService::new(AppState::new(subscribers, chats, templates, engine, auth));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Admin API starting on port {}", config.http_port);

    // Run both the bot and the API server concurrently
    let bot_task = tokio::spawn(async move {
        let storage = InMemStorage::<SendState>::new();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let api_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, api.router).await {
            tracing::error!("Admin API server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = api_task => {
            if let Err(e) = result {
                tracing::error!("API task error: {}", e);
            }
        }
    }

    // Pending scheduled jobs are not persisted; drop them on shutdown
    scheduler.shutdown();

    info!("Application stopped");
    Ok(())
}
