//! # Marketing Bot
//!
//! A Telegram bot for broadcast marketing with an HTTP admin API.
//!
//! ## Features
//! - Subscriber registration on first contact and broadcasts to all of them
//! - Named destination chats and reusable message templates with an
//!   optional call-to-action button
//! - Immediate and scheduled sends with per-recipient failure isolation
//! - Keyword-based auto-replies
//! - Bearer-token HTTP mirror of the template and messaging operations
//!
//! ## Limitations
//! - Stores are plain JSON files with overwrite-on-write semantics and no
//!   locking; concurrent writers race and the last write wins.
//! - Scheduled jobs live in process memory only: there is no cancel
//!   operation and pending jobs are lost when the process exits.

/// HTTP admin API and bearer-token authentication
pub mod api;
/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// The dispatch engine and job scheduler
pub mod services;
/// JSON file-backed stores
pub mod storage;
/// Utility functions for durations, keywords and formatting
pub mod utils;
