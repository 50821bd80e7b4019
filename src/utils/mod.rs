/// Formatting helpers for absolute timestamps in user-facing replies
pub mod datetime;
/// Compact duration grammar used by the scheduler front end
pub mod duration;
/// Escaping helpers for Telegram HTML parse mode
pub mod html;
/// Keyword matching for auto-replies
pub mod text;
