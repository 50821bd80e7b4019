/// Target resolution and per-recipient delivery
pub mod dispatch;
/// Deferred dispatch keyed by unique job names
pub mod scheduler;
