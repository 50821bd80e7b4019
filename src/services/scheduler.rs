//! Deferred dispatch: named one-shot jobs that fire once and are discarded.
//!
//! Jobs live only in process memory. A crash or restart loses pending jobs
//! and there is no cancel operation; both are accepted limitations of the
//! design, not gaps to paper over.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::dispatch::{DispatchEngine, DispatchError, DispatchTarget, OutgoingMessage};

/// Acknowledgement returned when a job is accepted.
#[derive(Debug, Clone)]
pub struct JobAck {
    pub name: String,
    pub target: DispatchTarget,
    pub fire_at: DateTime<Utc>,
}

/// Rejections raised before a job is created. No job is observable after
/// any of these.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("duration must be positive")]
    InvalidDuration,
    #[error("a job named '{0}' is already pending")]
    DuplicateJob(String),
}

/// One-shot job scheduler over the dispatch engine.
///
/// Each job moves `Pending → Fired → Discarded`: it sleeps until its fire
/// time, invokes the engine exactly once with its stored target and
/// message, and is removed from the active set regardless of how many
/// per-recipient deliveries succeeded.
pub struct Scheduler {
    engine: Arc<DispatchEngine>,
    jobs: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl Scheduler {
    pub fn new(engine: Arc<DispatchEngine>) -> Self {
        Self {
            engine,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Defer a dispatch by `delay`. `name` keys the job; passing `None`
    /// generates a unique one. Collisions with a pending job are a caller
    /// error, never silently merged.
    pub fn schedule(
        &self,
        name: Option<String>,
        target: DispatchTarget,
        message: OutgoingMessage,
        delay: Duration,
    ) -> Result<JobAck, ScheduleError> {
        if delay.is_zero() {
            return Err(ScheduleError::InvalidDuration);
        }

        let name = name.unwrap_or_else(|| format!("job-{}", Uuid::new_v4()));
        let fire_at = Utc::now() + chrono::Duration::seconds(delay.as_secs() as i64);

        let mut jobs = self.lock_jobs();
        if jobs.contains_key(&name) {
            return Err(ScheduleError::DuplicateJob(name));
        }

        let engine = self.engine.clone();
        let jobs_handle = self.jobs.clone();
        let job_name = name.clone();
        let job_target = target.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("Executing scheduled job '{job_name}' to target {job_target}");
            match engine.dispatch(&job_target, &message).await {
                Ok(report) => tracing::info!(
                    "Scheduled job '{job_name}' finished: {} sent, {} failed",
                    report.sent,
                    report.failed()
                ),
                // Dispatch failures are job-internal; the job still
                // completes and is discarded.
                Err(DispatchError::NoRecipients) => {
                    tracing::warn!("Scheduled job '{job_name}' had no recipients")
                }
                Err(e) => tracing::error!("Scheduled job '{job_name}' failed: {e}"),
            }
            if let Ok(mut jobs) = jobs_handle.lock() {
                jobs.remove(&job_name);
            }
        });

        jobs.insert(name.clone(), handle);
        tracing::info!("Scheduled job '{name}' to fire at {fire_at} (target {target})");
        Ok(JobAck {
            name,
            target,
            fire_at,
        })
    }

    /// Whether a job is still pending.
    pub fn is_active(&self, name: &str) -> bool {
        self.lock_jobs().contains_key(name)
    }

    /// Names of all pending jobs.
    pub fn active_jobs(&self) -> Vec<String> {
        self.lock_jobs().keys().cloned().collect()
    }

    /// Abort every pending job. Used on process shutdown; pending jobs are
    /// lost, matching the no-persistence contract.
    pub fn shutdown(&self) {
        let mut jobs = self.lock_jobs();
        for (name, handle) in jobs.drain() {
            tracing::warn!("Dropping pending scheduled job '{name}'");
            handle.abort();
        }
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        match self.jobs.lock() {
            Ok(guard) => guard,
            // A panic while holding this lock can only come from a poisoned
            // job map; the map itself is still usable.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
