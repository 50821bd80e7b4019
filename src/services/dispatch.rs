//! Message dispatch: resolve a send target into recipients and deliver
//! with per-recipient failure isolation.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::storage::subscribers::SubscriberStore;
use crate::storage::templates::{MessageButton, Template};
use crate::storage::StorageError;

/// A single delivery destination, as the transport addresses it.
///
/// Numeric identifiers address users and chats directly; anything else is
/// carried as an opaque handle (e.g. `@channelname`) and left for the
/// transport to resolve. No validation happens here: arbitrary identifiers
/// are accepted and attempted, and a bad one surfaces as an ordinary
/// delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Id(i64),
    Handle(String),
}

impl Recipient {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(id) => Recipient::Id(id),
            Err(_) => Recipient::Handle(raw.to_string()),
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipient::Id(id) => write!(f, "{id}"),
            Recipient::Handle(handle) => f.write_str(handle),
        }
    }
}

/// Logical send target before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchTarget {
    /// Every known subscriber.
    AllSubscribers,
    /// One literal chat id or handle.
    Single(Recipient),
}

impl DispatchTarget {
    /// The literal token `all` selects every subscriber; any other string
    /// is a single destination.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            DispatchTarget::AllSubscribers
        } else {
            DispatchTarget::Single(Recipient::parse(raw))
        }
    }
}

impl std::fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchTarget::AllSubscribers => f.write_str("all"),
            DispatchTarget::Single(recipient) => write!(f, "{recipient}"),
        }
    }
}

/// Fully rendered outgoing payload: HTML body plus at most one URL button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub body: String,
    pub button: Option<MessageButton>,
}

impl OutgoingMessage {
    /// Plain message without a button.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            button: None,
        }
    }

    /// Render a stored template, attaching its button when the stored pair
    /// is complete.
    pub fn from_template(template: &Template) -> Self {
        Self {
            body: template.content.clone(),
            button: template.button(),
        }
    }
}

/// Failed delivery attempt for one recipient.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    pub recipient: Recipient,
    pub reason: String,
}

/// Outcome of one dispatch operation. Ephemeral, never persisted.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Error produced by a single delivery attempt.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Narrow seam to the messaging transport.
///
/// The engine depends only on this signature; authentication, connection
/// management, rate limiting and per-attempt timeouts belong to the
/// implementation behind it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, recipient: &Recipient, message: &OutgoingMessage) -> Result<(), TransportError>;
}

/// Errors that abort a dispatch before any delivery work happens.
///
/// Partial failure is never an error: it is reported through the counts in
/// [`DeliveryReport`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no subscribers have started the bot yet")]
    NoRecipients,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolves targets against the subscriber store and drives deliveries.
///
/// Deliveries within one dispatch run sequentially, one attempt per
/// recipient; each attempt awaits the transport and a failure is recorded
/// without aborting or delaying the rest of the batch.
pub struct DispatchEngine {
    transport: Arc<dyn Transport>,
    subscribers: SubscriberStore,
}

impl DispatchEngine {
    pub fn new(transport: Arc<dyn Transport>, subscribers: SubscriberStore) -> Self {
        Self {
            transport,
            subscribers,
        }
    }

    /// Resolve `target` and deliver `message` to every recipient it names.
    ///
    /// Returns [`DispatchError::NoRecipients`] only when `all` was
    /// requested and no subscriber is known; an unreachable single target
    /// is an ordinary counted failure, not an error.
    pub async fn dispatch(
        &self,
        target: &DispatchTarget,
        message: &OutgoingMessage,
    ) -> Result<DeliveryReport, DispatchError> {
        let recipients: Vec<Recipient> = match target {
            DispatchTarget::AllSubscribers => {
                self.subscribers.list()?.into_iter().map(Recipient::Id).collect()
            }
            DispatchTarget::Single(recipient) => vec![recipient.clone()],
        };

        if recipients.is_empty() {
            return Err(DispatchError::NoRecipients);
        }

        let mut report = DeliveryReport::default();
        for recipient in &recipients {
            match self.transport.deliver(recipient, message).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    tracing::error!("Failed to send message to {recipient}: {e}");
                    report.failures.push(DeliveryFailure {
                        recipient: recipient.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Dispatch to {target} finished: {} sent, {} failed",
            report.sent,
            report.failed()
        );
        Ok(report)
    }
}
