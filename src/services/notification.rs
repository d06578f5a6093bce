//! Notification services for loan and return messages
//!
//! The catalog only sees the [`NotificationService`] trait; the transport
//! behind it is picked by the host from [`NotificationConfig`].

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    config::{NotificationChannel, NotificationConfig},
    error::{AppError, AppResult},
    models::Notification,
};

/// Delivers a human-readable message to a borrower
pub trait NotificationService: Send + Sync {
    fn notify(&self, recipient_id: &str, message: &str) -> AppResult<()>;
}

/// The notifier picked from configuration.
///
/// `outbox` is set for the queued channel so the host can read it back.
#[derive(Clone)]
pub struct ConfiguredNotifier {
    pub service: Arc<dyn NotificationService>,
    pub outbox: Option<Arc<OutboxNotifier>>,
}

/// Build the notifier selected by configuration
pub fn build_notifier(config: &NotificationConfig) -> ConfiguredNotifier {
    match config.channel {
        NotificationChannel::Console => ConfiguredNotifier {
            service: Arc::new(ConsoleNotifier),
            outbox: None,
        },
        NotificationChannel::Log => ConfiguredNotifier {
            service: Arc::new(LogNotifier::new(config.sender_name.clone())),
            outbox: None,
        },
        NotificationChannel::Outbox => {
            let outbox = Arc::new(OutboxNotifier::new());
            ConfiguredNotifier {
                service: outbox.clone(),
                outbox: Some(outbox),
            }
        }
    }
}

/// Writes each message to stdout, the way a mail stub would
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn render(recipient_id: &str, message: &str) -> String {
        format!("Sending email to {}: {}", recipient_id, message)
    }
}

impl NotificationService for ConsoleNotifier {
    fn notify(&self, recipient_id: &str, message: &str) -> AppResult<()> {
        println!("{}", Self::render(recipient_id, message));
        Ok(())
    }
}

/// Emits each message as a `tracing` event
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender_name: String,
}

impl LogNotifier {
    pub fn new(sender_name: String) -> Self {
        Self { sender_name }
    }
}

impl NotificationService for LogNotifier {
    fn notify(&self, recipient_id: &str, message: &str) -> AppResult<()> {
        tracing::info!(
            sender = %self.sender_name,
            recipient = %recipient_id,
            "Notification: {}",
            message
        );
        Ok(())
    }
}

/// Queues messages in memory for later dispatch by the host
#[derive(Debug, Default)]
pub struct OutboxNotifier {
    queue: Mutex<Vec<Notification>>,
}

impl OutboxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the queued messages, oldest first
    pub fn messages(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take every queued message, leaving the outbox empty
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationService for OutboxNotifier {
    fn notify(&self, recipient_id: &str, message: &str) -> AppResult<()> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|e| AppError::Notification(format!("Outbox unavailable: {}", e)))?;

        queue.push(Notification::queue(recipient_id, message));
        tracing::debug!("Queued notification for {} ({} pending)", recipient_id, queue.len());

        Ok(())
    }
}
