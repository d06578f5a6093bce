//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message handed to a notification service, kept by queued dispatchers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient_id: String,
    pub message: String,
    pub queued_at: DateTime<Utc>,
}

impl Notification {
    /// Stamp a message for `recipient_id` with the current time
    pub fn queue(recipient_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            message: message.into(),
            queued_at: Utc::now(),
        }
    }
}
