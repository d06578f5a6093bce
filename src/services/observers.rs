//! Observers of catalog additions

use std::sync::Arc;

use crate::{error::AppResult, models::Book, services::notification::NotificationService};

/// Receives notice of every book added to the catalog
pub trait BookObserver: Send + Sync {
    fn notify_book_added(&self, book: &Book) -> AppResult<()>;
}

/// A patron subscribed to new arrivals; forwards each one as a message
pub struct PatronObserver {
    patron_id: String,
    notifier: Arc<dyn NotificationService>,
}

impl PatronObserver {
    pub fn new(patron_id: impl Into<String>, notifier: Arc<dyn NotificationService>) -> Self {
        Self {
            patron_id: patron_id.into(),
            notifier,
        }
    }

    pub fn patron_id(&self) -> &str {
        &self.patron_id
    }
}

impl std::fmt::Debug for PatronObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatronObserver")
            .field("patron_id", &self.patron_id)
            .finish_non_exhaustive()
    }
}

impl BookObserver for PatronObserver {
    fn notify_book_added(&self, book: &Book) -> AppResult<()> {
        tracing::debug!("Patron {} notified about book \"{}\"", self.patron_id, book.title());
        let message = format!("New book available: \"{}\" by {}", book.title(), book.author());
        self.notifier.notify(&self.patron_id, &message)
    }
}
