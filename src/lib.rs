//! Library Catalog
//!
//! An in-memory library catalog: books, a loan ledger, observers notified of
//! new arrivals and a pluggable notification service for borrowers.

use std::sync::{Arc, Mutex};

use crate::services::OutboxNotifier;

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::AppConfig;
pub use error::{AppError, AppResult};
pub use models::{Book, Loan};
pub use services::CatalogManager;

/// Application state shared by everything the host wires together.
///
/// Holds the one catalog of the process behind a single lock, so every
/// mutating operation is serialized.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    catalog: Arc<Mutex<CatalogManager>>,
    outbox: Option<Arc<OutboxNotifier>>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: CatalogManager) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(Mutex::new(catalog)),
            outbox: None,
        }
    }

    /// Build the catalog with the notifier named in `config`
    pub fn from_config(config: AppConfig) -> Self {
        let notifier = services::build_notifier(&config.notifications);
        let mut state = Self::new(config, CatalogManager::new(notifier.service));
        state.outbox = notifier.outbox;
        state
    }

    /// Queued notifications, when the outbox channel is configured
    pub fn outbox(&self) -> Option<&Arc<OutboxNotifier>> {
        self.outbox.as_ref()
    }

    /// Run `f` with exclusive access to the catalog.
    ///
    /// A panic in an earlier holder does not lock the catalog out: every
    /// operation leaves the collections consistent before calling out.
    pub fn with_catalog<R>(&self, f: impl FnOnce(&mut CatalogManager) -> R) -> R {
        let mut catalog = self.catalog.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Catalog lock was poisoned by a panicking caller, recovering");
            poisoned.into_inner()
        });
        f(&mut catalog)
    }
}
