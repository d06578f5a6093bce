//! Business logic services

pub mod catalog;
pub mod notification;
pub mod observers;

pub use catalog::CatalogManager;
pub use notification::{
    build_notifier, ConfiguredNotifier, ConsoleNotifier, LogNotifier, NotificationService,
    OutboxNotifier,
};
pub use observers::{BookObserver, PatronObserver};
