//! Data models for the library catalog

pub mod book;
pub mod loan;
pub mod notification;

// Re-export commonly used types
pub use book::{Book, BookBuilder};
pub use loan::Loan;
pub use notification::Notification;
