//! Loan (borrow) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An outstanding borrowing, open from issue until return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub isbn: String,
    pub borrower_id: String,
    pub issued_at: DateTime<Utc>,
}

impl Loan {
    /// Open a loan stamped with the current time
    pub fn issue(isbn: impl Into<String>, borrower_id: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            borrower_id: borrower_id.into(),
            issued_at: Utc::now(),
        }
    }

    /// Whether this loan covers the given book and borrower
    pub fn matches(&self, isbn: &str, borrower_id: &str) -> bool {
        self.isbn == isbn && self.borrower_id == borrower_id
    }
}
