//! Catalog management service
//!
//! [`CatalogManager`] owns the book collection and the loan ledger and is the
//! only place that talks to observers and the notification service. Lookups
//! that miss are reported through `bool`/`Option`, never as errors.

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    models::{Book, Loan},
    services::{notification::NotificationService, observers::BookObserver},
};

pub struct CatalogManager {
    books: Vec<Book>,
    loans: Vec<Loan>,
    observers: Vec<Arc<dyn BookObserver>>,
    notifier: Arc<dyn NotificationService>,
}

impl fmt::Debug for CatalogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogManager")
            .field("books", &self.books)
            .field("loans", &self.loans)
            .field("observers_count", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CatalogManager {
    pub fn new(notifier: Arc<dyn NotificationService>) -> Self {
        Self {
            books: Vec::new(),
            loans: Vec::new(),
            observers: Vec::new(),
            notifier,
        }
    }

    /// Register an observer for future additions.
    ///
    /// No uniqueness check: registering the same observer twice delivers
    /// every addition to it twice.
    pub fn add_observer(&mut self, observer: Arc<dyn BookObserver>) {
        self.observers.push(observer);
        tracing::debug!("Registered observer #{}", self.observers.len());
    }

    /// Create a book, append it to the catalog and notify every observer
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> Book {
        self.add(Book::new(title, author, isbn))
    }

    /// Append an already built book and notify every observer.
    ///
    /// Duplicate ISBNs are accepted.
    pub fn add(&mut self, book: Book) -> Book {
        tracing::info!("Catalog: adding \"{}\" (ISBN {})", book.title(), book.isbn());
        self.books.push(book.clone());
        self.notify_observers(&book);
        book
    }

    /// Remove the first book with this ISBN. Active loans on it are left open.
    pub fn remove_book(&mut self, isbn: &str) -> bool {
        match self.books.iter().position(|b| b.isbn() == isbn) {
            Some(index) => {
                let removed = self.books.remove(index);
                tracing::info!("Catalog: removed \"{}\" (ISBN {})", removed.title(), isbn);
                true
            }
            None => {
                tracing::debug!("Catalog: no book with ISBN {} to remove", isbn);
                false
            }
        }
    }

    /// Books whose title contains `title` (case-sensitive), in catalog order
    pub fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|b| b.title().contains(title))
            .cloned()
            .collect()
    }

    /// Books whose author contains `author` (case-sensitive), in catalog order
    pub fn search_by_author(&self, author: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|b| b.author().contains(author))
            .cloned()
            .collect()
    }

    /// First book with exactly this ISBN
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn() == isbn)
    }

    /// Lend a book to a borrower and tell them about it.
    ///
    /// Returns `None` without touching the ledger when the ISBN is unknown.
    pub fn loan_book(&mut self, isbn: &str, borrower_id: &str) -> Option<Loan> {
        let Some(book) = self.search_by_isbn(isbn) else {
            tracing::warn!("Loan refused: no book with ISBN {} (borrower {})", isbn, borrower_id);
            return None;
        };
        let message = format!("You have borrowed the book \"{}\"", book.title());

        let loan = Loan::issue(isbn, borrower_id);
        self.loans.push(loan.clone());
        tracing::info!("Loan opened: ISBN {} to {}", isbn, borrower_id);

        self.send(borrower_id, &message);
        Some(loan)
    }

    /// Close the first loan matching both keys.
    ///
    /// The confirmation is only sent while the book is still catalogued; a
    /// loan on a removed book is closed silently.
    pub fn return_book(&mut self, isbn: &str, borrower_id: &str) -> Option<Loan> {
        let Some(index) = self.loans.iter().position(|l| l.matches(isbn, borrower_id)) else {
            tracing::debug!("Return ignored: no loan of ISBN {} for {}", isbn, borrower_id);
            return None;
        };
        let loan = self.loans.remove(index);
        tracing::info!("Loan closed: ISBN {} from {}", isbn, borrower_id);

        match self.search_by_isbn(isbn) {
            Some(book) => {
                let message = format!(
                    "You have returned the book with ISBN {} (\"{}\"). Thank you",
                    isbn,
                    book.title()
                );
                self.send(borrower_id, &message);
            }
            None => {
                tracing::warn!("Returned ISBN {} is no longer catalogued, no confirmation sent", isbn);
            }
        }

        Some(loan)
    }

    /// All books, in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All active loans, oldest first
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Active loans held by one borrower
    pub fn loans_for(&self, borrower_id: &str) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|l| l.borrower_id == borrower_id)
            .collect()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The notification service loans and returns are reported through
    pub fn notifier(&self) -> Arc<dyn NotificationService> {
        Arc::clone(&self.notifier)
    }

    // A failing or panicking observer is logged and skipped; the rest still run.
    fn notify_observers(&self, book: &Book) {
        for (idx, observer) in self.observers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| observer.notify_book_added(book))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Observer #{} failed for ISBN {}: {}", idx + 1, book.isbn(), e);
                }
                Err(_) => {
                    tracing::warn!("Observer #{} panicked for ISBN {}", idx + 1, book.isbn());
                }
            }
        }
    }

    fn send(&self, recipient_id: &str, message: &str) {
        match panic::catch_unwind(AssertUnwindSafe(|| self.notifier.notify(recipient_id, message))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Failed to notify {}: {}", recipient_id, e),
            Err(_) => tracing::warn!("Notifier panicked while notifying {}", recipient_id),
        }
    }
}
