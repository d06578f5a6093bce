//! Book (catalog entry) model and its builder

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A catalog entry. Immutable once created; the ISBN is the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    /// Start building a book field by field
    pub fn builder() -> BookBuilder {
        BookBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}

/// Step-wise constructor for [`Book`].
///
/// Only checks that each field was supplied; contents are not validated.
#[derive(Debug, Clone, Default)]
pub struct BookBuilder {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
}

impl BookBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Finish the book, failing if a field was never set
    pub fn build(self) -> AppResult<Book> {
        let title = self
            .title
            .ok_or_else(|| AppError::Validation("Book title is missing".to_string()))?;
        let author = self
            .author
            .ok_or_else(|| AppError::Validation("Book author is missing".to_string()))?;
        let isbn = self
            .isbn
            .ok_or_else(|| AppError::Validation("Book ISBN is missing".to_string()))?;

        Ok(Book { title, author, isbn })
    }
}
