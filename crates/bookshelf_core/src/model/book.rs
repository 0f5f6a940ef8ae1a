//! Book entity.
//!
//! # Invariants
//! - Book is the owning side of authorship: saving a book replaces its
//!   `author_book` rows with exactly `authors`.
//! - `publisher` must point at a saved publisher before the book is saved.
//!   Nothing is cascaded; referenced authors and publishers are never
//!   inserted on the book's behalf.

use super::key::{AuthorId, BookId, PublisherId};
use super::{fmt_identity, fmt_linked, same_key, Entity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    id: Option<BookId>,
    pub title: String,
    pub isbn: String,
    pub publisher: Option<PublisherId>,
    #[serde(default)]
    pub authors: BTreeSet<AuthorId>,
}

impl Book {
    /// Creates an unsaved book with no publisher and no authors.
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            isbn: isbn.into(),
            publisher: None,
            authors: BTreeSet::new(),
        }
    }

    /// Creates an unsaved book published by an already saved publisher.
    pub fn published_by(
        title: impl Into<String>,
        isbn: impl Into<String>,
        publisher: PublisherId,
    ) -> Self {
        let mut book = Self::new(title, isbn);
        book.publisher = Some(publisher);
        book
    }

    /// Rebuilds a book whose identity already exists in the store.
    pub fn with_id(
        id: BookId,
        title: impl Into<String>,
        isbn: impl Into<String>,
        publisher: PublisherId,
    ) -> Self {
        let mut book = Self::published_by(title, isbn, publisher);
        book.id = Some(id);
        book
    }

    pub fn id(&self) -> Option<BookId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: BookId) {
        debug_assert!(self.id.is_none() || self.id == Some(id));
        self.id = Some(id);
    }
}

impl Entity for Book {
    type Key = BookId;
    const KIND: &'static str = "book";

    fn key(&self) -> Option<BookId> {
        self.id
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        same_key(self.id, other.id)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" [ISBN {}] ", self.title, self.isbn)?;
        fmt_identity(f, Self::KIND, self.id)?;
        fmt_linked(f, "publisher", self.publisher)?;
        fmt_linked(f, "authors", &self.authors)
    }
}

#[cfg(test)]
mod tests {
    use super::Book;
    use crate::model::key::{AuthorId, BookId, PublisherId};

    #[test]
    fn display_includes_title_isbn_and_key() {
        let book = Book::with_id(BookId::new(3), "Domain Driven Design", "1234", PublisherId::new(1));
        assert_eq!(
            book.to_string(),
            "\"Domain Driven Design\" [ISBN 1234] (book #3) publisher=[#1]"
        );
    }

    #[test]
    fn display_lists_linked_authors() {
        let mut book = Book::new("J2EE Development without EJB", "2244");
        book.authors.insert(AuthorId::new(5));
        assert_eq!(
            book.to_string(),
            "\"J2EE Development without EJB\" [ISBN 2244] (unsaved book) authors=[#5]"
        );
    }

    #[test]
    fn new_book_has_no_publisher_or_authors() {
        let book = Book::new("Untitled", "0000");
        assert!(book.publisher.is_none());
        assert!(book.authors.is_empty());
        assert!(book.id().is_none());
    }
}
