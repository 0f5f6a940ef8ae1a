//! In-memory staging graph for entities that have no key yet.
//!
//! Unsaved entities cannot reference each other by key, so the draft hands
//! out positional handles instead. Links made through the draft are visible
//! from both sides immediately, before anything reaches the store.

use super::author::Author;
use super::authorship::Authorship;
use super::book::Book;
use super::publisher::Publisher;

/// Handle to an author added to a [`CatalogDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorRef(usize);

/// Handle to a book added to a [`CatalogDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookRef(usize);

/// Handle to a publisher added to a [`CatalogDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublisherRef(usize);

impl AuthorRef {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl BookRef {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl PublisherRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Entity graph under construction.
///
/// Handles are only meaningful for the draft that issued them; accessors
/// panic when given a handle from another draft that is out of range.
#[derive(Debug, Clone, Default)]
pub struct CatalogDraft {
    publishers: Vec<Publisher>,
    authors: Vec<Author>,
    books: Vec<Book>,
    book_publishers: Vec<PublisherRef>,
    authorship: Authorship<AuthorRef, BookRef>,
}

/// Draft contents split apart for persistence, in insertion order.
#[derive(Debug)]
pub struct DraftParts {
    pub publishers: Vec<Publisher>,
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
    /// Publisher handle for each book, indexed like `books`.
    pub book_publishers: Vec<PublisherRef>,
    pub authorship: Authorship<AuthorRef, BookRef>,
}

impl CatalogDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_publisher(&mut self, publisher: Publisher) -> PublisherRef {
        self.publishers.push(publisher);
        PublisherRef(self.publishers.len() - 1)
    }

    pub fn add_author(&mut self, author: Author) -> AuthorRef {
        self.authors.push(author);
        AuthorRef(self.authors.len() - 1)
    }

    /// Adds a book published by a publisher already in this draft.
    ///
    /// # Panics
    /// Panics when `publisher` was not issued by this draft.
    pub fn add_book(&mut self, book: Book, publisher: PublisherRef) -> BookRef {
        assert!(
            publisher.0 < self.publishers.len(),
            "publisher handle {} does not belong to this draft",
            publisher.0
        );
        self.books.push(book);
        self.book_publishers.push(publisher);
        BookRef(self.books.len() - 1)
    }

    /// Records authorship on both sides. Returns `false` when already linked.
    ///
    /// # Panics
    /// Panics when either handle was not issued by this draft.
    pub fn link(&mut self, author: AuthorRef, book: BookRef) -> bool {
        assert!(author.0 < self.authors.len(), "unknown author handle");
        assert!(book.0 < self.books.len(), "unknown book handle");
        self.authorship.link(author, book)
    }

    /// # Panics
    /// Panics when `handle` was not issued by this draft.
    pub fn publisher(&self, handle: PublisherRef) -> &Publisher {
        &self.publishers[handle.0]
    }

    /// # Panics
    /// Panics when `handle` was not issued by this draft.
    pub fn author(&self, handle: AuthorRef) -> &Author {
        &self.authors[handle.0]
    }

    /// # Panics
    /// Panics when `handle` was not issued by this draft.
    pub fn book(&self, handle: BookRef) -> &Book {
        &self.books[handle.0]
    }

    /// # Panics
    /// Panics when `book` was not issued by this draft.
    pub fn publisher_of(&self, book: BookRef) -> PublisherRef {
        self.book_publishers[book.0]
    }

    pub fn books_of(&self, author: AuthorRef) -> impl Iterator<Item = BookRef> + '_ {
        self.authorship.books_of(author)
    }

    pub fn authors_of(&self, book: BookRef) -> impl Iterator<Item = AuthorRef> + '_ {
        self.authorship.authors_of(book)
    }

    pub fn into_parts(self) -> DraftParts {
        DraftParts {
            publishers: self.publishers,
            authors: self.authors,
            books: self.books,
            book_publishers: self.book_publishers,
            authorship: self.authorship,
        }
    }
}
