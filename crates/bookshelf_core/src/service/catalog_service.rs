//! Catalog use-case service.
//!
//! # Responsibility
//! - Persist draft graphs in an order that satisfies foreign keys.
//! - Assemble read models that join books with publishers and authors.
//!
//! # Invariants
//! - Publishers are saved before the books that reference them.
//! - Authors are saved before the books that link them, since book saves
//!   write the join rows.
//! - Each save is its own unit of work; a failure midway leaves earlier
//!   saves in place.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::draft::{AuthorRef, BookRef, CatalogDraft};
use crate::model::publisher::Publisher;
use crate::repo::{
    CrudRepository, RepoResult, SqliteAuthorRepository, SqliteBookRepository,
    SqlitePublisherRepository,
};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

/// Entities of a draft after persistence, in the order they were added.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedCatalog {
    pub publishers: Vec<Publisher>,
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
}

/// Book joined with its publisher and authors.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetails {
    pub book: Book,
    pub publisher: Option<Publisher>,
    pub authors: Vec<Author>,
}

/// Row counts per entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub publishers: u64,
    pub authors: u64,
    pub books: u64,
}

/// Use-case service over the three entity repositories.
pub struct CatalogService<P, A, B> {
    publishers: P,
    authors: A,
    books: B,
}

impl<'conn>
    CatalogService<
        SqlitePublisherRepository<'conn>,
        SqliteAuthorRepository<'conn>,
        SqliteBookRepository<'conn>,
    >
{
    /// Builds a service whose repositories share one migrated connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqlitePublisherRepository::try_new(conn)?,
            SqliteAuthorRepository::try_new(conn)?,
            SqliteBookRepository::try_new(conn)?,
        ))
    }
}

impl<P, A, B> CatalogService<P, A, B>
where
    P: CrudRepository<Publisher>,
    A: CrudRepository<Author>,
    B: CrudRepository<Book>,
{
    pub fn new(publishers: P, authors: A, books: B) -> Self {
        Self {
            publishers,
            authors,
            books,
        }
    }

    pub fn publishers(&self) -> &P {
        &self.publishers
    }

    pub fn authors(&self) -> &A {
        &self.authors
    }

    pub fn books(&self) -> &B {
        &self.books
    }

    /// Saves every entity of `draft` and resolves its handles to keys.
    ///
    /// Returned authors carry the keys of their books in `books`, matching
    /// what a fresh read from the store would show.
    pub fn persist_draft(&self, draft: CatalogDraft) -> RepoResult<PersistedCatalog> {
        let parts = draft.into_parts();

        let publishers = self.publishers.save_all(parts.publishers)?;
        let mut authors = self.authors.save_all(parts.authors)?;

        let mut books = Vec::with_capacity(parts.books.len());
        for (index, mut book) in parts.books.into_iter().enumerate() {
            let publisher = parts.book_publishers[index];
            book.publisher = publishers[publisher.index()].id();
            book.authors.extend(
                parts
                    .authorship
                    .authors_of(BookRef::from_index(index))
                    .filter_map(|author| authors[author.index()].id()),
            );
            books.push(self.books.save(book)?);
        }

        for (index, author) in authors.iter_mut().enumerate() {
            author.books.extend(
                parts
                    .authorship
                    .books_of(AuthorRef::from_index(index))
                    .filter_map(|book| books[book.index()].id()),
            );
        }

        info!(
            "event=draft_persist module=service status=ok publishers={} authors={} books={} links={}",
            publishers.len(),
            authors.len(),
            books.len(),
            parts.authorship.len()
        );
        Ok(PersistedCatalog {
            publishers,
            authors,
            books,
        })
    }

    /// Every book with its publisher and authors resolved, ascending by key.
    pub fn book_details(&self) -> RepoResult<Vec<BookDetails>> {
        let mut details = Vec::new();
        for book in self.books.find_all()? {
            let publisher = match book.publisher {
                Some(key) => self.publishers.find_by_id(key)?,
                None => None,
            };
            let author_keys: Vec<_> = book.authors.iter().copied().collect();
            let authors = self.authors.find_all_by_id(&author_keys)?;
            details.push(BookDetails {
                book,
                publisher,
                authors,
            });
        }
        Ok(details)
    }

    pub fn counts(&self) -> RepoResult<CatalogCounts> {
        Ok(CatalogCounts {
            publishers: self.publishers.count()?,
            authors: self.authors.count()?,
            books: self.books.count()?,
        })
    }
}
