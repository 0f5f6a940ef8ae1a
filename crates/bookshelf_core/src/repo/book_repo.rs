//! Book table mapping and the `author_book` join table.
//!
//! # Invariants
//! - Book owns the join rows: every save replaces the book's rows with
//!   exactly its `authors` set, inside the save transaction.
//! - A book without a saved publisher is rejected before any SQL runs.

use super::crud_repo::{RepoError, RepoResult, SqliteRepository, Table};
use crate::model::authorship::Authorship;
use crate::model::book::Book;
use crate::model::key::{AuthorId, BookId, PublisherId};
use crate::model::Entity;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;

pub type SqliteBookRepository<'conn> = SqliteRepository<'conn, Book>;

impl Table for Book {
    const TABLE: &'static str = "book";
    const COLUMNS: &'static [&'static str] = &["title", "isbn", "publisher_id"];

    fn key_from_raw(raw: i64) -> BookId {
        BookId::new(raw)
    }

    fn values(&self) -> RepoResult<Vec<Value>> {
        let publisher = self.publisher.ok_or(RepoError::UnsavedReference {
            entity: Self::KIND,
            field: "publisher",
        })?;
        Ok(vec![
            Value::Text(self.title.clone()),
            Value::Text(self.isbn.clone()),
            Value::Integer(publisher.get()),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Book::with_id(
            row.get("id")?,
            row.get::<_, String>("title")?,
            row.get::<_, String>("isbn")?,
            row.get::<_, PublisherId>("publisher_id")?,
        ))
    }

    fn assign_key(&mut self, key: BookId) {
        self.assign_id(key);
    }

    fn write_relations(&self, conn: &Connection, key: BookId) -> RepoResult<()> {
        conn.execute("DELETE FROM author_book WHERE book_id = ?1;", [key])?;
        let mut insert =
            conn.prepare("INSERT INTO author_book (book_id, author_id) VALUES (?1, ?2);")?;
        for author in &self.authors {
            insert.execute(params![key, author])?;
        }
        Ok(())
    }

    fn load_relations(&mut self, conn: &Connection) -> RepoResult<()> {
        let Some(id) = self.id() else {
            return Ok(());
        };
        let mut stmt = conn.prepare(
            "SELECT author_id
             FROM author_book
             WHERE book_id = ?1
             ORDER BY author_id ASC;",
        )?;
        let authors = stmt
            .query_map([id], |row| row.get::<_, AuthorId>(0))?
            .collect::<rusqlite::Result<BTreeSet<AuthorId>>>()?;
        self.authors = authors;
        Ok(())
    }
}

/// Reads the whole join table as one authorship set.
pub fn load_authorship(conn: &Connection) -> RepoResult<Authorship<AuthorId, BookId>> {
    let mut stmt = conn.prepare(
        "SELECT author_id, book_id
         FROM author_book
         ORDER BY author_id ASC, book_id ASC;",
    )?;
    let links = stmt
        .query_map([], |row| {
            Ok((row.get::<_, AuthorId>(0)?, row.get::<_, BookId>(1)?))
        })?
        .collect::<rusqlite::Result<Authorship<AuthorId, BookId>>>()?;
    Ok(links)
}
