//! Author table mapping.
//!
//! Authors are the inverse side of authorship: saving one never touches
//! `author_book`, reading one refreshes `books` from it.

use super::crud_repo::{RepoResult, SqliteRepository, Table};
use crate::model::author::Author;
use crate::model::key::{AuthorId, BookId};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use std::collections::BTreeSet;

pub type SqliteAuthorRepository<'conn> = SqliteRepository<'conn, Author>;

impl Table for Author {
    const TABLE: &'static str = "author";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name"];

    fn key_from_raw(raw: i64) -> AuthorId {
        AuthorId::new(raw)
    }

    fn values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Author::with_id(
            row.get("id")?,
            row.get::<_, String>("first_name")?,
            row.get::<_, String>("last_name")?,
        ))
    }

    fn assign_key(&mut self, key: AuthorId) {
        self.assign_id(key);
    }

    fn load_relations(&mut self, conn: &Connection) -> RepoResult<()> {
        let Some(id) = self.id() else {
            return Ok(());
        };
        let mut stmt = conn.prepare(
            "SELECT book_id
             FROM author_book
             WHERE author_id = ?1
             ORDER BY book_id ASC;",
        )?;
        let books = stmt
            .query_map([id], |row| row.get::<_, BookId>(0))?
            .collect::<rusqlite::Result<BTreeSet<BookId>>>()?;
        self.books = books;
        Ok(())
    }
}
