//! Publisher table mapping.

use super::crud_repo::{RepoResult, SqliteRepository, Table};
use crate::model::key::PublisherId;
use crate::model::publisher::Publisher;
use rusqlite::types::Value;
use rusqlite::Row;

pub type SqlitePublisherRepository<'conn> = SqliteRepository<'conn, Publisher>;

impl Table for Publisher {
    const TABLE: &'static str = "publisher";
    const COLUMNS: &'static [&'static str] = &["name", "country"];

    fn key_from_raw(raw: i64) -> PublisherId {
        PublisherId::new(raw)
    }

    fn values(&self) -> RepoResult<Vec<Value>> {
        Ok(vec![
            Value::Text(self.name.clone()),
            Value::Text(self.country.clone()),
        ])
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Publisher::with_id(
            row.get("id")?,
            row.get::<_, String>("name")?,
            row.get::<_, String>("country")?,
        ))
    }

    fn assign_key(&mut self, key: PublisherId) {
        self.assign_id(key);
    }
}
