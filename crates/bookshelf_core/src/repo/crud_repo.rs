//! Generic CRUD contract and its SQLite implementation.
//!
//! # Responsibility
//! - Offer the same save/find/count/delete surface for every entity type.
//! - Keep SQL text generation in one place; entity-specific column mapping
//!   lives in [`Table`] impls next to each entity repository.
//!
//! # Invariants
//! - `save` on an unsaved entity inserts and assigns a fresh key.
//! - `save` on a saved entity updates that row and never changes its key.
//! - Every `save` is one transaction, join rows included.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::Entity;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error, constraint violations included.
    Db(DbError),
    /// No row with this key exists.
    NotFound { entity: &'static str, key: i64 },
    /// Operation needs a key but the entity was never saved.
    Unsaved { entity: &'static str },
    /// A referenced entity has not been saved, so there is no key to store.
    UnsavedReference {
        entity: &'static str,
        field: &'static str,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether SQLite rejected the write on a foreign-key constraint.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Unsaved { entity } => write!(f, "{entity} has not been saved yet"),
            Self::UnsavedReference { entity, field } => {
                write!(f, "{entity}.{field} refers to an entity that has not been saved")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence operations shared by every catalog entity.
pub trait CrudRepository<E: Entity> {
    /// Inserts an unsaved entity or updates a saved one.
    ///
    /// Returns the entity with its key populated.
    fn save(&self, entity: E) -> RepoResult<E>;

    /// Saves each entity in order, stopping at the first failure.
    fn save_all(&self, entities: Vec<E>) -> RepoResult<Vec<E>> {
        entities.into_iter().map(|entity| self.save(entity)).collect()
    }

    fn find_by_id(&self, key: E::Key) -> RepoResult<Option<E>>;

    /// Every stored entity of this type, ascending by key.
    fn find_all(&self) -> RepoResult<Vec<E>>;

    /// Entities for the keys that exist; missing keys are skipped.
    fn find_all_by_id(&self, keys: &[E::Key]) -> RepoResult<Vec<E>> {
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(entity) = self.find_by_id(*key)? {
                found.push(entity);
            }
        }
        Ok(found)
    }

    fn exists_by_id(&self, key: E::Key) -> RepoResult<bool>;

    fn count(&self) -> RepoResult<u64>;

    /// Removes the row. Returns `NotFound` when it does not exist.
    fn delete_by_id(&self, key: E::Key) -> RepoResult<()>;

    /// Removes the row behind a saved entity.
    fn delete(&self, entity: &E) -> RepoResult<()> {
        match entity.key() {
            Some(key) => self.delete_by_id(key),
            None => Err(RepoError::Unsaved { entity: E::KIND }),
        }
    }

    /// Removes every row of this type and returns how many were removed.
    fn delete_all(&self) -> RepoResult<u64>;
}

/// Row mapping between an entity and its SQLite table.
///
/// The key column is always `id INTEGER PRIMARY KEY`.
pub trait Table: Entity + Sized {
    const TABLE: &'static str;
    /// Non-key columns, in the order produced by [`Table::values`].
    const COLUMNS: &'static [&'static str];

    fn key_from_raw(raw: i64) -> Self::Key;

    /// Column values for insert/update, in `COLUMNS` order.
    fn values(&self) -> RepoResult<Vec<Value>>;

    /// Builds an entity from a row holding `id` plus `COLUMNS`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    fn assign_key(&mut self, key: Self::Key);

    /// Writes rows owned by this entity outside its own table.
    fn write_relations(&self, _conn: &Connection, _key: Self::Key) -> RepoResult<()> {
        Ok(())
    }

    /// Refreshes relationship views after the row was read.
    fn load_relations(&mut self, _conn: &Connection) -> RepoResult<()> {
        Ok(())
    }
}

/// SQLite-backed repository for any [`Table`] entity.
pub struct SqliteRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: Table> SqliteRepository<'conn, E> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, E::TABLE)?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    fn insert(&self, conn: &Connection, values: Vec<Value>) -> RepoResult<E::Key> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({placeholders});",
                E::TABLE,
                E::COLUMNS.join(", ")
            ),
            params_from_iter(values),
        )?;
        Ok(E::key_from_raw(conn.last_insert_rowid()))
    }

    fn update(&self, conn: &Connection, key: E::Key, mut values: Vec<Value>) -> RepoResult<()> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        values.push(Value::Integer(key.into()));
        let changed = conn.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE id = ?{};",
                E::TABLE,
                E::COLUMNS.len() + 1
            ),
            params_from_iter(values),
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::KIND,
                key: key.into(),
            });
        }
        Ok(())
    }

    fn read_row(&self, row: &Row<'_>) -> RepoResult<E> {
        let mut entity = E::from_row(row)?;
        entity.load_relations(self.conn)?;
        Ok(entity)
    }
}

impl<E: Table> CrudRepository<E> for SqliteRepository<'_, E> {
    fn save(&self, mut entity: E) -> RepoResult<E> {
        let values = entity.values()?;
        let tx = self.conn.unchecked_transaction()?;

        let key = match entity.key() {
            Some(key) => {
                self.update(&tx, key, values)?;
                key
            }
            None => {
                let key = self.insert(&tx, values)?;
                entity.assign_key(key);
                key
            }
        };
        entity.write_relations(&tx, key)?;
        tx.commit()?;

        debug!(
            "event=entity_save module=repo status=ok entity={} key={key}",
            E::KIND
        );
        Ok(entity)
    }

    fn find_by_id(&self, key: E::Key) -> RepoResult<Option<E>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let raw: i64 = key.into();
        let mut rows = stmt.query([raw])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.read_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(self.read_row(row)?);
        }

        Ok(entities)
    }

    fn exists_by_id(&self, key: E::Key) -> RepoResult<bool> {
        let raw: i64 = key.into();
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", E::TABLE),
            [raw],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", E::TABLE),
            [],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }

    fn delete_by_id(&self, key: E::Key) -> RepoResult<()> {
        let raw: i64 = key.into();
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", E::TABLE),
            [raw],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::KIND,
                key: raw,
            });
        }

        debug!(
            "event=entity_delete module=repo status=ok entity={} key={key}",
            E::KIND
        );
        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        let removed = self
            .conn
            .execute(&format!("DELETE FROM {};", E::TABLE), [])?;
        debug!(
            "event=entity_delete_all module=repo status=ok entity={} removed={removed}",
            E::KIND
        );
        Ok(removed as u64)
    }
}

fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
