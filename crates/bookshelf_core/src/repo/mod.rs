//! Repository layer abstractions and SQLite persistence implementations.
//!
//! # Responsibility
//! - Define one CRUD contract shared by every catalog entity.
//! - Isolate SQLite query details from services and the seed routine.
//!
//! # Invariants
//! - Repositories only run against fully migrated connections.
//! - Repository APIs return semantic errors (`NotFound`, `Unsaved`,
//!   `UnsavedReference`) in addition to store errors.

pub mod author_repo;
pub mod book_repo;
pub mod crud_repo;
pub mod publisher_repo;

pub use author_repo::SqliteAuthorRepository;
pub use book_repo::{load_authorship, SqliteBookRepository};
pub use crud_repo::{CrudRepository, RepoError, RepoResult, SqliteRepository, Table};
pub use publisher_repo::SqlitePublisherRepository;
