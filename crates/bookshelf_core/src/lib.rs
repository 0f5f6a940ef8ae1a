//! Core persistence logic for the bookshelf catalog.
//! Entities, repositories, schema and startup seed all live here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CatalogConfig, ConfigError, DbLocation};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::author::Author;
pub use model::authorship::Authorship;
pub use model::book::Book;
pub use model::draft::{AuthorRef, BookRef, CatalogDraft, PublisherRef};
pub use model::key::{AuthorId, BookId, PublisherId};
pub use model::publisher::Publisher;
pub use model::Entity;
pub use repo::{
    load_authorship, CrudRepository, RepoError, RepoResult, SqliteAuthorRepository,
    SqliteBookRepository, SqlitePublisherRepository, SqliteRepository,
};
pub use service::catalog_service::{BookDetails, CatalogCounts, CatalogService, PersistedCatalog};
pub use service::seed::{fixture_draft, seed_catalog};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
