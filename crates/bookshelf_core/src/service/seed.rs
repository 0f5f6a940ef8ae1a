//! Startup fixture data.
//!
//! # Invariants
//! - Authorship links are set on both sides in memory before any save.
//! - Not idempotent: every call inserts the full fixture again.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::draft::CatalogDraft;
use crate::model::publisher::Publisher;
use crate::repo::RepoResult;
use crate::service::catalog_service::{CatalogService, PersistedCatalog};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Builds the demo catalog: two publishers, two authors, two books.
pub fn fixture_draft() -> CatalogDraft {
    let mut draft = CatalogDraft::new();

    let harper = draft.add_publisher(Publisher::new("Harper Collins", "USA"));
    let eric = draft.add_author(Author::new("Eric", "Evans"));
    let ddd = draft.add_book(Book::new("Domain Driven Design", "1234"), harper);
    draft.link(eric, ddd);

    let helion = draft.add_publisher(Publisher::new("Helion", "USA"));
    let rod = draft.add_author(Author::new("Rod", "Johnson"));
    let j2ee = draft.add_book(Book::new("J2EE Development without EJB", "2244"), helion);
    draft.link(rod, j2ee);

    draft
}

/// Persists the fixture catalog through the SQLite repositories.
pub fn seed_catalog(conn: &Connection) -> RepoResult<PersistedCatalog> {
    let started_at = Instant::now();
    info!("event=seed module=seed status=start");

    let result =
        CatalogService::sqlite(conn).and_then(|service| service.persist_draft(fixture_draft()));
    match &result {
        Ok(catalog) => info!(
            "event=seed module=seed status=ok duration_ms={} books={}",
            started_at.elapsed().as_millis(),
            catalog.books.len()
        ),
        Err(err) => error!(
            "event=seed module=seed status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
