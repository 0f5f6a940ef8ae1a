//! Catalog domain model: authors, books, publishers and their links.
//!
//! # Responsibility
//! - Define entity shapes and identity-by-key semantics.
//! - Keep the author/book relationship consistent from both directions.
//!
//! # Invariants
//! - An entity key is assigned once, on first save, and never changes.
//! - Two entities are equal only when both carry the same assigned key.
//!   Unsaved entities are never equal to anything.

pub mod author;
pub mod authorship;
pub mod book;
pub mod draft;
pub mod key;
pub mod publisher;

use std::fmt::{Debug, Display};

/// Shared identity contract for persisted catalog records.
pub trait Entity {
    /// Surrogate key type assigned by the store.
    type Key: Copy + Ord + Debug + Display + Into<i64>;

    /// Lowercase entity name used in errors and log events.
    const KIND: &'static str;

    /// Returns the store-assigned key, or `None` when never saved.
    fn key(&self) -> Option<Self::Key>;

    /// Returns whether this entity has been saved at least once.
    fn is_persisted(&self) -> bool {
        self.key().is_some()
    }
}

/// Key-only equality shared by every entity.
pub(crate) fn same_key<K: PartialEq>(left: Option<K>, right: Option<K>) -> bool {
    matches!((left, right), (Some(a), Some(b)) if a == b)
}

/// Writes the trailing `(kind #key)` or `(unsaved kind)` marker.
pub(crate) fn fmt_identity<K: Display>(
    f: &mut std::fmt::Formatter<'_>,
    kind: &str,
    key: Option<K>,
) -> std::fmt::Result {
    match key {
        Some(key) => write!(f, "({kind} #{key})"),
        None => write!(f, "(unsaved {kind})"),
    }
}

/// Writes ` label=[#a, #b]` for a non-empty key set, nothing otherwise.
pub(crate) fn fmt_linked<K: Display>(
    f: &mut std::fmt::Formatter<'_>,
    label: &str,
    keys: impl IntoIterator<Item = K>,
) -> std::fmt::Result {
    let keys = keys
        .into_iter()
        .map(|key| format!("#{key}"))
        .collect::<Vec<_>>();
    if keys.is_empty() {
        return Ok(());
    }
    write!(f, " {label}=[{}]", keys.join(", "))
}
