//! Author entity.
//!
//! # Invariants
//! - `books` is the inverse side of authorship. Saving an author never writes
//!   it; the join rows belong to [`Book`](super::book::Book).
//! - Equality compares keys only, so two unsaved authors with identical names
//!   are different authors.

use super::key::{AuthorId, BookId};
use super::{fmt_identity, fmt_linked, same_key, Entity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    id: Option<AuthorId>,
    pub first_name: String,
    pub last_name: String,
    /// Books this author is linked to, as last loaded from the store.
    #[serde(default)]
    pub books: BTreeSet<BookId>,
}

impl Author {
    /// Creates an unsaved author.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            books: BTreeSet::new(),
        }
    }

    /// Rebuilds an author whose identity already exists in the store.
    pub fn with_id(
        id: AuthorId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let mut author = Self::new(first_name, last_name);
        author.id = Some(id);
        author
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn assign_id(&mut self, id: AuthorId) {
        debug_assert!(self.id.is_none() || self.id == Some(id));
        self.id = Some(id);
    }
}

impl Entity for Author {
    type Key = AuthorId;
    const KIND: &'static str = "author";

    fn key(&self) -> Option<AuthorId> {
        self.id
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        same_key(self.id, other.id)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.first_name, self.last_name)?;
        fmt_identity(f, Self::KIND, self.id)?;
        fmt_linked(f, "books", &self.books)
    }
}

#[cfg(test)]
mod tests {
    use super::Author;
    use crate::model::key::{AuthorId, BookId};

    #[test]
    fn unsaved_authors_with_same_name_are_not_equal() {
        let first = Author::new("Eric", "Evans");
        let second = Author::new("Eric", "Evans");
        assert_ne!(first, second);
        assert_ne!(first, first.clone());
    }

    #[test]
    fn equality_ignores_names_once_keys_match() {
        let original = Author::with_id(AuthorId::new(7), "Eric", "Evans");
        let renamed = Author::with_id(AuthorId::new(7), "E.", "Evans");
        assert_eq!(original, renamed);
        assert_ne!(original, Author::with_id(AuthorId::new(8), "Eric", "Evans"));
    }

    #[test]
    fn display_marks_unsaved_authors() {
        assert_eq!(
            Author::new("Rod", "Johnson").to_string(),
            "Rod Johnson (unsaved author)"
        );
        assert_eq!(
            Author::with_id(AuthorId::new(2), "Rod", "Johnson").to_string(),
            "Rod Johnson (author #2)"
        );
    }

    #[test]
    fn display_lists_linked_books() {
        let mut author = Author::with_id(AuthorId::new(1), "Eric", "Evans");
        author.books.extend([BookId::new(4), BookId::new(2)]);
        assert_eq!(author.to_string(), "Eric Evans (author #1) books=[#2, #4]");
    }
}
