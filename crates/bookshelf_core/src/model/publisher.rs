//! Publisher entity.
//!
//! Publishers do not track their books; `book.publisher_id` is the only link.

use super::key::PublisherId;
use super::{fmt_identity, same_key, Entity};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publisher {
    id: Option<PublisherId>,
    pub name: String,
    pub country: String,
}

impl Publisher {
    /// Creates an unsaved publisher.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Rebuilds a publisher whose identity already exists in the store.
    pub fn with_id(id: PublisherId, name: impl Into<String>, country: impl Into<String>) -> Self {
        let mut publisher = Self::new(name, country);
        publisher.id = Some(id);
        publisher
    }

    pub fn id(&self) -> Option<PublisherId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: PublisherId) {
        debug_assert!(self.id.is_none() || self.id == Some(id));
        self.id = Some(id);
    }
}

impl Entity for Publisher {
    type Key = PublisherId;
    const KIND: &'static str = "publisher";

    fn key(&self) -> Option<PublisherId> {
        self.id
    }
}

impl PartialEq for Publisher {
    fn eq(&self, other: &Self) -> bool {
        same_key(self.id, other.id)
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} ", self.name, self.country)?;
        fmt_identity(f, Self::KIND, self.id)
    }
}
