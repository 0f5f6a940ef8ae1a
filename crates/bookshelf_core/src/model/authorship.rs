//! Many-to-many author/book links.
//!
//! One set of `(author, book)` pairs is authoritative; the per-author and
//! per-book views are derived from it and kept in step on every mutation.
//! Generic over the identifier so the same structure serves unsaved drafts
//! (handles) and stored rows (keys).

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship<A, B> {
    pairs: BTreeSet<(A, B)>,
    by_author: BTreeMap<A, BTreeSet<B>>,
    by_book: BTreeMap<B, BTreeSet<A>>,
}

impl<A, B> Default for Authorship<A, B> {
    fn default() -> Self {
        Self {
            pairs: BTreeSet::new(),
            by_author: BTreeMap::new(),
            by_book: BTreeMap::new(),
        }
    }
}

impl<A: Ord + Copy, B: Ord + Copy> Authorship<A, B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `author` and `book` on both sides.
    ///
    /// Returns `false` when the pair was already linked.
    pub fn link(&mut self, author: A, book: B) -> bool {
        if !self.pairs.insert((author, book)) {
            return false;
        }
        self.by_author.entry(author).or_default().insert(book);
        self.by_book.entry(book).or_default().insert(author);
        true
    }

    /// Removes the link on both sides. Returns `false` when it did not exist.
    pub fn unlink(&mut self, author: A, book: B) -> bool {
        if !self.pairs.remove(&(author, book)) {
            return false;
        }
        remove_from_view(&mut self.by_author, author, book);
        remove_from_view(&mut self.by_book, book, author);
        true
    }

    pub fn contains(&self, author: A, book: B) -> bool {
        self.pairs.contains(&(author, book))
    }

    /// Books linked to `author`, in ascending order.
    pub fn books_of(&self, author: A) -> impl Iterator<Item = B> + '_ {
        self.by_author
            .get(&author)
            .into_iter()
            .flat_map(|books| books.iter().copied())
    }

    /// Authors linked to `book`, in ascending order.
    pub fn authors_of(&self, book: B) -> impl Iterator<Item = A> + '_ {
        self.by_book
            .get(&book)
            .into_iter()
            .flat_map(|authors| authors.iter().copied())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (A, B)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<A: Ord + Copy, B: Ord + Copy> FromIterator<(A, B)> for Authorship<A, B> {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut authorship = Self::new();
        for (author, book) in iter {
            authorship.link(author, book);
        }
        authorship
    }
}

fn remove_from_view<K: Ord, V: Ord>(view: &mut BTreeMap<K, BTreeSet<V>>, key: K, value: V) {
    if let Some(values) = view.get_mut(&key) {
        values.remove(&value);
        if values.is_empty() {
            view.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Authorship;

    #[test]
    fn link_is_visible_from_both_sides() {
        let mut links = Authorship::new();
        assert!(links.link(1_u32, 10_u32));
        assert!(links.link(1, 11));
        assert!(links.link(2, 10));

        assert_eq!(links.books_of(1).collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(links.authors_of(10).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn duplicate_link_is_ignored() {
        let mut links = Authorship::new();
        assert!(links.link('a', 1_u8));
        assert!(!links.link('a', 1));
        assert_eq!(links.len(), 1);
        assert_eq!(links.authors_of(1).count(), 1);
    }

    #[test]
    fn unlink_clears_both_views() {
        let mut links: Authorship<u32, u32> = [(1, 10), (2, 10)].into_iter().collect();
        assert!(links.unlink(1, 10));
        assert!(!links.unlink(1, 10));

        assert_eq!(links.books_of(1).count(), 0);
        assert_eq!(links.authors_of(10).collect::<Vec<_>>(), vec![2]);
        assert!(!links.contains(1, 10));
    }

    #[test]
    fn unknown_sides_have_empty_views() {
        let links: Authorship<u32, u32> = Authorship::new();
        assert!(links.is_empty());
        assert_eq!(links.books_of(99).count(), 0);
        assert_eq!(links.authors_of(99).count(), 0);
    }
}
