//! Output formatting for CLI commands.

use crate::cli::OutputFormat;
use bookshelf_core::{Author, BookDetails, CatalogCounts, Entity, PersistedCatalog, Publisher};
use serde::Serialize;

/// Renders `value` as JSON, or with `pretty` otherwise.
pub fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    pretty: impl FnOnce(&T) -> String,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Pretty => Ok(pretty(value)),
    }
}

pub fn books(details: &[BookDetails]) -> String {
    if details.is_empty() {
        return "No books.".to_string();
    }
    details
        .iter()
        .map(|detail| {
            let authors = detail
                .authors
                .iter()
                .map(Author::full_name)
                .collect::<Vec<_>>()
                .join(", ");
            let publisher = detail
                .publisher
                .as_ref()
                .map_or_else(|| "unknown publisher".to_string(), |p| p.name.clone());
            let key = detail
                .book
                .id()
                .map_or_else(|| "unsaved".to_string(), |key| format!("#{key}"));
            format!(
                "{key} \"{}\" [ISBN {}] by {} ({publisher})",
                detail.book.title,
                detail.book.isbn,
                if authors.is_empty() { "nobody" } else { authors.as_str() }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn authors(authors: &[Author]) -> String {
    if authors.is_empty() {
        return "No authors.".to_string();
    }
    authors
        .iter()
        .map(Author::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn publishers(publishers: &[Publisher]) -> String {
    if publishers.is_empty() {
        return "No publishers.".to_string();
    }
    publishers
        .iter()
        .map(Publisher::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn counts(counts: &CatalogCounts) -> String {
    format!(
        "publishers: {}\nauthors:    {}\nbooks:      {}",
        counts.publishers, counts.authors, counts.books
    )
}

pub fn seeded(catalog: &PersistedCatalog) -> String {
    let keys = catalog
        .books
        .iter()
        .filter_map(|book| book.key())
        .map(|key| format!("#{key}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Seeded {} publishers, {} authors, {} books ({keys}).",
        catalog.publishers.len(),
        catalog.authors.len(),
        catalog.books.len()
    )
}

#[cfg(test)]
mod tests {
    use super::{authors, books, counts, publishers};
    use bookshelf_core::{
        Author, AuthorId, Book, BookDetails, BookId, CatalogCounts, Publisher, PublisherId,
    };

    #[test]
    fn books_lists_authors_and_publisher() {
        let details = vec![BookDetails {
            book: Book::with_id(
                BookId::new(1),
                "Domain Driven Design",
                "1234",
                PublisherId::new(1),
            ),
            publisher: Some(Publisher::with_id(
                PublisherId::new(1),
                "Harper Collins",
                "USA",
            )),
            authors: vec![Author::with_id(AuthorId::new(1), "Eric", "Evans")],
        }];
        assert_eq!(
            books(&details),
            "#1 \"Domain Driven Design\" [ISBN 1234] by Eric Evans (Harper Collins)"
        );
    }

    #[test]
    fn authors_show_their_book_keys() {
        let mut author = Author::with_id(AuthorId::new(1), "Eric", "Evans");
        author.books.insert(BookId::new(1));
        assert_eq!(authors(&[author]), "Eric Evans (author #1) books=[#1]");
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(books(&[]), "No books.");
        assert_eq!(publishers(&[]), "No publishers.");
    }

    #[test]
    fn counts_are_aligned() {
        let text = counts(&CatalogCounts {
            publishers: 2,
            authors: 2,
            books: 2,
        });
        assert!(text.starts_with("publishers: 2"));
        assert!(text.ends_with("books:      2"));
    }
}
