use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    fixture_draft, load_authorship, seed_catalog, CatalogService, CrudRepository,
    SqliteBookRepository,
};

#[test]
fn seed_persists_two_books_each_with_one_author_and_publisher() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn).unwrap();

    let service = CatalogService::sqlite(&conn).unwrap();
    let details = service.book_details().unwrap();
    assert_eq!(details.len(), 2);

    let summary: Vec<(String, Vec<String>, String)> = details
        .iter()
        .map(|detail| {
            (
                detail.book.title.clone(),
                detail.authors.iter().map(|a| a.full_name()).collect(),
                detail.publisher.as_ref().unwrap().name.clone(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                "Domain Driven Design".to_string(),
                vec!["Eric Evans".to_string()],
                "Harper Collins".to_string()
            ),
            (
                "J2EE Development without EJB".to_string(),
                vec!["Rod Johnson".to_string()],
                "Helion".to_string()
            ),
        ]
    );
}

#[test]
fn seed_returns_entities_with_keys_and_back_references() {
    let conn = open_db_in_memory().unwrap();
    let catalog = seed_catalog(&conn).unwrap();

    assert_eq!(catalog.publishers.len(), 2);
    assert_eq!(catalog.authors.len(), 2);
    assert_eq!(catalog.books.len(), 2);
    assert!(catalog.publishers.iter().all(|p| p.id().is_some()));

    for (author, book) in catalog.authors.iter().zip(&catalog.books) {
        let book_id = book.id().unwrap();
        let author_id = author.id().unwrap();
        assert!(author.books.contains(&book_id));
        assert!(book.authors.contains(&author_id));
    }

    assert_eq!(catalog.books[0].isbn, "1234");
    assert_eq!(catalog.books[1].isbn, "2244");
    assert!(catalog.publishers.iter().all(|p| p.country == "USA"));
}

#[test]
fn seeded_links_match_join_table() {
    let conn = open_db_in_memory().unwrap();
    let catalog = seed_catalog(&conn).unwrap();

    let links = load_authorship(&conn).unwrap();
    assert_eq!(links.len(), 2);
    for book in &catalog.books {
        let authors: Vec<_> = links.authors_of(book.id().unwrap()).collect();
        assert_eq!(authors.len(), 1);
    }
}

#[test]
fn reseeding_duplicates_rows() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_catalog(&conn).unwrap();
    let second = seed_catalog(&conn).unwrap();

    let books = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(books.count().unwrap(), 4);

    let counts = CatalogService::sqlite(&conn).unwrap().counts().unwrap();
    assert_eq!(counts.publishers, 4);
    assert_eq!(counts.authors, 4);

    assert_eq!(first.books[0].title, second.books[0].title);
    assert_ne!(first.books[0], second.books[0]);
}

#[test]
fn fixture_draft_is_linked_before_any_save() {
    let draft = fixture_draft();
    let parts = draft.clone().into_parts();
    assert_eq!(parts.books.len(), 2);
    assert_eq!(parts.authorship.len(), 2);
    assert!(parts.books.iter().all(|book| book.id().is_none()));

    for (author, book) in parts.authorship.pairs() {
        assert_eq!(draft.books_of(author).collect::<Vec<_>>(), vec![book]);
        assert_eq!(draft.authors_of(book).collect::<Vec<_>>(), vec![author]);
        let name = draft.author(author).full_name();
        let title = &draft.book(book).title;
        match name.as_str() {
            "Eric Evans" => assert_eq!(title, "Domain Driven Design"),
            "Rod Johnson" => assert_eq!(title, "J2EE Development without EJB"),
            other => panic!("unexpected fixture author {other}"),
        }
    }
}
