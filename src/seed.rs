//! Sample catalog seeding, applied on startup when the books table is empty.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::db::DbPool;
use crate::domain::book::NewBook;
use crate::domain::errors::DomainError;
use crate::domain::ports::BookRepository;
use crate::infrastructure::book_repo::DieselBookRepository;

const SAMPLE_BOOKS: &[(&str, &str, &str, &str, &str, i32)] = &[
    (
        "The Great Gatsby",
        "F. Scott Fitzgerald",
        "978-0-7432-7356-5",
        "12.99",
        "A classic American novel about the Jazz Age.",
        10,
    ),
    (
        "To Kill a Mockingbird",
        "Harper Lee",
        "978-0-06-112008-4",
        "14.99",
        "A gripping tale of racial injustice and childhood innocence.",
        8,
    ),
    (
        "1984",
        "George Orwell",
        "978-0-452-28423-4",
        "13.99",
        "A dystopian social science fiction novel.",
        15,
    ),
    (
        "Pride and Prejudice",
        "Jane Austen",
        "978-0-14-143951-8",
        "11.99",
        "A romantic novel of manners.",
        12,
    ),
    (
        "The Catcher in the Rye",
        "J.D. Salinger",
        "978-0-316-76948-0",
        "13.49",
        "A controversial novel about teenage rebellion.",
        6,
    ),
];

pub fn seed_catalog(pool: &DbPool) -> Result<(), DomainError> {
    let books = DieselBookRepository::new(pool.clone());
    if books.count()? > 0 {
        return Ok(());
    }

    for (title, author, isbn, price, description, stock) in SAMPLE_BOOKS {
        books.insert(NewBook {
            title: (*title).to_string(),
            author: (*author).to_string(),
            isbn: Some((*isbn).to_string()),
            price: BigDecimal::from_str(price).map_err(|e| DomainError::Internal(e.to_string()))?,
            description: Some((*description).to_string()),
            stock_quantity: *stock,
        })?;
    }

    log::info!("Seeded the catalog with {} sample books", SAMPLE_BOOKS.len());
    Ok(())
}
