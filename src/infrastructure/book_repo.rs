use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::book::{Book, NewBook};
use crate::domain::errors::DomainError;
use crate::domain::ports::BookRepository;
use crate::schema::books;

use super::models::{BookChangeset, BookRow, NewBookRow};

pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BookRepository for DieselBookRepository {
    fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = books::table.select(BookRow::as_select()).load(&mut conn)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = books::table
            .find(id)
            .select(BookRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Book::from))
    }

    fn search(&self, query: &str) -> Result<Vec<Book>, DomainError> {
        let mut conn = self.pool.get()?;

        let pattern = format!("%{}%", query);
        let rows = books::table
            .filter(
                books::title
                    .ilike(pattern.clone())
                    .or(books::author.ilike(pattern)),
            )
            .select(BookRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    fn find_in_stock(&self) -> Result<Vec<Book>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = books::table
            .filter(books::stock_quantity.gt(0))
            .select(BookRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    fn insert(&self, book: NewBook) -> Result<Book, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(books::table)
            .values(&NewBookRow {
                id: Uuid::new_v4(),
                title: book.title,
                author: book.author,
                isbn: book.isbn,
                price: book.price,
                description: book.description,
                stock_quantity: book.stock_quantity,
            })
            .returning(BookRow::as_returning())
            .get_result(&mut conn)?;
        Ok(Book::from(row))
    }

    fn update(&self, id: Uuid, book: NewBook) -> Result<Option<Book>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(books::table.find(id))
            .set(&BookChangeset {
                title: book.title,
                author: book.author,
                isbn: book.isbn,
                price: book.price,
                description: book.description,
                stock_quantity: book.stock_quantity,
            })
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Book::from))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(books::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn decrement_stock(&self, id: Uuid, quantity: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        // Conditional update: the WHERE clause keeps the stored quantity from
        // ever going negative, and an affected-row count of zero is the
        // fail-closed signal for both "missing book" and "not enough stock".
        let updated = diesel::update(
            books::table
                .find(id)
                .filter(books::stock_quantity.ge(quantity)),
        )
        .set(books::stock_quantity.eq(books::stock_quantity - quantity))
        .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        Ok(books::table.count().get_result(&mut conn)?)
    }
}
