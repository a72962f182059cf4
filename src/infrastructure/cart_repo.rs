use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::cart_items;

use super::models::{CartItemRow, NewCartItemRow};

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn find_by_session(&self, session_id: &str) -> Result<Vec<CartItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = cart_items::table
            .filter(cart_items::session_id.eq(session_id))
            .select(CartItemRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    fn find_by_session_and_book(
        &self,
        session_id: &str,
        book_id: Uuid,
    ) -> Result<Option<CartItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = cart_items::table
            .filter(cart_items::session_id.eq(session_id))
            .filter(cart_items::book_id.eq(book_id))
            .select(CartItemRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(CartItem::from))
    }

    fn insert(&self, item: NewCartItem) -> Result<CartItem, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(cart_items::table)
            .values(&NewCartItemRow {
                id: Uuid::new_v4(),
                book_id: item.book_id,
                quantity: item.quantity,
                session_id: item.session_id,
            })
            .returning(CartItemRow::as_returning())
            .get_result(&mut conn)?;
        Ok(CartItem::from(row))
    }

    fn set_quantity(&self, id: Uuid, quantity: i32) -> Result<Option<CartItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(cart_items::table.find(id))
            .set(cart_items::quantity.eq(quantity))
            .returning(CartItemRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(CartItem::from))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(cart_items::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn delete_by_session(&self, session_id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(cart_items::table.filter(cart_items::session_id.eq(session_id)))
            .execute(&mut conn)?;
        Ok(())
    }
}
