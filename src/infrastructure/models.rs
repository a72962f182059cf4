use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::book::Book;
use crate::domain::cart::CartItem;
use crate::schema::{books, cart_items, order_items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub stock_quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = books)]
pub struct NewBookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub stock_quantity: i32,
}

/// Full-record update; `None` writes NULL rather than keeping the old value.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub struct BookChangeset {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub stock_quantity: i32,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            price: row.price,
            description: row.description,
            stock_quantity: row.stock_quantity,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub session_id: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItemRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub session_id: String,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem {
            id: row.id,
            book_id: row.book_id,
            quantity: row.quantity,
            session_id: row.session_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub total_amount: BigDecimal,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}
