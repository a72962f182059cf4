use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::book::{Book, NewBook};
use super::cart::{CartItem, NewCartItem};
use super::errors::DomainError;
use super::order::{CheckoutDetails, NewOrderItem, Order};

pub trait BookRepository: Send + Sync + 'static {
    fn find_all(&self) -> Result<Vec<Book>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, DomainError>;
    /// Case-insensitive substring match over title or author, in storage order.
    fn search(&self, query: &str) -> Result<Vec<Book>, DomainError>;
    fn find_in_stock(&self) -> Result<Vec<Book>, DomainError>;
    fn insert(&self, book: NewBook) -> Result<Book, DomainError>;
    fn update(&self, id: Uuid, book: NewBook) -> Result<Option<Book>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    /// Subtract `quantity` from the book's stock. Fails closed: returns
    /// `Ok(false)` and leaves the stock untouched when the book is missing or
    /// holds less than `quantity`.
    fn decrement_stock(&self, id: Uuid, quantity: i32) -> Result<bool, DomainError>;
    fn count(&self) -> Result<i64, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn find_by_session(&self, session_id: &str) -> Result<Vec<CartItem>, DomainError>;
    fn find_by_session_and_book(
        &self,
        session_id: &str,
        book_id: Uuid,
    ) -> Result<Option<CartItem>, DomainError>;
    fn insert(&self, item: NewCartItem) -> Result<CartItem, DomainError>;
    fn set_quantity(&self, id: Uuid, quantity: i32) -> Result<Option<CartItem>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    fn delete_by_session(&self, session_id: &str) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// First write of the two-step order lifecycle: a placeholder row with a
    /// zero total and PENDING status, persisted to obtain the order id.
    fn create_pending(&self, details: &CheckoutDetails) -> Result<Uuid, DomainError>;
    /// Second write: attach the line items, set the computed total, and mark
    /// the order CONFIRMED.
    fn finalize(
        &self,
        order_id: Uuid,
        total_amount: &BigDecimal,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, DomainError>;
    fn find_all(&self) -> Result<Vec<Order>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError>;
    fn find_by_status(&self, status: &str) -> Result<Vec<Order>, DomainError>;
}
