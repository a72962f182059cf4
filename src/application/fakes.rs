//! In-memory port implementations backing the service unit tests.

use std::str::FromStr;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::book::{Book, NewBook};
use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CheckoutDetails, NewOrderItem, Order, OrderItem, STATUS_CONFIRMED, STATUS_PENDING,
};
use crate::domain::ports::{BookRepository, CartRepository, OrderRepository};

pub fn book(title: &str, author: &str, price: &str, stock: i32) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: author.to_string(),
        isbn: None,
        price: BigDecimal::from_str(price).expect("valid decimal"),
        description: None,
        stock_quantity: stock,
    }
}

#[derive(Default)]
pub struct InMemoryBooks {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }

    pub fn stock_of(&self, id: Uuid) -> Option<i32> {
        self.books
            .lock()
            .expect("lock poisoned")
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.stock_quantity)
    }
}

impl BookRepository for InMemoryBooks {
    fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self.books.lock().expect("lock poisoned").clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, DomainError> {
        Ok(self
            .books
            .lock()
            .expect("lock poisoned")
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    fn search(&self, query: &str) -> Result<Vec<Book>, DomainError> {
        let needle = query.to_lowercase();
        Ok(self
            .books
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn find_in_stock(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self
            .books
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|b| b.stock_quantity > 0)
            .cloned()
            .collect())
    }

    fn insert(&self, book: NewBook) -> Result<Book, DomainError> {
        let book = Book {
            id: Uuid::new_v4(),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            price: book.price,
            description: book.description,
            stock_quantity: book.stock_quantity,
        };
        self.books.lock().expect("lock poisoned").push(book.clone());
        Ok(book)
    }

    fn update(&self, id: Uuid, book: NewBook) -> Result<Option<Book>, DomainError> {
        let mut books = self.books.lock().expect("lock poisoned");
        match books.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                existing.title = book.title;
                existing.author = book.author;
                existing.isbn = book.isbn;
                existing.price = book.price;
                existing.description = book.description;
                existing.stock_quantity = book.stock_quantity;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.books
            .lock()
            .expect("lock poisoned")
            .retain(|b| b.id != id);
        Ok(())
    }

    fn decrement_stock(&self, id: Uuid, quantity: i32) -> Result<bool, DomainError> {
        let mut books = self.books.lock().expect("lock poisoned");
        match books.iter_mut().find(|b| b.id == id) {
            Some(book) if book.stock_quantity >= quantity => {
                book.stock_quantity -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn count(&self) -> Result<i64, DomainError> {
        Ok(self.books.lock().expect("lock poisoned").len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryCart {
    items: Mutex<Vec<CartItem>>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartRepository for InMemoryCart {
    fn find_by_session(&self, session_id: &str) -> Result<Vec<CartItem>, DomainError> {
        Ok(self
            .items
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|i| i.session_id == session_id)
            .cloned()
            .collect())
    }

    fn find_by_session_and_book(
        &self,
        session_id: &str,
        book_id: Uuid,
    ) -> Result<Option<CartItem>, DomainError> {
        Ok(self
            .items
            .lock()
            .expect("lock poisoned")
            .iter()
            .find(|i| i.session_id == session_id && i.book_id == book_id)
            .cloned())
    }

    fn insert(&self, item: NewCartItem) -> Result<CartItem, DomainError> {
        let item = CartItem {
            id: Uuid::new_v4(),
            book_id: item.book_id,
            quantity: item.quantity,
            session_id: item.session_id,
        };
        self.items.lock().expect("lock poisoned").push(item.clone());
        Ok(item)
    }

    fn set_quantity(&self, id: Uuid, quantity: i32) -> Result<Option<CartItem>, DomainError> {
        let mut items = self.items.lock().expect("lock poisoned");
        match items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.items
            .lock()
            .expect("lock poisoned")
            .retain(|i| i.id != id);
        Ok(())
    }

    fn delete_by_session(&self, session_id: &str) -> Result<(), DomainError> {
        self.items
            .lock()
            .expect("lock poisoned")
            .retain(|i| i.session_id != session_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().expect("lock poisoned").len()
    }
}

impl OrderRepository for InMemoryOrders {
    fn create_pending(&self, details: &CheckoutDetails) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        self.orders.lock().expect("lock poisoned").push(Order {
            id,
            customer_name: details.customer_name.clone(),
            customer_email: details.customer_email.clone(),
            customer_address: details.customer_address.clone(),
            order_date: Utc::now(),
            total_amount: BigDecimal::from(0),
            status: STATUS_PENDING.to_string(),
            items: Vec::new(),
        });
        Ok(id)
    }

    fn finalize(
        &self,
        order_id: Uuid,
        total_amount: &BigDecimal,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, DomainError> {
        let mut orders = self.orders.lock().expect("lock poisoned");
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::NotFound)?;
        order.total_amount = total_amount.clone();
        order.status = STATUS_CONFIRMED.to_string();
        order.items = items
            .into_iter()
            .map(|i| OrderItem {
                id: Uuid::new_v4(),
                order_id,
                book_id: i.book_id,
                quantity: i.quantity,
                price: i.price,
            })
            .collect();
        Ok(order.clone())
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.orders.lock().expect("lock poisoned").clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .expect("lock poisoned")
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        let mut matching: Vec<Order> = self
            .orders
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|o| o.customer_email == email)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(matching)
    }

    fn find_by_status(&self, status: &str) -> Result<Vec<Order>, DomainError> {
        let mut matching: Vec<Order> = self
            .orders
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(matching)
    }
}
