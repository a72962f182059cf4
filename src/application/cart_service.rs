use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookRepository, CartRepository};

pub struct CartService<C, B> {
    cart: C,
    books: B,
}

impl<C: CartRepository, B: BookRepository> CartService<C, B> {
    pub fn new(cart: C, books: B) -> Self {
        Self { cart, books }
    }

    pub fn list_items(&self, session_id: &str) -> Result<Vec<CartItem>, DomainError> {
        self.cart.find_by_session(session_id)
    }

    /// Upsert by (session, book): a repeated add merges into the existing line.
    /// Whether the book exists is not checked here; order placement validates it.
    pub fn add_item(
        &self,
        session_id: &str,
        book_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidInput(
                "Quantity must be positive".to_string(),
            ));
        }
        match self.cart.find_by_session_and_book(session_id, book_id)? {
            Some(existing) => self
                .cart
                .set_quantity(existing.id, existing.quantity + quantity)?
                .ok_or_else(|| {
                    DomainError::Internal("cart item removed while updating it".to_string())
                }),
            None => self.cart.insert(NewCartItem {
                book_id,
                quantity,
                session_id: session_id.to_string(),
            }),
        }
    }

    pub fn update_item(&self, id: Uuid, quantity: i32) -> Result<Option<CartItem>, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidInput(
                "Quantity must be positive".to_string(),
            ));
        }
        self.cart.set_quantity(id, quantity)
    }

    pub fn remove_item(&self, id: Uuid) -> Result<(), DomainError> {
        self.cart.delete(id)
    }

    pub fn clear(&self, session_id: &str) -> Result<(), DomainError> {
        self.cart.delete_by_session(session_id)
    }

    /// Sum of price × quantity over the session's lines. A line whose book no
    /// longer exists contributes zero.
    pub fn total(&self, session_id: &str) -> Result<BigDecimal, DomainError> {
        let mut total = BigDecimal::from(0);
        for item in self.cart.find_by_session(session_id)? {
            if let Some(book) = self.books.find_by_id(item.book_id)? {
                total += book.price * BigDecimal::from(item.quantity);
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::CartService;
    use crate::application::fakes::{book, InMemoryBooks, InMemoryCart};
    use crate::domain::book::Book;
    use crate::domain::errors::DomainError;

    const SESSION: &str = "session-abc";

    fn service_with(books: Vec<Book>) -> CartService<InMemoryCart, InMemoryBooks> {
        CartService::new(InMemoryCart::new(), InMemoryBooks::with_books(books))
    }

    #[test]
    fn adding_the_same_book_twice_merges_into_one_line() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);

        service.add_item(SESSION, id, 2).unwrap();
        service.add_item(SESSION, id, 3).unwrap();

        let items = service.list_items(SESSION).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn carts_are_scoped_per_session() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);

        service.add_item("session-a", id, 1).unwrap();
        service.add_item("session-b", id, 2).unwrap();

        assert_eq!(service.list_items("session-a").unwrap().len(), 1);
        assert_eq!(service.list_items("session-b").unwrap()[0].quantity, 2);
    }

    #[test]
    fn add_rejects_non_positive_quantities() {
        let service = service_with(vec![]);

        for quantity in [0, -3] {
            let err = service.add_item(SESSION, Uuid::new_v4(), quantity).unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }
        assert!(service.list_items(SESSION).unwrap().is_empty());
    }

    #[test]
    fn update_overwrites_the_quantity() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);

        let line = service.add_item(SESSION, id, 2).unwrap();
        let updated = service.update_item(line.id, 7).unwrap().unwrap();
        assert_eq!(updated.quantity, 7);
    }

    #[test]
    fn update_of_a_missing_line_returns_none() {
        let service = service_with(vec![]);
        assert!(service.update_item(Uuid::new_v4(), 3).unwrap().is_none());
    }

    #[test]
    fn update_rejects_non_positive_quantities() {
        let service = service_with(vec![]);
        let err = service.update_item(Uuid::new_v4(), 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn remove_is_idempotent() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);

        let line = service.add_item(SESSION, id, 2).unwrap();
        service.remove_item(line.id).unwrap();
        service.remove_item(line.id).unwrap();
        assert!(service.list_items(SESSION).unwrap().is_empty());
    }

    #[test]
    fn clearing_twice_yields_an_empty_cart_both_times() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);
        service.add_item(SESSION, id, 2).unwrap();

        service.clear(SESSION).unwrap();
        assert!(service.list_items(SESSION).unwrap().is_empty());

        service.clear(SESSION).unwrap();
        assert!(service.list_items(SESSION).unwrap().is_empty());
    }

    #[test]
    fn total_sums_price_times_quantity_across_lines() {
        let a = book("Book A", "Author A", "10.00", 10);
        let b = book("Book B", "Author B", "20.00", 10);
        let (id_a, id_b) = (a.id, b.id);
        let service = service_with(vec![a, b]);

        service.add_item(SESSION, id_a, 2).unwrap();
        service.add_item(SESSION, id_b, 1).unwrap();

        assert_eq!(
            service.total(SESSION).unwrap(),
            BigDecimal::from_str("40.00").unwrap()
        );
    }

    #[test]
    fn total_skips_lines_whose_book_is_gone() {
        let b = book("1984", "George Orwell", "13.99", 15);
        let id = b.id;
        let service = service_with(vec![b]);

        service.add_item(SESSION, id, 2).unwrap();
        // A line pointing at a book that was never in the catalog.
        service.add_item(SESSION, Uuid::new_v4(), 4).unwrap();

        assert_eq!(
            service.total(SESSION).unwrap(),
            BigDecimal::from_str("27.98").unwrap()
        );
    }

    #[test]
    fn empty_cart_total_is_zero() {
        let service = service_with(vec![]);
        assert_eq!(service.total(SESSION).unwrap(), BigDecimal::from(0));
    }
}
