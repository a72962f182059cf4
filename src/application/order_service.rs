use std::collections::HashMap;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::book::Book;
use crate::domain::cart::CartItem;
use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutDetails, NewOrderItem, Order};
use crate::domain::ports::{BookRepository, CartRepository, OrderRepository};

pub struct OrderService<O, C, B> {
    orders: O,
    cart: C,
    books: B,
}

impl<O, C, B> OrderService<O, C, B>
where
    O: OrderRepository,
    C: CartRepository,
    B: BookRepository,
{
    pub fn new(orders: O, cart: C, books: B) -> Self {
        Self {
            orders,
            cart,
            books,
        }
    }

    /// Convert the session's cart into a confirmed order.
    ///
    /// Runs in two phases: every cart line is validated against the catalog
    /// before any write happens, so a missing book or a stock shortfall on any
    /// line aborts with no side effects. The commit phase then creates the
    /// order, decrements stock per line, clears the cart, and finalizes the
    /// order with the items priced from the validation-time snapshot.
    pub fn create_order(
        &self,
        session_id: &str,
        details: CheckoutDetails,
    ) -> Result<Order, DomainError> {
        validate_details(&details)?;

        let lines = self.cart.find_by_session(session_id)?;
        if lines.is_empty() {
            return Err(DomainError::InvalidInput("Cart is empty".to_string()));
        }

        // Validation pass. Each referenced book is fetched at most once and
        // cached; the snapshot is reused for pricing in the commit phase.
        let mut book_cache: HashMap<Uuid, Book> = HashMap::new();
        let mut checked: Vec<(CartItem, Book)> = Vec::with_capacity(lines.len());
        for line in lines {
            let book = match book_cache.get(&line.book_id) {
                Some(book) => book.clone(),
                None => {
                    let book = self.books.find_by_id(line.book_id)?.ok_or_else(|| {
                        DomainError::InvalidInput(format!(
                            "Book not found with ID: {}",
                            line.book_id
                        ))
                    })?;
                    book_cache.insert(line.book_id, book.clone());
                    book
                }
            };
            if book.stock_quantity < line.quantity {
                return Err(DomainError::InvalidInput(format!(
                    "Insufficient stock for book: {}",
                    book.title
                )));
            }
            checked.push((line, book));
        }

        // Commit pass, first write: placeholder order to obtain the id.
        let order_id = self.orders.create_pending(&details)?;

        let mut total_amount = BigDecimal::from(0);
        let mut items = Vec::with_capacity(checked.len());
        for (line, book) in &checked {
            // Availability was checked in the validation pass; the decrement
            // result is not re-checked, so concurrent checkouts can still race
            // for the last copies.
            self.books.decrement_stock(book.id, line.quantity)?;
            total_amount += book.price.clone() * BigDecimal::from(line.quantity);
            items.push(NewOrderItem {
                book_id: book.id,
                quantity: line.quantity,
                price: book.price.clone(),
            });
        }

        self.cart.delete_by_session(session_id)?;

        // Second write: total, items, CONFIRMED.
        self.orders.finalize(order_id, &total_amount, items)
    }

    pub fn get_all_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.orders.find_all()
    }

    pub fn get_order_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.orders.find_by_id(id)
    }

    pub fn get_orders_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        self.orders.find_by_customer_email(email)
    }

    pub fn get_orders_by_status(&self, status: &str) -> Result<Vec<Order>, DomainError> {
        self.orders.find_by_status(status)
    }
}

fn validate_details(details: &CheckoutDetails) -> Result<(), DomainError> {
    if details.customer_name.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Customer name is required".to_string(),
        ));
    }
    if details.customer_email.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Customer email is required".to_string(),
        ));
    }
    if !is_valid_email(&details.customer_email) {
        return Err(DomainError::InvalidInput(
            "Customer email should be valid".to_string(),
        ));
    }
    if details.customer_address.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Customer address is required".to_string(),
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::OrderService;
    use crate::application::fakes::{book, InMemoryBooks, InMemoryCart, InMemoryOrders};
    use crate::domain::book::Book;
    use crate::domain::cart::NewCartItem;
    use crate::domain::errors::DomainError;
    use crate::domain::order::{CheckoutDetails, STATUS_CONFIRMED};
    use crate::domain::ports::CartRepository;

    const SESSION: &str = "session-abc";

    type Service = OrderService<InMemoryOrders, InMemoryCart, InMemoryBooks>;

    fn service_with(books: Vec<Book>) -> Service {
        OrderService::new(
            InMemoryOrders::new(),
            InMemoryCart::new(),
            InMemoryBooks::with_books(books),
        )
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            customer_name: "Jane Reader".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_address: "1 Library Lane".to_string(),
        }
    }

    fn put_in_cart(service: &Service, book_id: Uuid, quantity: i32) {
        service
            .cart
            .insert(NewCartItem {
                book_id,
                quantity,
                session_id: SESSION.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn empty_cart_checkout_fails_and_creates_nothing() {
        let service = service_with(vec![]);

        let err = service.create_order(SESSION, details()).unwrap_err();
        assert_eq!(err.to_string(), "Cart is empty");
        assert_eq!(service.orders.order_count(), 0);
    }

    #[test]
    fn checkout_confirms_the_order_decrements_stock_and_clears_the_cart() {
        let b = book("The Great Gatsby", "F. Scott Fitzgerald", "12.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 2);

        let order = service.create_order(SESSION, details()).unwrap();

        assert_eq!(order.status, STATUS_CONFIRMED);
        assert_eq!(order.total_amount, BigDecimal::from_str("25.98").unwrap());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].price, BigDecimal::from_str("12.99").unwrap());
        assert_eq!(service.books.stock_of(id), Some(8));
        assert!(service.cart.find_by_session(SESSION).unwrap().is_empty());
    }

    #[test]
    fn insufficient_stock_aborts_with_no_side_effects() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 15);

        let err = service.create_order(SESSION, details()).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock for book: 1984");
        assert_eq!(service.orders.order_count(), 0);
        assert_eq!(service.books.stock_of(id), Some(10));
        assert_eq!(service.cart.find_by_session(SESSION).unwrap().len(), 1);
    }

    #[test]
    fn missing_book_aborts_with_no_side_effects() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 1);
        let ghost = Uuid::new_v4();
        put_in_cart(&service, ghost, 1);

        let err = service.create_order(SESSION, details()).unwrap_err();
        assert!(err.to_string().starts_with("Book not found with ID:"));
        assert_eq!(service.orders.order_count(), 0);
        assert_eq!(service.books.stock_of(id), Some(10));
    }

    #[test]
    fn shortfall_on_a_later_line_leaves_earlier_lines_unapplied() {
        let a = book("Plenty", "Author A", "10.00", 10);
        let b = book("Scarce", "Author B", "20.00", 1);
        let (id_a, id_b) = (a.id, b.id);
        let service = service_with(vec![a, b]);
        put_in_cart(&service, id_a, 2);
        put_in_cart(&service, id_b, 5);

        let err = service.create_order(SESSION, details()).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock for book: Scarce");
        assert_eq!(service.books.stock_of(id_a), Some(10));
        assert_eq!(service.books.stock_of(id_b), Some(1));
        assert_eq!(service.orders.order_count(), 0);
    }

    #[test]
    fn order_items_are_priced_from_the_checkout_snapshot() {
        let a = book("Book A", "Author A", "10.00", 10);
        let b = book("Book B", "Author B", "20.00", 10);
        let (id_a, id_b) = (a.id, b.id);
        let service = service_with(vec![a, b]);
        put_in_cart(&service, id_a, 2);
        put_in_cart(&service, id_b, 1);

        let order = service.create_order(SESSION, details()).unwrap();

        assert_eq!(order.total_amount, BigDecimal::from_str("40.00").unwrap());
        let price_of = |book_id: Uuid| {
            order
                .items
                .iter()
                .find(|i| i.book_id == book_id)
                .map(|i| i.price.clone())
                .unwrap()
        };
        assert_eq!(price_of(id_a), BigDecimal::from_str("10.00").unwrap());
        assert_eq!(price_of(id_b), BigDecimal::from_str("20.00").unwrap());
    }

    #[test]
    fn blank_customer_fields_are_rejected() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 1);

        for bad in [
            CheckoutDetails {
                customer_name: "  ".to_string(),
                ..details()
            },
            CheckoutDetails {
                customer_email: String::new(),
                ..details()
            },
            CheckoutDetails {
                customer_address: String::new(),
                ..details()
            },
        ] {
            let err = service.create_order(SESSION, bad).unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }
        assert_eq!(service.orders.order_count(), 0);
    }

    #[test]
    fn syntactically_invalid_emails_are_rejected() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 1);

        for email in ["not-an-email", "@example.com", "jane@nodot", "jane@.com"] {
            let err = service
                .create_order(
                    SESSION,
                    CheckoutDetails {
                        customer_email: email.to_string(),
                        ..details()
                    },
                )
                .unwrap_err();
            assert_eq!(err.to_string(), "Customer email should be valid");
        }
    }

    #[test]
    fn orders_by_email_come_back_newest_first() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);

        put_in_cart(&service, id, 1);
        let first = service.create_order(SESSION, details()).unwrap();
        put_in_cart(&service, id, 1);
        let second = service.create_order(SESSION, details()).unwrap();

        let orders = service
            .get_orders_by_customer_email("jane@example.com")
            .unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[test]
    fn orders_are_queryable_by_status() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let service = service_with(vec![b]);
        put_in_cart(&service, id, 1);
        service.create_order(SESSION, details()).unwrap();

        assert_eq!(service.get_orders_by_status(STATUS_CONFIRMED).unwrap().len(), 1);
        assert!(service.get_orders_by_status("SHIPPED").unwrap().is_empty());
    }
}
