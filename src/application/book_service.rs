use uuid::Uuid;

use crate::domain::book::{Book, NewBook};
use crate::domain::errors::DomainError;
use crate::domain::ports::BookRepository;

pub struct BookService<R> {
    books: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(books: R) -> Self {
        Self { books }
    }

    pub fn list_all(&self) -> Result<Vec<Book>, DomainError> {
        self.books.find_all()
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Book>, DomainError> {
        self.books.find_by_id(id)
    }

    /// A blank or absent query lists the whole catalog.
    pub fn search(&self, query: Option<&str>) -> Result<Vec<Book>, DomainError> {
        match query {
            Some(q) if !q.trim().is_empty() => self.books.search(q),
            _ => self.books.find_all(),
        }
    }

    pub fn list_available(&self) -> Result<Vec<Book>, DomainError> {
        self.books.find_in_stock()
    }

    pub fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        self.books.insert(book)
    }

    pub fn update(&self, id: Uuid, book: NewBook) -> Result<Option<Book>, DomainError> {
        self.books.update(id, book)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.books.delete(id)
    }

    /// The only path that ever reduces stock. Fails closed when the book is
    /// missing or the remaining stock is short, leaving the record untouched.
    pub fn decrement_stock(&self, id: Uuid, quantity: i32) -> Result<bool, DomainError> {
        self.books.decrement_stock(id, quantity)
    }

    pub fn count(&self) -> Result<i64, DomainError> {
        self.books.count()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::BookService;
    use crate::application::fakes::{book, InMemoryBooks};

    fn service_with(books: Vec<crate::domain::book::Book>) -> BookService<InMemoryBooks> {
        BookService::new(InMemoryBooks::with_books(books))
    }

    #[test]
    fn blank_and_absent_queries_list_the_whole_catalog() {
        let service = service_with(vec![
            book("1984", "George Orwell", "13.99", 15),
            book("Pride and Prejudice", "Jane Austen", "11.99", 12),
        ]);

        assert_eq!(service.search(None).unwrap().len(), 2);
        assert_eq!(service.search(Some("")).unwrap().len(), 2);
        assert_eq!(service.search(Some("   ")).unwrap().len(), 2);
    }

    #[test]
    fn search_matches_title_and_author_case_insensitively() {
        let service = service_with(vec![
            book("The Great Gatsby", "F. Scott Fitzgerald", "12.99", 10),
            book("1984", "George Orwell", "13.99", 15),
        ]);

        let by_title = service.search(Some("gatsby")).unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "The Great Gatsby");

        let by_author = service.search(Some("ORWELL")).unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "1984");

        assert!(service.search(Some("tolkien")).unwrap().is_empty());
    }

    #[test]
    fn available_books_all_have_positive_stock() {
        let service = service_with(vec![
            book("In stock", "Someone", "5.00", 3),
            book("Sold out", "Someone", "5.00", 0),
        ]);

        let available = service.list_available().unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].title, "In stock");
    }

    #[test]
    fn decrement_succeeds_down_to_zero() {
        let b = book("1984", "George Orwell", "13.99", 10);
        let id = b.id;
        let repo = InMemoryBooks::with_books(vec![b]);
        let service = BookService::new(repo);

        assert!(service.decrement_stock(id, 10).unwrap());
        assert_eq!(service.get_by_id(id).unwrap().unwrap().stock_quantity, 0);
    }

    #[test]
    fn decrement_fails_closed_when_stock_is_short() {
        let b = book("1984", "George Orwell", "13.99", 5);
        let id = b.id;
        let service = BookService::new(InMemoryBooks::with_books(vec![b]));

        assert!(!service.decrement_stock(id, 6).unwrap());
        assert_eq!(service.get_by_id(id).unwrap().unwrap().stock_quantity, 5);
    }

    #[test]
    fn decrement_fails_for_unknown_book() {
        let service = BookService::new(InMemoryBooks::new());
        assert!(!service.decrement_stock(Uuid::new_v4(), 1).unwrap());
    }

    #[test]
    fn delete_is_idempotent() {
        let b = book("1984", "George Orwell", "13.99", 5);
        let id = b.id;
        let service = BookService::new(InMemoryBooks::with_books(vec![b]));

        service.delete(id).unwrap();
        service.delete(id).unwrap();
        assert!(service.get_by_id(id).unwrap().is_none());
    }
}
