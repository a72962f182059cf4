use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::book::{Book, NewBook};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::PgBookService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "12.99"
    pub price: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub price: String,
    pub description: Option<String>,
    pub stock_quantity: i32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            price: book.price.to_string(),
            description: book.description,
            stock_quantity: book.stock_quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

fn parse_book(req: BookRequest) -> Result<NewBook, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    if req.author.trim().is_empty() {
        return Err(AppError::BadRequest("Author is required".to_string()));
    }
    let price = BigDecimal::from_str(&req.price)
        .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", req.price, e)))?;
    if price < BigDecimal::from(0) {
        return Err(AppError::BadRequest(
            "Price must be zero or positive".to_string(),
        ));
    }
    if req.stock_quantity < 0 {
        return Err(AppError::BadRequest(
            "Stock quantity must be zero or positive".to_string(),
        ));
    }
    Ok(NewBook {
        title: req.title,
        author: req.author,
        isbn: req.isbn,
        price,
        description: req.description,
        stock_quantity: req.stock_quantity,
    })
}

fn to_responses(books: Vec<Book>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/books
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books in the catalog", body = [BookResponse]),
    ),
    tag = "books"
)]
pub async fn list_books(books: web::Data<PgBookService>) -> Result<HttpResponse, AppError> {
    let result = web::block(move || books.list_all())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}

/// GET /api/books/search?query=
///
/// A blank or absent query behaves exactly like listing the whole catalog.
#[utoipa::path(
    get,
    path = "/api/books/search",
    params(
        ("query" = Option<String>, Query, description = "Case-insensitive substring matched against title or author"),
    ),
    responses(
        (status = 200, description = "Matching books", body = [BookResponse]),
    ),
    tag = "books"
)]
pub async fn search_books(
    books: web::Data<PgBookService>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let params = params.into_inner();

    let result = web::block(move || books.search(params.query.as_deref()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}

/// GET /api/books/available
#[utoipa::path(
    get,
    path = "/api/books/available",
    responses(
        (status = 200, description = "Books with positive stock", body = [BookResponse]),
    ),
    tag = "books"
)]
pub async fn available_books(books: web::Data<PgBookService>) -> Result<HttpResponse, AppError> {
    let result = web::block(move || books.list_available())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(result)))
}

/// GET /api/books/{id}
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book UUID"),
    ),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 404, description = "Book not found"),
    ),
    tag = "books"
)]
pub async fn get_book(
    books: web::Data<PgBookService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = web::block(move || books.get_by_id(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(book) => Ok(HttpResponse::Ok().json(BookResponse::from(book))),
        None => Err(AppError::NotFound),
    }
}

/// POST /api/books
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid book payload"),
    ),
    tag = "books"
)]
pub async fn create_book(
    books: web::Data<PgBookService>,
    body: web::Json<BookRequest>,
) -> Result<HttpResponse, AppError> {
    let new_book = parse_book(body.into_inner())?;

    let result = web::block(move || books.create(new_book))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(BookResponse::from(result)))
}

/// PUT /api/books/{id}
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book UUID"),
    ),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid book payload"),
        (status = 404, description = "Book not found"),
    ),
    tag = "books"
)]
pub async fn update_book(
    books: web::Data<PgBookService>,
    path: web::Path<Uuid>,
    body: web::Json<BookRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let new_book = parse_book(body.into_inner())?;

    let result = web::block(move || books.update(id, new_book))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(book) => Ok(HttpResponse::Ok().json(BookResponse::from(book))),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /api/books/{id}
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book UUID"),
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found"),
    ),
    tag = "books"
)]
pub async fn delete_book(
    books: web::Data<PgBookService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let deleted = web::block(move || -> Result<bool, DomainError> {
        match books.get_by_id(id)? {
            Some(_) => {
                books.delete(id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if deleted {
        Ok(HttpResponse::Ok().finish())
    } else {
        Err(AppError::NotFound)
    }
}
