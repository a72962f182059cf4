pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod seed;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::book_service::BookService;
use application::cart_service::CartService;
use application::order_service::OrderService;
use infrastructure::book_repo::DieselBookRepository;
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The services as wired against Postgres in `build_server`.
pub type PgBookService = BookService<DieselBookRepository>;
pub type PgCartService = CartService<DieselCartRepository, DieselBookRepository>;
pub type PgOrderService =
    OrderService<DieselOrderRepository, DieselCartRepository, DieselBookRepository>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::books::list_books,
        handlers::books::search_books,
        handlers::books::available_books,
        handlers::books::get_book,
        handlers::books::create_book,
        handlers::books::update_book,
        handlers::books::delete_book,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::update_cart_item,
        handlers::cart::remove_cart_item,
        handlers::cart::clear_cart,
        handlers::cart::cart_total,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::orders_by_customer,
        handlers::orders::orders_by_status,
    ),
    components(schemas(
        handlers::books::BookRequest,
        handlers::books::BookResponse,
        handlers::cart::AddToCartRequest,
        handlers::cart::UpdateCartItemRequest,
        handlers::cart::CartItemResponse,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
    )),
    tags(
        (name = "books", description = "Catalog queries and management"),
        (name = "cart", description = "Session-scoped shopping cart"),
        (name = "orders", description = "Order placement and lookup"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let book_service = web::Data::new(BookService::new(DieselBookRepository::new(pool.clone())));
    let cart_service = web::Data::new(CartService::new(
        DieselCartRepository::new(pool.clone()),
        DieselBookRepository::new(pool.clone()),
    ));
    let order_service = web::Data::new(OrderService::new(
        DieselOrderRepository::new(pool.clone()),
        DieselCartRepository::new(pool.clone()),
        DieselBookRepository::new(pool),
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(book_service.clone())
            .app_data(cart_service.clone())
            .app_data(order_service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/api/books")
                    .route("", web::get().to(handlers::books::list_books))
                    .route("", web::post().to(handlers::books::create_book))
                    .route("/search", web::get().to(handlers::books::search_books))
                    .route("/available", web::get().to(handlers::books::available_books))
                    .route("/{id}", web::get().to(handlers::books::get_book))
                    .route("/{id}", web::put().to(handlers::books::update_book))
                    .route("/{id}", web::delete().to(handlers::books::delete_book)),
            )
            .service(
                web::scope("/api/cart")
                    .route("", web::get().to(handlers::cart::get_cart))
                    .route("", web::post().to(handlers::cart::add_to_cart))
                    .route("", web::delete().to(handlers::cart::clear_cart))
                    .route("/total", web::get().to(handlers::cart::cart_total))
                    .route("/{itemId}", web::put().to(handlers::cart::update_cart_item))
                    .route(
                        "/{itemId}",
                        web::delete().to(handlers::cart::remove_cart_item),
                    ),
            )
            .service(
                web::scope("/api/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route(
                        "/customer/{email}",
                        web::get().to(handlers::orders::orders_by_customer),
                    )
                    .route(
                        "/status/{status}",
                        web::get().to(handlers::orders::orders_by_status),
                    )
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
