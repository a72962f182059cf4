use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::CartItem;
use crate::errors::AppError;
use crate::PgCartService;

use super::session_id;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub book_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub quantity: i32,
    pub session_id: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            id: item.id,
            book_id: item.book_id,
            quantity: item.quantity,
            session_id: item.session_id,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/cart
#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("X-Session-Id" = String, Header, description = "Opaque cart session token"),
    ),
    responses(
        (status = 200, description = "The session's cart lines", body = [CartItemResponse]),
        (status = 400, description = "Missing session token"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    req: HttpRequest,
    cart: web::Data<PgCartService>,
) -> Result<HttpResponse, AppError> {
    let session = session_id(&req)?;

    let items = web::block(move || cart.list_items(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(
        items
            .into_iter()
            .map(CartItemResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/cart
///
/// Adding a book already in the cart merges into the existing line.
#[utoipa::path(
    post,
    path = "/api/cart",
    params(
        ("X-Session-Id" = String, Header, description = "Opaque cart session token"),
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "The upserted cart line", body = CartItemResponse),
        (status = 400, description = "Missing session token or non-positive quantity"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    req: HttpRequest,
    cart: web::Data<PgCartService>,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let session = session_id(&req)?;
    let body = body.into_inner();

    let item = web::block(move || cart.add_item(&session, body.book_id, body.quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartItemResponse::from(item)))
}

/// PUT /api/cart/{itemId}
#[utoipa::path(
    put,
    path = "/api/cart/{itemId}",
    params(
        ("itemId" = Uuid, Path, description = "Cart line UUID"),
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "The updated cart line", body = CartItemResponse),
        (status = 400, description = "Non-positive quantity"),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "cart"
)]
pub async fn update_cart_item(
    cart: web::Data<PgCartService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let quantity = body.into_inner().quantity;

    let updated = web::block(move || cart.update_item(item_id, quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match updated {
        Some(item) => Ok(HttpResponse::Ok().json(CartItemResponse::from(item))),
        None => Err(AppError::NotFound),
    }
}

/// DELETE /api/cart/{itemId}
#[utoipa::path(
    delete,
    path = "/api/cart/{itemId}",
    params(
        ("itemId" = Uuid, Path, description = "Cart line UUID"),
    ),
    responses(
        (status = 200, description = "Line removed (idempotent)"),
    ),
    tag = "cart"
)]
pub async fn remove_cart_item(
    cart: web::Data<PgCartService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();

    web::block(move || cart.remove_item(item_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().finish())
}

/// DELETE /api/cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("X-Session-Id" = String, Header, description = "Opaque cart session token"),
    ),
    responses(
        (status = 200, description = "Cart cleared (idempotent)"),
        (status = 400, description = "Missing session token"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    req: HttpRequest,
    cart: web::Data<PgCartService>,
) -> Result<HttpResponse, AppError> {
    let session = session_id(&req)?;

    web::block(move || cart.clear(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().finish())
}

/// GET /api/cart/total
#[utoipa::path(
    get,
    path = "/api/cart/total",
    params(
        ("X-Session-Id" = String, Header, description = "Opaque cart session token"),
    ),
    responses(
        (status = 200, description = "Sum of price × quantity over the cart, as a decimal string"),
        (status = 400, description = "Missing session token"),
    ),
    tag = "cart"
)]
pub async fn cart_total(
    req: HttpRequest,
    cart: web::Data<PgCartService>,
) -> Result<HttpResponse, AppError> {
    let session = session_id(&req)?;

    let total = web::block(move || cart.total(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "total": total.to_string() })))
}
